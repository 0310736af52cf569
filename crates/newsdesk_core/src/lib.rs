//! Newsdesk core: pure control-panel state machine, view model and article renderer.
mod error_code;
mod effect;
mod model;
mod msg;
mod progress;
mod render;
mod state;
mod update;
mod view_model;

pub use effect::{Control, Effect};
pub use error_code::{describe_failure, ErrorCode};
pub use model::{Article, Failure, FailureKind, FetchStage, JobConfig, JobId, JobStatus};
pub use msg::Msg;
pub use progress::{SyntheticProgress, PROGRESS_CEILING, PROGRESS_STEP};
pub use render::{escape_html, format_received_at, render_article, render_card_document, ArticleCard};
pub use state::{AppState, UiState};
pub use update::{update, PRE_RUNNING_POLL_LIMIT};
pub use view_model::{AppViewModel, ProgressView};
