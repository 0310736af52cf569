use crate::{ArticleCard, JobConfig, UiState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub percent: u8,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub ui: UiState,
    pub status_text: String,
    pub start_enabled: bool,
    pub stop_enabled: bool,
    /// Spinner visibility; true while a foreground job is active.
    pub loading: bool,
    pub progress: Option<ProgressView>,
    pub article: Option<ArticleCard>,
    pub form: JobConfig,
    pub dirty: bool,
}
