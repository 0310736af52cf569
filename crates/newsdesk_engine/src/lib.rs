//! Newsdesk engine: backend client, result fetching, polling scheduler and card output.
mod backend;
mod card;
mod engine;
mod result;
mod sink;
mod types;

pub use backend::{Backend, BackendSettings, ReqwestBackend};
pub use card::{CardWriteError, CardWriter, LATEST_CARD_FILENAME};
pub use engine::{EngineHandle, EngineSettings};
pub use result::{fetch_latest_article, ResultTimings};
pub use sink::{ChannelEventSink, EventSink};
pub use types::{
    Ack, ArticleBatch, ArticleRecord, BackendError, ControlCall, EngineEvent, FailureKind,
    FetchStage, FileEntry, FileListing, JobId, JobRequest, StatusSnapshot,
};
