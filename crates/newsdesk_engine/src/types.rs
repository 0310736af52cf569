use std::fmt;

use serde::{Deserialize, Serialize};

pub type JobId = u64;

/// Body of `POST /api/start-parser`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub news_count: u32,
    pub target_language: String,
}

/// `GET /api/status` payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default)]
    pub running: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result_file: Option<String>,
    /// Backend-side estimate; informational only.
    #[serde(default)]
    pub progress: Option<u32>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified: Option<String>,
}

/// `GET /api/files` payload, newest file first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct FileListing {
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ArticleRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "title_ru")]
    pub title_translated: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, alias = "content_ru")]
    pub content_translated: Option<String>,
    #[serde(default)]
    pub full_content: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// `GET /api/download/:name` payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ArticleBatch {
    #[serde(default)]
    pub articles: Vec<ArticleRecord>,
}

/// Generic `{message}` / `{error, code}` reply.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Auxiliary POST endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCall {
    Stop,
    Reset,
    Test,
    ClearFiles,
}

impl ControlCall {
    pub fn path(self) -> &'static str {
        match self {
            ControlCall::Stop => "api/stop-parser",
            ControlCall::Reset => "api/reset-status",
            ControlCall::Test => "api/test-parser",
            ControlCall::ClearFiles => "api/clear-files",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Settling,
    Translating,
    AwaitingTranslation,
    ListingFiles,
    Downloading,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    JobStarted {
        job_id: JobId,
        result: Result<Ack, BackendError>,
    },
    Status {
        job_id: JobId,
        result: Result<StatusSnapshot, BackendError>,
    },
    ResultStage {
        job_id: JobId,
        stage: FetchStage,
    },
    ResultFetched {
        job_id: JobId,
        result: Result<ArticleRecord, BackendError>,
    },
    SyncDue,
    SyncStatus(Result<StatusSnapshot, BackendError>),
    ControlFinished {
        call: ControlCall,
        result: Result<Ack, BackendError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {}", .detail.as_deref().unwrap_or("no details"))]
pub struct BackendError {
    pub kind: FailureKind,
    /// The backend's own `error` text, or transport diagnostics.
    pub detail: Option<String>,
    /// The backend's `code` field, when sent.
    pub code: Option<String>,
}

impl BackendError {
    pub(crate) fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            detail: None,
            code: None,
        }
    }

    pub(crate) fn with_detail(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
            code: None,
        }
    }

    /// True when the text came from the backend rather than the transport.
    pub fn is_reported(&self) -> bool {
        matches!(self.kind, FailureKind::HttpStatus(_) | FailureKind::Rejected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    /// 2xx reply whose body carried `error`.
    Rejected,
    NoResultFiles,
    NoArticles,
    Timeout,
    TooLarge { max_bytes: u64 },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Rejected => write!(f, "rejected by backend"),
            FailureKind::NoResultFiles => write!(f, "no result files"),
            FailureKind::NoArticles => write!(f, "no articles in result file"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes } => {
                write!(f, "response larger than {max_bytes} bytes")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
