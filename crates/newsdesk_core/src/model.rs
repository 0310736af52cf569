use crate::ErrorCode;

pub type JobId = u64;

/// Form values captured when a job is launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    pub article_count: u32,
    pub target_language: String,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            article_count: 1,
            target_language: "ru".to_string(),
        }
    }
}

/// Snapshot of the backend job state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobStatus {
    pub running: bool,
    pub message: String,
    pub result_file: Option<String>,
    /// Failure recorded by the backend for the last run.
    pub error: Option<String>,
}

/// One news item from a result file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Article {
    pub title: Option<String>,
    pub title_translated: Option<String>,
    pub content: Option<String>,
    pub content_translated: Option<String>,
    pub full_content: Option<String>,
    pub link: Option<String>,
}

/// Steps of the result-fetch sequence, reported by the engine as they begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Settling,
    Translating,
    AwaitingTranslation,
    ListingFiles,
    Downloading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The backend answered with an error status or an `error` body.
    Backend,
    /// The request never produced a usable answer (network, timeout, decode).
    Transport,
    NoFiles,
    NoArticles,
}

/// A failed backend interaction as seen by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub code: Option<ErrorCode>,
    /// Backend-supplied or transport-level text; `None` means use the operation's fallback.
    pub message: Option<String>,
}

impl Failure {
    pub fn backend(message: Option<String>) -> Self {
        Self {
            kind: FailureKind::Backend,
            code: None,
            message,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Transport,
            code: None,
            message: Some(message.into()),
        }
    }

    pub fn no_files() -> Self {
        Self {
            kind: FailureKind::NoFiles,
            code: None,
            message: None,
        }
    }

    pub fn no_articles() -> Self {
        Self {
            kind: FailureKind::NoArticles,
            code: None,
            message: None,
        }
    }

    pub fn with_code(mut self, code: Option<ErrorCode>) -> Self {
        self.code = code;
        self
    }

    /// Backend text when present and non-empty, otherwise `fallback`.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.message.as_deref() {
            Some(message) if !message.is_empty() => message,
            _ => fallback,
        }
    }
}
