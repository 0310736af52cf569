use chrono::NaiveDateTime;

use crate::{Article, Control, Failure, FetchStage, JobId, JobStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the article-count field.
    ArticleCountChanged(u32),
    /// User edited the target-language field.
    LanguageChanged(String),
    /// User clicked Start.
    StartClicked,
    /// User clicked Stop.
    StopClicked,
    /// User clicked Reset.
    ResetClicked,
    /// User clicked Test.
    TestClicked,
    /// User clicked Clear files.
    ClearFilesClicked,
    /// The job-start request finished.
    JobStartFinished {
        job_id: JobId,
        result: Result<(), Failure>,
    },
    /// Foreground status poll answered.
    JobStatusPolled {
        job_id: JobId,
        result: Result<JobStatus, Failure>,
    },
    /// The result-fetch sequence entered a new step.
    ResultStage { job_id: JobId, stage: FetchStage },
    /// The result-fetch sequence finished.
    ResultFetched {
        job_id: JobId,
        result: Result<Article, Failure>,
        received_at: NaiveDateTime,
    },
    /// Background sync period elapsed.
    SyncDue,
    /// Background status request answered.
    SyncStatusReceived(Result<JobStatus, Failure>),
    /// An auxiliary control request finished; `Ok` carries the backend message.
    ControlFinished {
        control: Control,
        result: Result<Option<String>, Failure>,
    },
}
