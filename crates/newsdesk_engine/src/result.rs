use std::time::Duration;

use desk_logging::desk_info;

use crate::{
    ArticleRecord, Backend, BackendError, EngineEvent, EventSink, FailureKind, FetchStage, JobId,
};

/// Waits around the translation step. The backend writes its files some time
/// after it reports completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultTimings {
    pub settle_delay: Duration,
    pub translate_wait: Duration,
}

impl Default for ResultTimings {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_secs(1),
            translate_wait: Duration::from_secs(2),
        }
    }
}

/// Triggers translation and returns the first article of the newest result file.
///
/// Emits a [`EngineEvent::ResultStage`] before each step.
pub async fn fetch_latest_article(
    backend: &dyn Backend,
    timings: ResultTimings,
    job_id: JobId,
    sink: &dyn EventSink,
) -> Result<ArticleRecord, BackendError> {
    let enter = |stage: FetchStage| sink.emit(EngineEvent::ResultStage { job_id, stage });

    enter(FetchStage::Settling);
    tokio::time::sleep(timings.settle_delay).await;

    enter(FetchStage::Translating);
    backend.start_translator().await?;

    enter(FetchStage::AwaitingTranslation);
    tokio::time::sleep(timings.translate_wait).await;

    enter(FetchStage::ListingFiles);
    let latest = backend
        .list_files()
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::new(FailureKind::NoResultFiles))?;

    enter(FetchStage::Downloading);
    desk_info!("Job {}: downloading {}", job_id, latest.name);
    backend
        .download(&latest.name)
        .await?
        .articles
        .into_iter()
        .next()
        .ok_or_else(|| BackendError::new(FailureKind::NoArticles))
}
