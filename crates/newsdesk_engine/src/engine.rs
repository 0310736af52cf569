use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use desk_logging::{desk_debug, desk_info, desk_trace, desk_warn};
use tokio::runtime::Runtime;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::result::{fetch_latest_article, ResultTimings};
use crate::{Backend, ControlCall, EngineEvent, EventSink, JobId, JobRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Foreground status poll period.
    pub poll_interval: Duration,
    /// Background sync period.
    pub sync_interval: Duration,
    pub result: ResultTimings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            sync_interval: Duration::from_secs(10),
            result: ResultTimings::default(),
        }
    }
}

enum EngineCommand {
    StartJob { job_id: JobId, request: JobRequest },
    BeginPolling { job_id: JobId },
    StopPolling { job_id: JobId },
    FetchResult { job_id: JobId },
    CancelJob { job_id: JobId },
    SyncStatus,
    Control(ControlCall),
}

/// Handle to the engine thread. Dropping it shuts the engine down.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        settings: EngineSettings,
        backend: Arc<dyn Backend>,
        sink: Arc<dyn EventSink>,
    ) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("newsdesk-io")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::Builder::new()
            .name("newsdesk-engine".to_string())
            .spawn(move || {
                let mut scheduler = Scheduler {
                    runtime,
                    settings,
                    backend,
                    sink,
                    foreground: None,
                };
                scheduler.start_background_sync();
                while let Ok(command) = cmd_rx.recv() {
                    scheduler.handle(command);
                }
                scheduler.cancel_foreground();
                desk_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn start_job(&self, job_id: JobId, request: JobRequest) {
        self.send(EngineCommand::StartJob { job_id, request });
    }

    pub fn begin_polling(&self, job_id: JobId) {
        self.send(EngineCommand::BeginPolling { job_id });
    }

    pub fn stop_polling(&self, job_id: JobId) {
        self.send(EngineCommand::StopPolling { job_id });
    }

    pub fn fetch_result(&self, job_id: JobId) {
        self.send(EngineCommand::FetchResult { job_id });
    }

    pub fn cancel_job(&self, job_id: JobId) {
        self.send(EngineCommand::CancelJob { job_id });
    }

    pub fn sync_status(&self) {
        self.send(EngineCommand::SyncStatus);
    }

    pub fn control(&self, call: ControlCall) {
        self.send(EngineCommand::Control(call));
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            desk_warn!("Engine thread has stopped; command dropped");
        }
    }
}

/// The job this client launched. Cancelling `token` ends every task of the
/// job; `poll` is a child token for the status poll alone.
struct ForegroundSlot {
    job_id: JobId,
    token: CancellationToken,
    poll: Option<CancellationToken>,
}

struct Scheduler {
    runtime: Runtime,
    settings: EngineSettings,
    backend: Arc<dyn Backend>,
    sink: Arc<dyn EventSink>,
    foreground: Option<ForegroundSlot>,
}

impl Scheduler {
    fn handle(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::StartJob { job_id, request } => self.start_job(job_id, request),
            EngineCommand::BeginPolling { job_id } => self.begin_polling(job_id),
            EngineCommand::StopPolling { job_id } => {
                if let Some(poll) = self.slot_mut(job_id).and_then(|slot| slot.poll.take()) {
                    desk_debug!("Job {}: status poll stopped", job_id);
                    poll.cancel();
                }
            }
            EngineCommand::FetchResult { job_id } => self.fetch_result(job_id),
            EngineCommand::CancelJob { job_id } => {
                if self.slot_mut(job_id).is_some() {
                    self.cancel_foreground();
                }
            }
            EngineCommand::SyncStatus => {
                let backend = self.backend.clone();
                let sink = self.sink.clone();
                self.runtime.spawn(async move {
                    let result = backend.status().await;
                    sink.emit(EngineEvent::SyncStatus(result));
                });
            }
            EngineCommand::Control(call) => {
                let backend = self.backend.clone();
                let sink = self.sink.clone();
                self.runtime.spawn(async move {
                    desk_info!("Control {:?} requested", call);
                    let result = backend.control(call).await;
                    sink.emit(EngineEvent::ControlFinished { call, result });
                });
            }
        }
    }

    fn slot_mut(&mut self, job_id: JobId) -> Option<&mut ForegroundSlot> {
        self.foreground
            .as_mut()
            .filter(|slot| slot.job_id == job_id)
    }

    fn cancel_foreground(&mut self) {
        if let Some(slot) = self.foreground.take() {
            desk_debug!("Job {}: foreground tasks cancelled", slot.job_id);
            slot.token.cancel();
        }
    }

    fn start_job(&mut self, job_id: JobId, request: JobRequest) {
        self.cancel_foreground();
        let token = CancellationToken::new();
        self.foreground = Some(ForegroundSlot {
            job_id,
            token: token.clone(),
            poll: None,
        });

        let backend = self.backend.clone();
        let sink = self.sink.clone();
        self.runtime.spawn(async move {
            desk_info!(
                "Job {}: starting parser (newsCount={}, targetLanguage={})",
                job_id,
                request.news_count,
                request.target_language
            );
            tokio::select! {
                _ = token.cancelled() => desk_debug!("Job {}: start cancelled", job_id),
                result = backend.start_parser(&request) => {
                    sink.emit(EngineEvent::JobStarted { job_id, result });
                }
            }
        });
    }

    fn begin_polling(&mut self, job_id: JobId) {
        let Some(slot) = self.slot_mut(job_id) else {
            desk_debug!("Job {}: not active, poll not started", job_id);
            return;
        };
        if let Some(previous) = slot.poll.take() {
            previous.cancel();
        }
        let token = slot.token.child_token();
        slot.poll = Some(token.clone());

        let backend = self.backend.clone();
        let sink = self.sink.clone();
        let period = self.settings.poll_interval;
        self.runtime
            .spawn(poll_status(backend, sink, job_id, period, token));
    }

    fn fetch_result(&mut self, job_id: JobId) {
        let Some(slot) = self.slot_mut(job_id) else {
            desk_debug!("Job {}: not active, result not fetched", job_id);
            return;
        };
        let token = slot.token.clone();

        let backend = self.backend.clone();
        let sink = self.sink.clone();
        let timings = self.settings.result;
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => desk_debug!("Job {}: result fetch cancelled", job_id),
                result = fetch_latest_article(backend.as_ref(), timings, job_id, sink.as_ref()) => {
                    sink.emit(EngineEvent::ResultFetched { job_id, result });
                }
            }
        });
    }

    fn start_background_sync(&self) {
        let sink = self.sink.clone();
        let period = self.settings.sync_interval;
        self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                sink.emit(EngineEvent::SyncDue);
            }
        });
    }
}

/// Polls `/api/status` every `period` until cancelled or a request fails.
async fn poll_status(
    backend: Arc<dyn Backend>,
    sink: Arc<dyn EventSink>,
    job_id: JobId,
    period: Duration,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }
        let result = tokio::select! {
            _ = token.cancelled() => break,
            result = backend.status() => result,
        };
        if let Ok(snapshot) = &result {
            desk_trace!(
                "Job {}: running={} progress={:?} message={}",
                job_id,
                snapshot.running,
                snapshot.progress,
                snapshot.message
            );
        }
        let failed = result.is_err();
        sink.emit(EngineEvent::Status { job_id, result });
        if failed {
            desk_warn!("Job {}: status poll failed, polling stopped", job_id);
            break;
        }
    }
}
