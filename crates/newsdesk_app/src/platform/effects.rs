use std::path::PathBuf;
use std::sync::mpsc;

use chrono::Local;
use desk_logging::{desk_error, desk_info, desk_warn};
use newsdesk_core::{Article, Control, Effect, ErrorCode, Failure, FetchStage, JobStatus, Msg};
use newsdesk_engine::{
    ArticleRecord, BackendError, CardWriter, ControlCall, EngineEvent, EngineHandle, EventSink,
    FailureKind, JobRequest, StatusSnapshot,
};

use super::app::AppInput;

/// Executes controller effects against the engine and the card writer.
pub struct EffectRunner {
    engine: EngineHandle,
    cards: CardWriter,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, cards: CardWriter) -> Self {
        Self { engine, cards }
    }

    pub fn card_path(&self) -> PathBuf {
        self.cards.target()
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartJob { job_id, config } => {
                    desk_info!(
                        "StartJob job_id={} count={} language={}",
                        job_id,
                        config.article_count,
                        config.target_language
                    );
                    self.engine.start_job(
                        job_id,
                        JobRequest {
                            news_count: config.article_count,
                            target_language: config.target_language,
                        },
                    );
                }
                Effect::BeginPolling { job_id } => self.engine.begin_polling(job_id),
                Effect::StopPolling { job_id } => self.engine.stop_polling(job_id),
                Effect::FetchResult { job_id } => self.engine.fetch_result(job_id),
                Effect::CancelJob { job_id } => self.engine.cancel_job(job_id),
                Effect::SyncStatus => self.engine.sync_status(),
                Effect::RunControl(control) => self.engine.control(control_call(control)),
                Effect::PublishArticle { document } => {
                    if let Err(err) = self.cards.write(&document) {
                        desk_error!("Could not write news card: {}", err);
                        eprintln!("Не удалось сохранить карточку новости: {err}");
                    }
                }
            }
        }
    }
}

/// Forwards engine events to the controller's inbox as [`Msg`]s.
pub struct MsgSink {
    tx: mpsc::Sender<AppInput>,
}

impl MsgSink {
    pub fn new(tx: mpsc::Sender<AppInput>) -> Self {
        Self { tx }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppInput::Engine(engine_event_to_msg(event)));
    }
}

fn engine_event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::JobStarted { job_id, result } => Msg::JobStartFinished {
            job_id,
            result: result.map(|_| ()).map_err(to_failure),
        },
        EngineEvent::Status { job_id, result } => Msg::JobStatusPolled {
            job_id,
            result: result.map(to_job_status).map_err(to_failure),
        },
        EngineEvent::ResultStage { job_id, stage } => Msg::ResultStage {
            job_id,
            stage: map_stage(stage),
        },
        EngineEvent::ResultFetched { job_id, result } => Msg::ResultFetched {
            job_id,
            result: result.map(to_article).map_err(to_failure),
            received_at: Local::now().naive_local(),
        },
        EngineEvent::SyncDue => Msg::SyncDue,
        EngineEvent::SyncStatus(result) => {
            Msg::SyncStatusReceived(result.map(to_job_status).map_err(to_failure))
        }
        EngineEvent::ControlFinished { call, result } => Msg::ControlFinished {
            control: map_control(call),
            result: result.map(|ack| ack.message).map_err(to_failure),
        },
    }
}

fn to_failure(err: BackendError) -> Failure {
    if !err.is_reported() {
        desk_warn!("Backend request failed: {}", err);
    }
    let code = err.code.as_deref().and_then(ErrorCode::from_wire);
    match err.kind {
        FailureKind::HttpStatus(_) | FailureKind::Rejected => {
            Failure::backend(err.detail).with_code(code)
        }
        FailureKind::NoResultFiles => Failure::no_files(),
        FailureKind::NoArticles => Failure::no_articles(),
        FailureKind::Timeout => {
            Failure::transport(err.to_string()).with_code(Some(ErrorCode::Timeout))
        }
        _ => Failure::transport(err.to_string()),
    }
}

fn to_job_status(snapshot: StatusSnapshot) -> JobStatus {
    JobStatus {
        running: snapshot.running,
        message: snapshot.message,
        result_file: snapshot.result_file,
        error: snapshot.error,
    }
}

fn to_article(record: ArticleRecord) -> Article {
    Article {
        title: record.title,
        title_translated: record.title_translated,
        content: record.content,
        content_translated: record.content_translated,
        full_content: record.full_content,
        link: record.link,
    }
}

fn map_stage(stage: newsdesk_engine::FetchStage) -> FetchStage {
    match stage {
        newsdesk_engine::FetchStage::Settling => FetchStage::Settling,
        newsdesk_engine::FetchStage::Translating => FetchStage::Translating,
        newsdesk_engine::FetchStage::AwaitingTranslation => FetchStage::AwaitingTranslation,
        newsdesk_engine::FetchStage::ListingFiles => FetchStage::ListingFiles,
        newsdesk_engine::FetchStage::Downloading => FetchStage::Downloading,
    }
}

fn map_control(call: ControlCall) -> Control {
    match call {
        ControlCall::Stop => Control::Stop,
        ControlCall::Reset => Control::Reset,
        ControlCall::Test => Control::Test,
        ControlCall::ClearFiles => Control::ClearFiles,
    }
}

fn control_call(control: Control) -> ControlCall {
    match control {
        Control::Stop => ControlCall::Stop,
        Control::Reset => ControlCall::Reset,
        Control::Test => ControlCall::Test,
        Control::ClearFiles => ControlCall::ClearFiles,
    }
}
