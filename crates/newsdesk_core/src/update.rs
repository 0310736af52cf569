use chrono::NaiveDateTime;
use desk_logging::{desk_debug, desk_info, desk_warn};

use crate::state::Phase;
use crate::{
    describe_failure, render_article, render_card_document, AppState, Article, Control, Effect,
    ErrorCode, Failure, FetchStage, JobId, JobStatus, Msg, UiState,
};

const LAUNCHING_TEXT: &str = "Запуск парсера...";
const LAUNCHED_TEXT: &str = "Парсер запущен";
const PARSED_TEXT: &str = "Парсинг завершен!";
const TRANSLATING_TEXT: &str = "Перевод с помощью ИИ...";
const FETCHED_TEXT: &str = "Новость успешно получена!";
const TESTING_TEXT: &str = "Тестирование парсера...";

const START_FALLBACK: &str = "Ошибка запуска парсера";
const STATUS_FALLBACK: &str = "Ошибка получения статуса";
const JOB_FAILED_FALLBACK: &str = "Ошибка при парсинге";

/// Idle snapshots tolerated before `running` is first reported. Past this the
/// snapshot is taken as this job's outcome.
pub const PRE_RUNNING_POLL_LIMIT: u32 = 3;

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ArticleCountChanged(count) => {
            state.set_article_count(count);
            Vec::new()
        }
        Msg::LanguageChanged(language) => {
            state.set_language(&language);
            Vec::new()
        }
        Msg::StartClicked => start_job(&mut state),
        Msg::JobStartFinished { job_id, result } => job_started(&mut state, job_id, result),
        Msg::JobStatusPolled { job_id, result } => status_polled(&mut state, job_id, result),
        Msg::ResultStage { job_id, stage } => {
            result_stage(&mut state, job_id, stage);
            Vec::new()
        }
        Msg::ResultFetched {
            job_id,
            result,
            received_at,
        } => result_fetched(&mut state, job_id, result, received_at),
        Msg::SyncDue => {
            if state.is_busy() {
                desk_debug!("Background sync skipped: foreground job active");
                Vec::new()
            } else {
                vec![Effect::SyncStatus]
            }
        }
        Msg::SyncStatusReceived(result) => {
            sync_received(&mut state, result);
            Vec::new()
        }
        Msg::StopClicked => {
            if state.ui() == UiState::Running {
                vec![Effect::RunControl(Control::Stop)]
            } else {
                desk_debug!("Stop ignored: nothing is running");
                Vec::new()
            }
        }
        Msg::ResetClicked => vec![Effect::RunControl(Control::Reset)],
        Msg::TestClicked => {
            let ui = neutral_ui(&state);
            state.set_status(ui, TESTING_TEXT);
            vec![Effect::RunControl(Control::Test)]
        }
        Msg::ClearFilesClicked => vec![Effect::RunControl(Control::ClearFiles)],
        Msg::ControlFinished { control, result } => control_finished(&mut state, control, result),
    };

    (state, effects)
}

fn start_job(state: &mut AppState) -> Vec<Effect> {
    if state.is_busy() || state.ui() == UiState::Running {
        desk_warn!("Start ignored: a job is already running");
        return Vec::new();
    }
    let job_id = state.begin_job(LAUNCHING_TEXT);
    let config = state.form().clone();
    desk_info!(
        "Launching job {} (articles={}, language={})",
        job_id,
        config.article_count,
        config.target_language
    );
    vec![Effect::StartJob { job_id, config }]
}

fn job_started(state: &mut AppState, job_id: JobId, result: Result<(), Failure>) -> Vec<Effect> {
    if state.phase_of(job_id) != Some(Phase::Launching) {
        desk_debug!("Ignoring start result for inactive job {}", job_id);
        return Vec::new();
    }
    match result {
        Ok(()) => {
            if let Some(fg) = state.foreground_mut(job_id) {
                fg.phase = Phase::Polling {
                    seen_running: false,
                    idle_polls: 0,
                };
            }
            state.set_status(UiState::Running, LAUNCHED_TEXT);
            state.touch();
            vec![Effect::BeginPolling { job_id }]
        }
        Err(failure) => fail_job(state, job_id, describe_failure(&failure, START_FALLBACK)),
    }
}

fn status_polled(
    state: &mut AppState,
    job_id: JobId,
    result: Result<JobStatus, Failure>,
) -> Vec<Effect> {
    let Some(Phase::Polling {
        seen_running,
        idle_polls,
    }) = state.phase_of(job_id)
    else {
        desk_debug!("Ignoring status poll for job {} outside polling", job_id);
        return Vec::new();
    };
    let status = match result {
        Ok(status) => status,
        Err(failure) => {
            return fail_job(state, job_id, describe_failure(&failure, STATUS_FALLBACK));
        }
    };

    if status.running {
        if let Some(fg) = state.foreground_mut(job_id) {
            fg.phase = Phase::Polling {
                seen_running: true,
                idle_polls,
            };
            fg.progress.advance();
            fg.progress_text = status.message;
        }
        state.touch();
        return Vec::new();
    }

    let error = status.error.filter(|error| !error.is_empty());

    // A not-running snapshot taken before the backend flipped `running` may still
    // carry the previous run's result file. An error is always this run's.
    if !seen_running && error.is_none() {
        let idle_polls = idle_polls + 1;
        if idle_polls < PRE_RUNNING_POLL_LIMIT {
            desk_debug!(
                "Job {} not reported running yet ({}/{})",
                job_id,
                idle_polls,
                PRE_RUNNING_POLL_LIMIT
            );
            if let Some(fg) = state.foreground_mut(job_id) {
                fg.phase = Phase::Polling {
                    seen_running,
                    idle_polls,
                };
            }
            return Vec::new();
        }
        desk_info!("Job {} never reported running; taking idle status as final", job_id);
    }

    let fresh_result = seen_running || error.is_none();
    if let Some(file) = status
        .result_file
        .filter(|file| fresh_result && !file.is_empty())
    {
        desk_info!("Job {} finished, result file {}", job_id, file);
        if let Some(fg) = state.foreground_mut(job_id) {
            fg.progress.complete();
            fg.progress_text = PARSED_TEXT.to_string();
            fg.phase = Phase::FetchingResult {
                stage: FetchStage::Settling,
            };
        }
        state.set_status(UiState::Running, PARSED_TEXT);
        state.touch();
        return vec![
            Effect::StopPolling { job_id },
            Effect::FetchResult { job_id },
        ];
    }

    let failure = match error {
        Some(error) => Failure::backend(Some(error)),
        None => Failure::backend(None).with_code(Some(ErrorCode::ResultMissing)),
    };
    fail_job(state, job_id, describe_failure(&failure, JOB_FAILED_FALLBACK))
}

fn result_stage(state: &mut AppState, job_id: JobId, stage: FetchStage) {
    let Some(fg) = state.foreground_mut(job_id) else {
        return;
    };
    if !matches!(fg.phase, Phase::FetchingResult { .. }) {
        return;
    }
    fg.phase = Phase::FetchingResult { stage };
    if stage == FetchStage::Translating {
        state.set_status(UiState::Running, TRANSLATING_TEXT);
    }
    state.touch();
}

fn result_fetched(
    state: &mut AppState,
    job_id: JobId,
    result: Result<Article, Failure>,
    received_at: NaiveDateTime,
) -> Vec<Effect> {
    let Some(Phase::FetchingResult { stage }) = state.phase_of(job_id) else {
        desk_debug!("Ignoring result for inactive job {}", job_id);
        return Vec::new();
    };
    match result {
        Ok(article) => {
            let card = render_article(&article, received_at);
            let document = render_card_document(&card);
            desk_info!("Job {} produced article \"{}\"", job_id, card.headline);
            state.end_job();
            state.show_article(card);
            state.set_status(UiState::Idle, FETCHED_TEXT);
            vec![
                Effect::CancelJob { job_id },
                Effect::PublishArticle { document },
            ]
        }
        Err(failure) => fail_job(state, job_id, describe_failure(&failure, stage_fallback(stage))),
    }
}

fn stage_fallback(stage: FetchStage) -> &'static str {
    match stage {
        FetchStage::Settling | FetchStage::Translating | FetchStage::AwaitingTranslation => {
            "Ошибка перевода"
        }
        FetchStage::ListingFiles => "Ошибка получения списка файлов",
        FetchStage::Downloading => "Ошибка загрузки файла",
    }
}

fn fail_job(state: &mut AppState, job_id: JobId, text: String) -> Vec<Effect> {
    desk_warn!("Job {} failed: {}", job_id, text);
    state.end_job();
    state.set_status(UiState::Error, text);
    vec![Effect::CancelJob { job_id }]
}

fn sync_received(state: &mut AppState, result: Result<JobStatus, Failure>) {
    if state.is_busy() {
        desk_debug!("Discarding background status: foreground job active");
        return;
    }
    match result {
        Ok(status) => state.mirror_backend(&status),
        Err(failure) => desk_warn!("Status sync failed: {}", failure.message_or("unknown error")),
    }
}

fn control_finished(
    state: &mut AppState,
    control: Control,
    result: Result<Option<String>, Failure>,
) -> Vec<Effect> {
    match result {
        Ok(message) => {
            let text = message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| control.success_text().to_string());
            desk_info!("{:?} succeeded: {}", control, text);
            if control.ends_job() {
                let effects = state
                    .end_job()
                    .map(|job_id| vec![Effect::CancelJob { job_id }])
                    .unwrap_or_default();
                state.set_status(UiState::Idle, text);
                effects
            } else {
                let ui = neutral_ui(state);
                state.set_status(ui, text);
                Vec::new()
            }
        }
        Err(failure) => {
            let text = format!(
                "{}: {}",
                control.error_prefix(),
                failure.message_or(control.error_fallback())
            );
            desk_warn!("{:?} failed: {}", control, text);
            let ui = if state.ui() == UiState::Running {
                UiState::Running
            } else {
                UiState::Error
            };
            state.set_status(ui, text);
            Vec::new()
        }
    }
}

/// Non-error style that keeps a running job's button state intact.
fn neutral_ui(state: &AppState) -> UiState {
    if state.ui() == UiState::Running {
        UiState::Running
    } else {
        UiState::Idle
    }
}
