use crate::view_model::{AppViewModel, ProgressView};
use crate::{ArticleCard, FetchStage, JobConfig, JobId, JobStatus, SyntheticProgress};

pub(crate) const READY_TEXT: &str = "Готов к работе";

/// What the status area currently shows. Start is enabled exactly when this is
/// not `Running`; Stop exactly when it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Running,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Start request in flight.
    Launching,
    /// Status polling. Until `running` is seen, idle snapshots may still describe
    /// the previous run; `idle_polls` counts them.
    Polling { seen_running: bool, idle_polls: u32 },
    FetchingResult { stage: FetchStage },
}

/// The job this panel launched and is still driving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Foreground {
    pub(crate) job_id: JobId,
    pub(crate) phase: Phase,
    pub(crate) progress: SyntheticProgress,
    pub(crate) progress_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    form: JobConfig,
    ui: UiState,
    status_text: String,
    foreground: Option<Foreground>,
    next_job_id: JobId,
    article: Option<ArticleCard>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_form(JobConfig::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: JobConfig) -> Self {
        Self {
            form,
            ui: UiState::Idle,
            status_text: READY_TEXT.to_string(),
            foreground: None,
            next_job_id: 1,
            article: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let running = self.ui == UiState::Running;
        AppViewModel {
            ui: self.ui,
            status_text: self.status_text.clone(),
            start_enabled: !running,
            stop_enabled: running,
            loading: self.foreground.is_some(),
            progress: self.foreground.as_ref().map(|fg| ProgressView {
                percent: fg.progress.percent(),
                text: fg.progress_text.clone(),
            }),
            article: self.article.clone(),
            form: self.form.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// True while a foreground job launched from this panel is active.
    pub fn is_busy(&self) -> bool {
        self.foreground.is_some()
    }

    pub fn current_job(&self) -> Option<JobId> {
        self.foreground.as_ref().map(|fg| fg.job_id)
    }

    pub fn form(&self) -> &JobConfig {
        &self.form
    }

    pub fn ui(&self) -> UiState {
        self.ui
    }

    pub(crate) fn set_article_count(&mut self, count: u32) {
        let count = count.max(1);
        if self.form.article_count != count {
            self.form.article_count = count;
            self.dirty = true;
        }
    }

    pub(crate) fn set_language(&mut self, language: &str) {
        let language = language.trim();
        if !language.is_empty() && self.form.target_language != language {
            self.form.target_language = language.to_string();
            self.dirty = true;
        }
    }

    pub(crate) fn set_status(&mut self, ui: UiState, text: impl Into<String>) {
        let text = text.into();
        if self.ui != ui || self.status_text != text {
            self.ui = ui;
            self.status_text = text;
            self.dirty = true;
        }
    }

    /// Enters the foreground job: Running, progress shown, previous article hidden.
    pub(crate) fn begin_job(&mut self, status_text: &str) -> JobId {
        let job_id = self.next_job_id;
        self.next_job_id += 1;
        self.foreground = Some(Foreground {
            job_id,
            phase: Phase::Launching,
            progress: SyntheticProgress::new(),
            progress_text: String::new(),
        });
        self.article = None;
        self.set_status(UiState::Running, status_text);
        self.dirty = true;
        job_id
    }

    /// The foreground job when it matches `job_id`.
    pub(crate) fn foreground_mut(&mut self, job_id: JobId) -> Option<&mut Foreground> {
        self.foreground.as_mut().filter(|fg| fg.job_id == job_id)
    }

    pub(crate) fn phase_of(&self, job_id: JobId) -> Option<Phase> {
        self.foreground
            .as_ref()
            .filter(|fg| fg.job_id == job_id)
            .map(|fg| fg.phase)
    }

    pub(crate) fn touch(&mut self) {
        self.dirty = true;
    }

    /// Leaves the foreground job, if any, returning its id.
    pub(crate) fn end_job(&mut self) -> Option<JobId> {
        let ended = self.foreground.take().map(|fg| fg.job_id);
        if ended.is_some() {
            self.dirty = true;
        }
        ended
    }

    pub(crate) fn show_article(&mut self, card: ArticleCard) {
        self.article = Some(card);
        self.dirty = true;
    }

    /// Mirrors a background status snapshot into the status area.
    pub(crate) fn mirror_backend(&mut self, status: &JobStatus) {
        if status.running {
            self.set_status(UiState::Running, status.message.clone());
        } else {
            self.set_status(UiState::Idle, READY_TEXT);
        }
    }
}
