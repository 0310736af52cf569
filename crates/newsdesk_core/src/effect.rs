use crate::{JobConfig, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the job configuration to the backend.
    StartJob { job_id: JobId, config: JobConfig },
    /// Start the foreground status poll for the job.
    BeginPolling { job_id: JobId },
    /// Stop the foreground status poll, keeping the job's task alive.
    StopPolling { job_id: JobId },
    /// Run translation and fetch the newest article.
    FetchResult { job_id: JobId },
    /// Cancel everything still running for the job.
    CancelJob { job_id: JobId },
    /// Background status request.
    SyncStatus,
    /// Single POST to an auxiliary endpoint.
    RunControl(Control),
    /// Write the rendered news card page.
    PublishArticle { document: String },
}

/// Auxiliary controls, each backed by one POST endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Stop,
    Reset,
    Test,
    ClearFiles,
}

impl Control {
    /// Status text when the backend sends no message.
    pub fn success_text(self) -> &'static str {
        match self {
            Control::Stop => "Парсер остановлен",
            Control::Reset => "Статус сброшен",
            Control::Test => "Тест парсера завершен успешно!",
            Control::ClearFiles => "Файлы очищены",
        }
    }

    pub fn error_prefix(self) -> &'static str {
        match self {
            Control::Stop => "Ошибка остановки",
            Control::Reset => "Ошибка сброса",
            Control::Test => "Ошибка теста",
            Control::ClearFiles => "Ошибка очистки",
        }
    }

    pub fn error_fallback(self) -> &'static str {
        match self {
            Control::Stop => "Ошибка остановки парсера",
            Control::Reset => "Ошибка сброса статуса",
            Control::Test => "Ошибка тестирования парсера",
            Control::ClearFiles => "Ошибка очистки файлов",
        }
    }

    /// Whether success returns the panel to Idle and ends any foreground job.
    pub fn ends_job(self) -> bool {
        matches!(self, Control::Stop | Control::Reset)
    }
}
