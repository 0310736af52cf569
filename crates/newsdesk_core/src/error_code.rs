use crate::{Failure, FailureKind};

/// Known backend failure classes that get a friendlier status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    MissingDependency,
    BrowserFailure,
    AccessBlocked,
    Timeout,
    ResultMissing,
}

const ALL_CODES: [ErrorCode; 5] = [
    ErrorCode::MissingDependency,
    ErrorCode::BrowserFailure,
    ErrorCode::AccessBlocked,
    ErrorCode::Timeout,
    ErrorCode::ResultMissing,
];

/// Message fragments emitted by backends that do not send a `code` field.
/// Checked in order against the lowercased message.
const LEGACY_FRAGMENTS: &[(&str, ErrorCode)] = &[
    ("greenlet", ErrorCode::MissingDependency),
    ("playwright", ErrorCode::BrowserFailure),
    ("cloudflare", ErrorCode::AccessBlocked),
    ("timeout", ErrorCode::Timeout),
    ("таймаут", ErrorCode::Timeout),
    ("файл не найден", ErrorCode::ResultMissing),
];

impl ErrorCode {
    /// Parses the backend's `code` field. Unknown codes yield `None`.
    pub fn from_wire(code: &str) -> Option<Self> {
        let code = code.trim();
        ALL_CODES
            .into_iter()
            .find(|known| known.as_wire().eq_ignore_ascii_case(code))
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            ErrorCode::MissingDependency => "missing_dependency",
            ErrorCode::BrowserFailure => "browser_failure",
            ErrorCode::AccessBlocked => "access_blocked",
            ErrorCode::Timeout => "timeout",
            ErrorCode::ResultMissing => "result_missing",
        }
    }

    pub fn friendly_text(self) -> &'static str {
        match self {
            ErrorCode::MissingDependency => {
                "Ошибка: Модуль greenlet не найден. Парсер не может запуститься."
            }
            ErrorCode::BrowserFailure => "Ошибка: Проблема с браузером Playwright.",
            ErrorCode::AccessBlocked => "Ошибка: Сайт заблокировал доступ. Попробуйте позже.",
            ErrorCode::Timeout => {
                "Ошибка: Превышено время ожидания. Парсер завис. Попробуйте еще раз."
            }
            ErrorCode::ResultMissing => {
                "Ошибка: Файл с результатами не создан. Попробуйте еще раз."
            }
        }
    }

    /// Classifies a message from a backend that predates error codes.
    pub fn infer(message: &str) -> Option<Self> {
        let lowered = message.to_lowercase();
        LEGACY_FRAGMENTS
            .iter()
            .find(|(fragment, _)| lowered.contains(fragment))
            .map(|(_, code)| *code)
    }
}

/// Human-readable status text for a foreground failure.
///
/// `fallback` is used when the backend gave no message. Classified failures
/// get the table text; everything else passes through verbatim.
pub fn describe_failure(failure: &Failure, fallback: &str) -> String {
    match failure.kind {
        FailureKind::NoFiles => "Файлы не найдены".to_string(),
        FailureKind::NoArticles => "Новости не найдены".to_string(),
        FailureKind::Backend | FailureKind::Transport => {
            let raw = failure.message_or(fallback);
            match failure.code.or_else(|| ErrorCode::infer(raw)) {
                Some(code) => code.friendly_text().to_string(),
                None => raw.to_string(),
            }
        }
    }
}
