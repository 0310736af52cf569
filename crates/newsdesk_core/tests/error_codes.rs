use newsdesk_core::{describe_failure, ErrorCode, Failure};
use pretty_assertions::assert_eq;

#[test]
fn wire_codes_round_trip_through_the_table() {
    for code in [
        ErrorCode::MissingDependency,
        ErrorCode::BrowserFailure,
        ErrorCode::AccessBlocked,
        ErrorCode::Timeout,
        ErrorCode::ResultMissing,
    ] {
        assert_eq!(ErrorCode::from_wire(code.as_wire()), Some(code));
    }
    assert_eq!(ErrorCode::from_wire("something_new"), None);
}

#[test]
fn explicit_code_wins_over_message() {
    let failure = Failure::backend(Some("playwright crashed".to_string()))
        .with_code(Some(ErrorCode::AccessBlocked));

    assert_eq!(
        describe_failure(&failure, "fallback"),
        ErrorCode::AccessBlocked.friendly_text()
    );
}

#[test]
fn legacy_messages_are_classified() {
    assert_eq!(
        ErrorCode::infer("Playwright browser closed"),
        Some(ErrorCode::BrowserFailure)
    );
    assert_eq!(
        ErrorCode::infer("Таймаут теста парсера"),
        Some(ErrorCode::Timeout)
    );
    assert_eq!(
        ErrorCode::infer("Файл не найден после завершения парсера"),
        Some(ErrorCode::ResultMissing)
    );
    assert_eq!(ErrorCode::infer("Файлы не найдены"), None);
}

#[test]
fn unmatched_messages_pass_through() {
    let failure = Failure::backend(Some("Парсер уже запущен".to_string()));
    assert_eq!(describe_failure(&failure, "fallback"), "Парсер уже запущен");
}

#[test]
fn empty_message_uses_fallback() {
    let failure = Failure::backend(Some(String::new()));
    assert_eq!(describe_failure(&failure, "Ошибка перевода"), "Ошибка перевода");
}
