use std::time::Duration;

use newsdesk_engine::{
    Backend, BackendSettings, ControlCall, FailureKind, JobRequest, ReqwestBackend,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> ReqwestBackend {
    desk_logging::initialize_for_tests();
    ReqwestBackend::new(BackendSettings::parse(&server.uri()).unwrap()).unwrap()
}

#[tokio::test]
async fn start_parser_posts_count_and_language() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/start-parser"))
        .and(body_json(json!({ "newsCount": 3, "targetLanguage": "en" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = backend_for(&server)
        .start_parser(&JobRequest {
            news_count: 3,
            target_language: "en".into(),
        })
        .await
        .expect("start ok");
    assert_eq!(ack.message.as_deref(), Some("ok"));
}

#[tokio::test]
async fn error_status_carries_backend_text_and_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/start-parser"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Парсер уже запущен",
            "code": "browser_failure"
        })))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .start_parser(&JobRequest {
            news_count: 1,
            target_language: "ru".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.detail.as_deref(), Some("Парсер уже запущен"));
    assert_eq!(err.code.as_deref(), Some("browser_failure"));
    assert!(err.is_reported());
}

#[tokio::test]
async fn error_status_without_json_body_has_no_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/reset-status"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .control(ControlCall::Reset)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
    assert_eq!(err.detail, None);
}

#[tokio::test]
async fn success_status_with_error_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/test-parser"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": "greenlet not installed" })),
        )
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .control(ControlCall::Test)
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.detail.as_deref(), Some("greenlet not installed"));
}

#[tokio::test]
async fn control_tolerates_plain_text_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/clear-files"))
        .respond_with(ResponseTemplate::new(200).set_body_string("done"))
        .mount(&server)
        .await;

    let ack = backend_for(&server)
        .control(ControlCall::ClearFiles)
        .await
        .expect("plain body accepted");
    assert_eq!(ack.message, None);
}

#[tokio::test]
async fn status_parses_running_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "running": true,
            "message": "Сбор новостей...",
            "progress": 40
        })))
        .mount(&server)
        .await;

    let snapshot = backend_for(&server).status().await.unwrap();
    assert!(snapshot.running);
    assert_eq!(snapshot.message, "Сбор новостей...");
    assert_eq!(snapshot.progress, Some(40));
    assert_eq!(snapshot.result_file, None);
}

#[tokio::test]
async fn status_with_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = backend_for(&server).status().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn download_encodes_file_name_and_reads_translated_aliases() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/download/news%20file.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [{ "title": "Hello", "title_ru": "Привет", "content_ru": "Текст" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let batch = backend_for(&server)
        .download("news file.json")
        .await
        .unwrap();
    let article = &batch.articles[0];
    assert_eq!(article.title.as_deref(), Some("Hello"));
    assert_eq!(article.title_translated.as_deref(), Some("Привет"));
    assert_eq!(article.content_translated.as_deref(), Some("Текст"));
}

#[tokio::test]
async fn base_url_with_path_prefix_is_respected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/panel/api/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "files": [{ "name": "a.json", "size": 10 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = BackendSettings::parse(&format!("{}/panel", server.uri())).unwrap();
    let files = ReqwestBackend::new(settings)
        .unwrap()
        .list_files()
        .await
        .unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "a.json");
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/files"))
        .respond_with(ResponseTemplate::new(200).set_body_string("x".repeat(64)))
        .mount(&server)
        .await;

    let mut settings = BackendSettings::parse(&server.uri()).unwrap();
    settings.max_body_bytes = 16;
    let err = ReqwestBackend::new(settings)
        .unwrap()
        .list_files()
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::TooLarge { max_bytes: 16 });
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "running": false })),
        )
        .mount(&server)
        .await;

    let mut settings = BackendSettings::parse(&server.uri()).unwrap();
    settings.request_timeout = Duration::from_millis(50);
    let err = ReqwestBackend::new(settings)
        .unwrap()
        .status()
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[test]
fn invalid_base_url_is_reported() {
    let err = BackendSettings::parse("not a url").unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
