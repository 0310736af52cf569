#![allow(dead_code)]

use std::sync::Once;

use chrono::{NaiveDate, NaiveDateTime};
use newsdesk_core::{update, AppState, Effect, JobId, JobStatus, Msg};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(desk_logging::initialize_for_tests);
}

pub fn received_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 17)
        .and_then(|date| date.and_hms_opt(14, 5, 0))
        .expect("valid timestamp")
}

pub fn running(message: &str) -> JobStatus {
    JobStatus {
        running: true,
        message: message.to_string(),
        result_file: None,
        error: None,
    }
}

pub fn finished(result_file: &str) -> JobStatus {
    JobStatus {
        running: false,
        message: "Готово".to_string(),
        result_file: Some(result_file.to_string()),
        error: None,
    }
}

/// Start clicked and accepted by the backend; returns the polling state.
pub fn launched() -> (AppState, JobId) {
    let (state, effects) = update(AppState::new(), Msg::StartClicked);
    let job_id = match effects.as_slice() {
        [Effect::StartJob { job_id, .. }] => *job_id,
        other => panic!("unexpected launch effects: {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::JobStartFinished {
            job_id,
            result: Ok(()),
        },
    );
    (state, job_id)
}

pub fn poll(state: AppState, job_id: JobId, status: JobStatus) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::JobStatusPolled {
            job_id,
            result: Ok(status),
        },
    )
}

/// A launched job whose status poll has reported completion.
pub fn completed() -> (AppState, JobId) {
    let (state, job_id) = launched();
    let (state, _) = poll(state, job_id, running("Fetching page 1"));
    let (state, _) = poll(state, job_id, finished("out.json"));
    (state, job_id)
}
