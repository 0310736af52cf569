//! Command-line and environment configuration.
//!
//! ```bash
//! newsdesk --base-url http://192.168.1.20:5001 --count 3 --language en
//! NEWSDESK_BASE_URL=http://127.0.0.1:5001 NEWSDESK_LOG=both newsdesk
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use newsdesk_core::JobConfig;
use newsdesk_engine::{BackendError, BackendSettings, EngineSettings, ResultTimings};

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogDestination {
    /// Write to the terminal (stderr).
    Terminal,
    /// Write to ./newsdesk.log in the current directory.
    File,
    /// Write to both file and terminal.
    Both,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "newsdesk")]
#[command(about = "Terminal control panel for the news scraping and translation backend")]
#[command(version)]
pub struct Cli {
    /// Root URL of the backend control API
    #[arg(
        long = "base-url",
        default_value = "http://127.0.0.1:5001",
        env = "NEWSDESK_BASE_URL"
    )]
    pub base_url: String,

    /// Initial number of articles to collect
    #[arg(long, default_value_t = 1, env = "NEWSDESK_COUNT")]
    pub count: u32,

    /// Initial translation target language
    #[arg(long, default_value = "ru", env = "NEWSDESK_LANGUAGE")]
    pub language: String,

    /// Directory the latest news card is written to
    #[arg(long = "output-dir", default_value = "./output", env = "NEWSDESK_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    // === Timers ===
    /// Foreground status poll period in milliseconds
    #[arg(long = "poll-ms", default_value_t = 1000, env = "NEWSDESK_POLL_MS")]
    pub poll_ms: u64,

    /// Background status sync period in milliseconds
    #[arg(long = "sync-ms", default_value_t = 10000, env = "NEWSDESK_SYNC_MS")]
    pub sync_ms: u64,

    /// Wait after completion before triggering translation, in milliseconds
    #[arg(long = "settle-ms", default_value_t = 1000, env = "NEWSDESK_SETTLE_MS")]
    pub settle_ms: u64,

    /// Wait after triggering translation before listing files, in milliseconds
    #[arg(
        long = "translate-wait-ms",
        default_value_t = 2000,
        env = "NEWSDESK_TRANSLATE_WAIT_MS"
    )]
    pub translate_wait_ms: u64,

    /// Per-request timeout in milliseconds
    #[arg(
        long = "request-timeout-ms",
        default_value_t = 30000,
        env = "NEWSDESK_REQUEST_TIMEOUT_MS"
    )]
    pub request_timeout_ms: u64,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File, env = "NEWSDESK_LOG")]
    pub log: LogDestination,
}

impl Cli {
    pub fn validate(&self) -> Result<(), String> {
        if self.count == 0 {
            return Err("article count must be >= 1".to_string());
        }
        if self.language.trim().is_empty() {
            return Err("target language must not be empty".to_string());
        }
        if self.poll_ms == 0 || self.sync_ms == 0 {
            return Err("poll and sync periods must be > 0".to_string());
        }
        if self.request_timeout_ms == 0 {
            return Err("request timeout must be > 0".to_string());
        }
        Ok(())
    }

    /// Initial form values.
    pub fn form(&self) -> JobConfig {
        JobConfig {
            article_count: self.count,
            target_language: self.language.trim().to_string(),
        }
    }

    pub fn backend_settings(&self) -> Result<BackendSettings, BackendError> {
        let mut settings = BackendSettings::parse(&self.base_url)?;
        settings.request_timeout = Duration::from_millis(self.request_timeout_ms);
        Ok(settings)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            poll_interval: Duration::from_millis(self.poll_ms),
            sync_interval: Duration::from_millis(self.sync_ms),
            result: ResultTimings {
                settle_delay: Duration::from_millis(self.settle_ms),
                translate_wait: Duration::from_millis(self.translate_wait_ms),
            },
        }
    }
}
