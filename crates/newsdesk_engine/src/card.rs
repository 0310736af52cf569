use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use desk_logging::desk_info;
use tempfile::NamedTempFile;
use thiserror::Error;

/// File the latest rendered article is published to.
pub const LATEST_CARD_FILENAME: &str = "latest_article.html";

#[derive(Debug, Error)]
pub enum CardWriteError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Publishes rendered article documents, replacing the previous one.
#[derive(Debug, Clone)]
pub struct CardWriter {
    dir: PathBuf,
}

impl CardWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path the document lands at after a successful [`Self::write`].
    pub fn target(&self) -> PathBuf {
        self.dir.join(LATEST_CARD_FILENAME)
    }

    /// Writes to a temp file in the same directory, then renames over the target.
    pub fn write(&self, document: &str) -> Result<PathBuf, CardWriteError> {
        ensure_dir(&self.dir)?;

        let target = self.target();
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(document.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&target).map_err(|e| CardWriteError::Io(e.error))?;

        desk_info!("Article card written to {}", target.display());
        Ok(target)
    }
}

fn ensure_dir(dir: &Path) -> Result<(), CardWriteError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| CardWriteError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(CardWriteError::OutputDir("path is not a directory".into()));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| CardWriteError::OutputDir(e.to_string()))
}
