//! Runtime configuration assembled from the command line.

use std::path::PathBuf;

use crate::data::{FileSource, FileStore, HttpSource, LoadError, QuestionStore};

pub const DEFAULT_SOURCE: &str = "data/quiz.json";
pub const DEFAULT_STORAGE_PATH: &str = "quiz-storage.json";
pub const DEFAULT_LOG_FILE: &str = "aviation-quiz.log";

/// Where the question bank is fetched from when storage is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Url(String),
    File(PathBuf),
}

impl SourceLocation {
    /// `http://` and `https://` locations are URLs, anything else a path.
    pub fn parse(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub source: SourceLocation,
    pub storage_path: PathBuf,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceLocation::parse(DEFAULT_SOURCE),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Build the question store this configuration describes.
    pub fn question_store(&self) -> Result<QuestionStore, LoadError> {
        let storage = FileStore::new(&self.storage_path);
        let store = match &self.source {
            SourceLocation::Url(url) => QuestionStore::new(storage, HttpSource::new(url.as_str())?),
            SourceLocation::File(path) => QuestionStore::new(storage, FileSource::new(path)),
        };
        Ok(store)
    }
}
