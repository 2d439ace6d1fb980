mod error;
mod loader;
mod source;
mod storage;
mod store;

pub use error::{LoadError, StorageError};
pub use loader::{derive_categories, parse_questions, validate_questions};
pub use source::{FileSource, HttpSource, QuestionSource};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use store::{QuestionStore, QUESTIONS_KEY};

#[cfg(test)]
pub(crate) use loader::fixtures;
