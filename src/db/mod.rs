pub mod repository;
pub mod sqlite;

pub use repository::{persist_run, PersistSummary, RunRecord};
pub use sqlite::open_database;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("nothing to record: the submission corpus has no files")]
    EmptyCorpus,
}
