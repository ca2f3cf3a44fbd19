use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AcquireError {
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Query error: {0}")]
    Query(#[source] sqlx::Error),

    #[error("Failed to read cache file {}: {source}", .path.display())]
    CacheRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write cache file {}: {source}", .path.display())]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl From<figment::Error> for AcquireError {
    fn from(e: figment::Error) -> Self {
        AcquireError::Config(Box::new(e))
    }
}
