use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("index absent: {0}")]
    IndexAbsent(String),

    #[error("data directory does not exist and could not be created: {0}")]
    DataDir(PathBuf),
}

impl Error {
    /// Whether this error means "no usable index exists yet", as opposed to
    /// a search that ran and found nothing.
    pub fn is_index_absent(&self) -> bool {
        matches!(self, Error::IndexAbsent(_))
    }
}
