#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read dataset file (path: {path}): {source}", path = path.display())]
    DatasetRead {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to deserialize dataset: {0}")]
    Deserialization(#[from] serde_path_to_error::Error<serde_json::Error>),
    #[error("internal error: {0}")]
    Internal(String),
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;
