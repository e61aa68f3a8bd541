use thiserror::Error;

/// Failures raised by document stores and repositories.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("container '{0}' does not exist")]
    ContainerNotFound(String),

    #[error("entity with id '{id}' already exists in container '{container}'")]
    Conflict { container: String, id: String },

    #[error("document has no string partition key '{0}'")]
    MissingPartitionKey(String),

    #[error("document serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type DbResult<T> = Result<T, DbError>;
