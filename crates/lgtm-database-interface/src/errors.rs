use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Import/Export JSON error: {source}")]
    ExchangeJsonError { source: serde_json::Error },

    #[error("Unknown repository path '{0}'")]
    UnknownRepository(String),

    #[error("Unknown user ID '{0}'")]
    UnknownUserId(u64),

    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

pub type Result<T, E = DatabaseError> = core::result::Result<T, E>;
