use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage connection error: {0}")]
    StorageConnection(sqlx::Error),

    #[error("Storage query error: {0}")]
    StorageQuery(sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // Pool and transport failures mean the backend is unreachable
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_) => Self::StorageConnection(err),
            // Everything else is a rejected query
            _ => Self::StorageQuery(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_classify_as_connection() {
        let err = Error::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, Error::StorageConnection(_)));

        let err = Error::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, Error::StorageConnection(_)));
    }

    #[test]
    fn row_errors_classify_as_query() {
        let err = Error::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, Error::StorageQuery(_)));
    }

    #[test]
    fn error_display_names_the_failure() {
        let err = Error::Config("missing allowed origins".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: missing allowed origins"
        );
    }
}
