//! Common error types for portal services

use thiserror::Error;

/// Common result type for portal operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across portal services
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "portal.db").into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "IO error: portal.db");
    }

    #[test]
    fn test_config_error_display() {
        let err = Error::Config("port out of range".to_string());
        assert_eq!(err.to_string(), "Configuration error: port out of range");
    }
}
