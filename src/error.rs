//! Error types for shopdash.

use thiserror::Error;

/// Errors returned by shopdash operations.
#[derive(Error, Debug)]
pub enum ShopError {
    /// Configuration could not be loaded, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A job card, customer, vehicle or technician does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User input or serialized data could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A tracking precondition was not met (session already active, none
    /// active, or no job selected).
    #[error("Session error: {0}")]
    Session(String),

    /// Demo login rejected.
    #[error("Login failed: {0}")]
    Unauthorized(String),

    /// File-system failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// Terminal setup, draw, or event failure.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl From<std::io::Error> for ShopError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ShopError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(format!("JSON serialization failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ShopError::Session("a session is already active".to_string());
        assert_eq!(err.to_string(), "Session error: a session is already active");

        let err = ShopError::NotFound("job JC-9999".to_string());
        assert_eq!(err.to_string(), "Not found: job JC-9999");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ShopError = io.into();
        assert!(matches!(err, ShopError::Io(msg) if msg.contains("missing")));
    }
}
