//! Error types for the CLI application.
//!
//! ## Batch Validation Errors
//!
//! `BatchValidationError<T>` collects per-item failures with context. The
//! verify command uses it to report every bad round in a log instead of
//! stopping at the first.

use std::fmt;

use blackjack_engine::errors::GameError;

use crate::config::ConfigError;

/// Custom error type for CLI operations.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input, command-line arguments or round log content
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(GameError),

    /// Async runtime failure, such as the dealer task panicking or being
    /// cancelled
    Runtime(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(e) => write!(f, "Engine error: {}", e),
            CliError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<GameError> for CliError {
    fn from(error: GameError) -> Self {
        CliError::Engine(error)
    }
}

impl From<tokio::task::JoinError> for CliError {
    fn from(error: tokio::task::JoinError) -> Self {
        CliError::Runtime(format!("dealer task failed: {}", error))
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

/// Generic error type for batch validation operations.
///
/// # Examples
///
/// ```rust
/// use blackjack_cli::BatchValidationError;
///
/// let error = BatchValidationError {
///     item_context: 5,
///     message: "Recorded outcome does not match the hands".to_string(),
/// };
/// assert_eq!(error.to_string(), "5: Recorded outcome does not match the hands");
/// ```
#[derive(Debug)]
pub struct BatchValidationError<T> {
    /// Context identifying the item that failed validation
    pub item_context: T,
    /// Descriptive error message
    pub message: String,
}

impl<T: std::fmt::Display> std::fmt::Display for BatchValidationError<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.item_context, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_validation_error_with_string() {
        let error = BatchValidationError {
            item_context: "rounds.jsonl".to_string(),
            message: "File not found".to_string(),
        };
        assert_eq!(error.to_string(), "rounds.jsonl: File not found");
    }

    #[test]
    fn engine_errors_keep_their_source() {
        use std::error::Error;
        let e = CliError::from(GameError::ShoeExhausted);
        assert!(e.to_string().contains("Shoe exhausted"));
        assert!(e.source().is_some());
    }

    #[test]
    fn failed_task_is_a_runtime_error() {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let join_err = rt
            .block_on(async { tokio::spawn(async { panic!("dealer crashed") }).await })
            .unwrap_err();

        let e = CliError::from(join_err);
        assert!(matches!(e, CliError::Runtime(_)));
        assert!(e.to_string().starts_with("Runtime error: dealer task failed"));
    }
}
