//! Unified error type for the symbol compiler.
//!
//! Every failure is fatal to a compilation call: the pipeline either returns a
//! complete [`Symbols`](crate::Symbols) value or one of these errors. Nothing is
//! retried, since inputs are deterministic tables rather than transient services.

use thiserror::Error;

/// Unified error type for all medea operations.
#[derive(Error, Debug)]
pub enum MedeaError {
    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed values (timestamps, column names, numbers)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Inputs disagree with the scenario configuration (e.g. wrong model year)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A referenced column, row key or estimate entry is absent
    #[error("Lookup error: {0}")]
    Lookup(String),

    /// Structural consistency violations in derived symbols
    #[error("Validation error: {0}")]
    Validation(String),

    /// Errors raised by the dataframe layer
    #[error("Data error: {0}")]
    Data(#[from] polars::error::PolarsError),
}

/// Convenience type alias for Results using MedeaError.
pub type MedeaResult<T> = Result<T, MedeaError>;

impl MedeaError {
    pub fn lookup(message: impl Into<String>) -> Self {
        MedeaError::Lookup(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        MedeaError::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MedeaError::Config("year mismatch".into());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("year mismatch"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MedeaError = io_err.into();
        assert!(matches!(err, MedeaError::Io(_)));
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> MedeaResult<()> {
            Err(MedeaError::lookup("missing column 'eta_ec'"))
        }

        fn outer() -> MedeaResult<()> {
            inner()?;
            Ok(())
        }

        assert!(matches!(outer(), Err(MedeaError::Lookup(_))));
    }
}
