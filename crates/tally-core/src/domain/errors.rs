//! Error value with a walkable cause chain.

use thiserror::Error;

/// A message with an optional underlying cause.
///
/// For producers that have no richer error type of their own: wrap the
/// lower-level failure and the chain stays walkable through
/// [`std::error::Error::source`]. A report accepts any `std::error::Error`,
/// not just this one.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TallyError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TallyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Flatten an error and its `source()` chain into one string, one cause
/// per line, innermost last.
///
/// The loop is bounded by the chain length. Reports use this to turn a
/// layered failure into their user-facing message.
pub fn chain_message(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut cause = error.source();
    while let Some(err) = cause {
        message.push('\n');
        message.push_str(&err.to_string());
        cause = err.source();
    }
    message
}
