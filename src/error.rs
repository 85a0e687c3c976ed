//! Error types.

use thiserror::Error;

/// A failure raised by a [`Handler`](crate::Handler) that could not produce a response.
///
/// The router catches this at the dispatch boundary and answers with
/// `500 Internal Server Error`, using the message as the body text.
/// ```rust
/// use pathrouter::HandlerError;
///
/// let err: HandlerError = "database unavailable".into();
/// assert_eq!(err.to_string(), "database unavailable");
///
/// let err = "x".parse::<u32>().map_err(HandlerError::from_error).unwrap_err();
/// assert_eq!(err.message(), "invalid digit found in string");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Wraps any error, keeping only its display text.
    pub fn from_error(err: impl std::error::Error) -> Self {
        Self::new(err.to_string())
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Errors raised while registering a route.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The matcher built from the template was rejected by the regex engine. Templates
    /// are always escaped, so in practice this only happens when the compiled matcher
    /// exceeds the engine's size limit.
    #[error("failed to compile route template `{template}`: {source}")]
    Compile {
        template: String,
        #[source]
        source: regex::Error,
    },
}
