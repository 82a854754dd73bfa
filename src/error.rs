//! Error types for event ingestion and configuration.

use std::path::PathBuf;

use crate::OrderId;

/// Recoverable per-event errors.
///
/// Each one causes the offending event to be skipped; the book is left
/// exactly as it was before the event.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// The leading timestamp field is not an integer.
    #[error("bad timestamp '{field}'")]
    MalformedTimestamp { field: String },

    /// Wrong field count, unknown action or side, or an unparseable number.
    #[error("bad market order '{line}': {reason}")]
    MalformedEvent { line: String, reason: &'static str },

    /// A reduce referenced an id that is live on neither side.
    #[error("cannot find order {0} to reduce")]
    UnknownOrder(OrderId),
}

impl EventError {
    pub(crate) fn malformed(line: &str, reason: &'static str) -> Self {
        EventError::MalformedEvent {
            line: line.trim().to_owned(),
            reason,
        }
    }
}

/// Errors loading or validating run configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Invalid(String),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            EventError::MalformedTimestamp { field: "x1".into() }.to_string(),
            "bad timestamp 'x1'"
        );
        assert_eq!(
            EventError::malformed("  1 Q a  ", "unknown action").to_string(),
            "bad market order '1 Q a': unknown action"
        );
        assert_eq!(
            EventError::UnknownOrder(OrderId::new("zz")).to_string(),
            "cannot find order zz to reduce"
        );
        assert_eq!(
            ConfigError::Invalid("target must be > 0".into()).to_string(),
            "config error: target must be > 0"
        );
    }

    #[test]
    fn is_error() {
        let err: Box<dyn std::error::Error> = Box::new(EventError::UnknownOrder("a".into()));
        assert!(err.to_string().contains("reduce"));
    }
}
