//! Error types for the `invite-token` crate.
//!
//! Follows the same pattern as domain::error with a root Error struct and an error kind enum.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for invite-token crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Kinds of failures produced while signing or verifying invitation tokens.
///
/// Callers collapse all verification kinds into a single "invitation not valid"
/// outcome for end users, but the distinction stays available for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The signing secret cannot be used as an HMAC key (empty).
    InvalidKey,
    /// The payload could not be serialized to JSON.
    Serialization,
    /// Wrong token shape: missing separator, empty part, undecodable or unparsable body.
    MalformedToken,
    /// Well-formed token whose authentication tag does not match.
    InvalidSignature,
    /// Authenticated body that is not a JSON object, or does not match the requested claims type.
    InvalidPayload,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErrorKind::InvalidKey => write!(f, "invalid signing key"),
            ErrorKind::Serialization => write!(f, "payload serialization failed"),
            ErrorKind::MalformedToken => write!(f, "malformed token"),
            ErrorKind::InvalidSignature => write!(f, "invalid signature"),
            ErrorKind::InvalidPayload => write!(f, "invalid payload"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "Token error: {} ({})", self.error_kind, source),
            None => write!(f, "Token error: {}", self.error_kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl Error {
    /// Wraps an underlying error under the given kind.
    pub fn with_source<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Error {
            source: Some(err.into()),
            error_kind: kind,
        }
    }
}

/// Helper function to create token errors.
pub fn token_error(kind: ErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: kind,
    }
}
