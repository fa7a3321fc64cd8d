use std::fmt;
use thiserror::Error as ThisError;

///
/// TimelineError
///
/// Structured runtime error with a stable classification. The timeline
/// engine and family query builders only ever produce one of these three
/// variants; HTTP status mapping (including the 302 redirect case, which
/// never reaches this type) belongs entirely to the route handler layer.
///

#[derive(Debug, ThisError)]
pub enum TimelineError {
    /// A path segment, anchor, or dispatch name failed validation: malformed
    /// hex, wrong byte length, unknown sentinel, or an anchor that matched no
    /// entry for the requested family. Surfaced as `409 Conflict`.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// An identifier anchor was syntactically valid but no record exists for
    /// it, or a balance family's well-known mosaic alias is unresolved.
    /// Surfaced as `404 Not Found`.
    #[error("not found")]
    NotFound,

    /// The store collaborator failed, or returned data that violates an
    /// invariant the engine depends on (e.g. a malformed row). Surfaced as
    /// `500 Internal Server Error` by the collaborator layer; the engine
    /// never retries.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl TimelineError {
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidArgument { .. } => ErrorClass::InvalidArgument,
            Self::NotFound => ErrorClass::NotFound,
            Self::Internal { .. } => ErrorClass::Internal,
        }
    }
}

///
/// ErrorClass
///
/// Closed taxonomy mirrored by the route handler's terminal HTTP mapping.
/// Not meant to grow without a matching change to that mapping.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvalidArgument,
    NotFound,
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::Internal => "internal",
        };
        f.write_str(s)
    }
}
