//! Error taxonomy for the codec engine.
//!
//! Kept deliberately small and flat (no `thiserror`): a plain enum with a hand-written
//! `Display`, mirroring how decode failures were reported in the format this crate grew out of.

use std::fmt;

/// Everything that can go wrong building or running a codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input slice cannot be interpreted under the expected codec: wrong length for a
    /// fixed-size type, a missing string terminator, a missing variant separator, framing
    /// offsets inconsistent with the slice length, and so on.
    MalformedInput { message: String },
    /// A signature string could not be parsed: unknown type code, unterminated group,
    /// dict-entry arity other than two, trailing characters after a complete signature.
    SignatureParseError { message: String, position: usize },
    /// The caller assembled a codec incorrectly (e.g. predicate branches that disagree on
    /// alignment or fixed size).
    UsageError { message: String },
    /// The input slice is shorter than a fixed-size codec demands.
    BufferUnderflow { expected: usize, got: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedInput { message } => write!(f, "malformed input: {message}"),
            Error::SignatureParseError { message, position } => {
                write!(f, "signature parse error at byte {position}: {message}")
            }
            Error::UsageError { message } => write!(f, "usage error: {message}"),
            Error::BufferUnderflow { expected, got } => write!(
                f,
                "buffer underflow: expected at least {expected} bytes, got {got}"
            ),
        }
    }
}

impl std::error::Error for Error {}

pub(crate) fn malformed(message: impl Into<String>) -> Error {
    Error::MalformedInput {
        message: message.into(),
    }
}

pub(crate) fn underflow(expected: usize, got: usize) -> Error {
    Error::BufferUnderflow { expected, got }
}
