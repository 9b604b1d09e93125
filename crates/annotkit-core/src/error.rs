//! Error handling for AnnotKit
//!
//! Provides error types for every layer of the annotation viewer:
//! - Passkey errors (input validation, surfaced to the user)
//! - Store errors (persistence I/O, logged and swallowed by the adapter)
//! - Color errors (palette / custom color input)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Passkey validation error
///
/// Raised synchronously before any store call is attempted. Always
/// recoverable by correcting the input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PasskeyError {
    /// Passkey has the wrong number of characters
    #[error("Passkey must be exactly {expected} characters, got {actual}")]
    InvalidLength {
        /// The required length.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },

    /// Passkey contains a character outside `[a-zA-Z0-9]`
    #[error("Passkey may only contain letters and digits, found {found:?} at position {position}")]
    InvalidCharacter {
        /// The offending character.
        found: char,
        /// Zero-based character position.
        position: usize,
    },
}

/// Annotation store error
///
/// Represents failures while reading or writing an annotation document.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be reached
    #[error("Store unavailable: {reason}")]
    Unavailable {
        /// Why the store could not be reached.
        reason: String,
    },

    /// The stored document could not be decoded
    #[error("Corrupted annotation document for passkey {passkey}: {reason}")]
    Corrupted {
        /// The passkey whose document failed to decode.
        passkey: String,
        /// The decoder message.
        reason: String,
    },

    /// I/O error while accessing the store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Color parsing error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Color string is not `#rrggbb`
    #[error("Invalid color '{value}': expected #rrggbb")]
    InvalidFormat {
        /// The rejected input.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passkey_error_display() {
        let err = PasskeyError::InvalidLength {
            expected: 12,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "Passkey must be exactly 12 characters, got 5"
        );

        let err = PasskeyError::InvalidCharacter {
            found: '-',
            position: 7,
        };
        assert_eq!(
            err.to_string(),
            "Passkey may only contain letters and digits, found '-' at position 7"
        );
    }

    #[test]
    fn test_store_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = StoreError::from(io_err);
        assert!(matches!(err, StoreError::Io(_)));
    }
}
