//! Error types for atoll.
//!
//! All fallible operations in this crate validate their inputs up front and
//! fail with one of two error categories: malformed arguments or structurally
//! inconsistent mesh buffers. No operation returns a partial result on failure.

use thiserror::Error;

/// Result type alias using [`GeomError`].
pub type Result<T> = std::result::Result<T, GeomError>;

/// Errors that can occur during geometry operations.
#[derive(Error, Debug, Clone)]
pub enum GeomError {
    /// A malformed or out-of-range input value.
    #[error("invalid argument: {name} = {value} ({reason})")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// A structurally inconsistent triangulation buffer.
    #[error("invalid mesh: {details}")]
    InvalidMesh {
        /// Description of the inconsistency.
        details: String,
    },
}

impl GeomError {
    /// Create an invalid argument error.
    pub fn invalid_arg<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        GeomError::InvalidArgument {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Create an invalid mesh error.
    pub fn invalid_mesh(details: impl Into<String>) -> Self {
        GeomError::InvalidMesh {
            details: details.into(),
        }
    }
}
