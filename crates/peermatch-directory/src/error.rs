//! Error types for the directory boundary

use thiserror::Error;

/// Errors that can occur talking to the remote directory.
///
/// The engine's propagation policy is written against this taxonomy:
/// `Unreachable` at the start of a request is fatal; everything else is
/// recoverable per unit and absorbed by the caller that hit it.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// The directory cannot be reached or initialized at all
    #[error("directory unreachable: {0}")]
    Unreachable(String),

    /// The directory answered with an error for one operation
    #[error("{entity}.{operation} failed: {message}")]
    Api {
        /// Entity the operation targeted, e.g. "Contact"
        entity: String,
        /// Operation name, e.g. "get"
        operation: String,
        /// Directory-supplied error detail
        message: String,
    },

    /// A single record lookup came back empty where one was required
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. "Contact"
        entity: String,
        /// The id that failed to resolve
        id: u64,
    },

    /// The directory answered, but the payload did not decode
    #[error("failed to decode directory response: {0}")]
    Decode(String),
}

impl DirectoryError {
    /// Convenience constructor for `Api` errors.
    pub fn api(
        entity: impl Into<String>,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Api {
            entity: entity.into(),
            operation: operation.into(),
            message: message.into(),
        }
    }
}
