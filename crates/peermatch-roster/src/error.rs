//! Error types for the roster layer

use peermatch_directory::DirectoryError;
use thiserror::Error;

/// Errors from roster operations.
#[derive(Debug, Error)]
pub enum RosterError {
    /// A store operation failed, tagged with the entity and operation
    /// that failed.
    #[error("{entity} {operation} failed: {source}")]
    Store {
        /// Remote entity involved
        entity: &'static str,
        /// Operation that failed
        operation: &'static str,
        /// Underlying store failure
        #[source]
        source: DirectoryError,
    },

    /// The request was malformed and no store call was made.
    #[error("invalid attendance request: {0}")]
    InvalidRequest(String),
}

impl RosterError {
    pub(crate) fn store(
        entity: &'static str,
        operation: &'static str,
        source: DirectoryError,
    ) -> Self {
        Self::Store {
            entity,
            operation,
            source,
        }
    }
}
