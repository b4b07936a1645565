//! Error types for the matching engine

use peermatch_directory::DirectoryError;
use thiserror::Error;

/// Errors surfaced to `find_peers` callers.
///
/// Only "cannot even start" failures reach the caller; per-unit lookup
/// failures during extraction and matching are absorbed where they
/// happen. A fatal error means no partial results were produced.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A top-level directory operation failed; the entity and operation
    /// identify which one for diagnosis
    #[error("directory failure in {entity}.{operation}: {source}")]
    Directory {
        /// Entity the failing operation targeted
        entity: &'static str,
        /// The failing operation
        operation: &'static str,
        /// The underlying directory error
        #[source]
        source: DirectoryError,
    },

    /// Malformed caller input, rejected before any remote call
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl EngineError {
    pub(crate) fn directory(
        entity: &'static str,
        operation: &'static str,
        source: DirectoryError,
    ) -> Self {
        Self::Directory {
            entity,
            operation,
            source,
        }
    }
}
