//! Peermatch Directory Layer
//!
//! The boundary between the matching engine and the remote contact
//! directory. This crate defines the `ContactDirectory` trait the engine
//! consumes, the query/filter types whose shape the engine dictates, and
//! the error taxonomy the engine's failure-isolation rules are written
//! against.
//!
//! # Implementations
//!
//! - `RestDirectory`: JSON API v4 style HTTP client for a live directory
//! - `MemoryDirectory`: deterministic in-memory directory for tests, with
//!   failure injection and call counters
//!
//! # Examples
//!
//! ```
//! use peermatch_directory::MemoryDirectory;
//! use peermatch_domain::{Contact, ContactId};
//!
//! let directory = MemoryDirectory::new().with_contact(Contact {
//!     id: ContactId::new(1),
//!     display_name: "Ada Lovelace".to_string(),
//!     sort_name: "Lovelace, Ada".to_string(),
//!     email: None,
//!     contact_type: "Individual".to_string(),
//!     subtypes: vec![],
//! });
//! assert_eq!(directory.list_calls(), 0);
//! ```

#![warn(missing_docs)]

mod directory;
mod error;
mod memory;
mod query;
mod rest;

pub use directory::ContactDirectory;
pub use error::DirectoryError;
pub use memory::MemoryDirectory;
pub use query::{ContactQuery, Endpoint, RelationshipFilter};
pub use rest::{Api4Client, ApiPage, RestDirectory};
