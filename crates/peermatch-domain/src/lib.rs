//! Peermatch Domain Layer
//!
//! This crate contains the domain model shared by every other layer of
//! peermatch. It has ZERO external dependencies and defines the value
//! objects the directory boundary and the matching engine exchange.
//!
//! ## Key Concepts
//!
//! - **Contact**: an immutable snapshot of a directory record, with subtypes
//! - **Relationship**: an edge between two contacts; undirected in membership,
//!   directional in semantics (the A and B endpoints carry different labels)
//! - **Pattern**: a derived `(relationship type, target subtype, role)` tuple
//!   describing a kind of relationship the anchor contact holds
//! - **MatchedRelationship**: per-candidate evidence that a pattern is satisfied
//! - **PeerResult**: a candidate contact plus the evidence that admitted it
//!
//! ## Architecture
//!
//! All entities here are read-only projections created fresh per request.
//! Nothing in this crate performs I/O; trait boundaries toward the remote
//! directory live in `peermatch-directory`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contact;
pub mod page;
pub mod pattern;
pub mod relationship;

// Re-exports for convenience
pub use contact::{Contact, ContactId, ContactRef};
pub use page::{PageInfo, PageRequest};
pub use pattern::{MatchedRelationship, Pattern, PeerResult};
pub use relationship::{
    Relationship, RelationshipId, RelationshipType, RelationshipTypeId, Role,
};
