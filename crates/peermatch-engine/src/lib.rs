//! Peermatch Engine
//!
//! The peer-contact relationship-pattern matching engine. Given an
//! anchor contact and a set of relationship-type/contact-subtype
//! filters, the engine discovers the anchor's own relationship patterns,
//! scans a candidate population for contacts exhibiting the same
//! patterns, and returns a paginated, de-duplicated result annotated
//! with the relationships that justified each match.
//!
//! # Architecture
//!
//! ```text
//! FindPeersRequest
//!     → pattern extraction (anchor relationships + counterpart subtypes)
//!     → candidate scan (paged, sort_name order, anchor excluded)
//!     → per-candidate matching (bounded worker pool)
//!     → inclusion policy (any-of / all-of)
//!     → result assembly (peers + sibling pagination metadata)
//! ```
//!
//! The engine is stateless request→response; nothing is cached between
//! calls. Pattern extraction always completes before any candidate is
//! scanned, because an empty pattern set must short-circuit to an empty
//! result without touching the candidate directory at all.
//!
//! # Example
//!
//! ```no_run
//! use peermatch_directory::RestDirectory;
//! use peermatch_engine::{EngineConfig, FindPeersRequest, PeerFinder};
//! use peermatch_domain::{ContactId, RelationshipTypeId};
//!
//! # async fn example(directory: RestDirectory) -> Result<(), Box<dyn std::error::Error>> {
//! let finder = PeerFinder::with_config(directory, EngineConfig::default())?;
//!
//! let request = FindPeersRequest {
//!     relationship_type_ids: vec![RelationshipTypeId::new(5)],
//!     target_subtypes: vec!["Employer".to_string()],
//!     ..FindPeersRequest::new(ContactId::new(42))
//! };
//!
//! let response = finder.find_peers(request).await?;
//! println!("{} peers", response.peers.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod assemble;
mod config;
mod error;
mod finder;
mod matching;
mod patterns;
mod policy;
mod remote;
mod scan;
mod types;

pub use config::EngineConfig;
pub use error::EngineError;
pub use finder::PeerFinder;
pub use patterns::PatternSet;
pub use types::{FindPeersRequest, FindPeersResponse};
