//! Peermatch Roster Layer
//!
//! Event rosters and attendance recording over the same directory API
//! the matching engine reads contacts from. The typical flow pairs the
//! two: discover a contact's peers with the engine, then record the
//! whole group's attendance at an event here.
//!
//! Recording is an upsert keyed on (event, contact): an existing
//! participant record is re-statused rather than duplicated. Bulk
//! recording isolates per-contact failures, so one bad contact never
//! loses the rest of the group.
//!
//! # Examples
//!
//! ```
//! use peermatch_domain::ContactId;
//! use peermatch_roster::{AttendanceRequest, EventId, MemoryRoster, Roster, StatusId};
//!
//! # async fn demo() -> Result<(), peermatch_roster::RosterError> {
//! let roster = Roster::new(MemoryRoster::new());
//! let outcome = roster
//!     .record_attendance(&AttendanceRequest {
//!         event_id: EventId::new(10),
//!         contact_id: ContactId::new(3),
//!         status_id: StatusId::new(2),
//!     })
//!     .await?;
//! assert_eq!(outcome.participant().contact_id, ContactId::new(3));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod memory;
mod rest;
mod service;
mod store;
mod types;

pub use error::RosterError;
pub use memory::MemoryRoster;
pub use rest::RestRoster;
pub use service::{BulkOutcome, Roster};
pub use store::RosterStore;
pub use types::{
    AttendanceOutcome, AttendanceRequest, Event, EventId, EventQuery, Participant, ParticipantId,
    ParticipantStatus, StatusId,
};
