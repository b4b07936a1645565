//! Roster entities: events, statuses, participants

use peermatch_domain::ContactId;
use std::fmt;

/// Unique event identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(u64);

impl EventId {
    /// Wrap a raw event id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique participant-record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticipantId(u64);

impl ParticipantId {
    /// Wrap a raw participant id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Participant-status identifier (e.g. Registered, Attended)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StatusId(u64);

impl StatusId {
    /// Wrap a raw status id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw id value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StatusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An event contacts can attend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Unique identifier
    pub id: EventId,

    /// Event title
    pub title: String,

    /// Start, ISO 8601 as the store reports it
    pub start_date: Option<String>,

    /// End, same convention
    pub end_date: Option<String>,

    /// Whether the event is active
    pub is_active: bool,
}

/// One entry of the participant-status vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantStatus {
    /// Unique identifier
    pub id: StatusId,

    /// Machine name (e.g. "Attended")
    pub name: String,

    /// Display label
    pub label: String,

    /// Whether the status counts toward event totals
    pub is_counted: bool,
}

/// A contact's participation record for one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Unique record identifier
    pub id: ParticipantId,

    /// The event attended
    pub event_id: EventId,

    /// The attending contact
    pub contact_id: ContactId,

    /// Current status
    pub status_id: StatusId,

    /// Registration timestamp, when the store reports one
    pub register_date: Option<String>,
}

/// One attendance to record: this contact holds this status for this
/// event. Recording is an upsert keyed on (event, contact).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceRequest {
    /// The event attended
    pub event_id: EventId,

    /// The attending contact
    pub contact_id: ContactId,

    /// Status to record
    pub status_id: StatusId,
}

/// How an attendance request was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceOutcome {
    /// No record existed; one was created
    Created(Participant),

    /// A record existed with a different status; it was updated
    Updated(Participant),

    /// A record with this status already existed; nothing was written
    Unchanged(Participant),
}

impl AttendanceOutcome {
    /// The participant record regardless of how it was reached.
    pub fn participant(&self) -> &Participant {
        match self {
            Self::Created(p) | Self::Updated(p) | Self::Unchanged(p) => p,
        }
    }
}

/// Filter for event listing.
///
/// Date bounds compare against the event's start date, ISO 8601
/// lexicographic, matching how the store sorts.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Only active events
    pub active_only: bool,

    /// Only events starting on or after this date
    pub starts_after: Option<String>,

    /// Only events starting on or before this date
    pub starts_before: Option<String>,

    /// Maximum events returned; 0 means no cap
    pub limit: u64,
}

impl EventQuery {
    /// Whether an event's start date falls inside the window. Events
    /// without a start date pass an unbounded window only.
    pub fn in_window(&self, start_date: Option<&str>) -> bool {
        if self.starts_after.is_none() && self.starts_before.is_none() {
            return true;
        }
        let Some(start) = start_date else {
            return false;
        };
        if let Some(after) = &self.starts_after {
            if start < after.as_str() {
                return false;
            }
        }
        if let Some(before) = &self.starts_before {
            if start > before.as_str() {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_window() {
        let window = EventQuery {
            starts_after: Some("2026-01-01".to_string()),
            starts_before: Some("2026-06-30".to_string()),
            ..EventQuery::default()
        };
        assert!(window.in_window(Some("2026-03-05")));
        assert!(!window.in_window(Some("2025-12-31")));
        assert!(!window.in_window(Some("2026-07-01")));
        assert!(!window.in_window(None));

        // No bounds: undated events pass too.
        assert!(EventQuery::default().in_window(None));
    }

    #[test]
    fn test_outcome_exposes_participant() {
        let participant = Participant {
            id: ParticipantId::new(1),
            event_id: EventId::new(2),
            contact_id: ContactId::new(3),
            status_id: StatusId::new(4),
            register_date: None,
        };
        let outcome = AttendanceOutcome::Updated(participant.clone());
        assert_eq!(outcome.participant(), &participant);
    }
}
