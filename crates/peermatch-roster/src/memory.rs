//! Deterministic in-memory roster store for tests and local development

use crate::store::RosterStore;
use crate::types::{
    AttendanceRequest, Event, EventId, EventQuery, Participant, ParticipantId, ParticipantStatus,
    StatusId,
};
use async_trait::async_trait;
use peermatch_directory::DirectoryError;
use peermatch_domain::ContactId;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Inner {
    events: Vec<Event>,
    statuses: Vec<ParticipantStatus>,
    participants: Vec<Participant>,
    next_participant_id: u64,
    failing_contacts: BTreeSet<u64>,
    unavailable: bool,
    participant_calls: usize,
}

/// In-memory `RosterStore` implementation.
///
/// Clones share state, so a test can keep a handle for assertions while
/// the service owns another.
#[derive(Clone, Default)]
pub struct MemoryRoster {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryRoster {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event.
    pub fn with_event(self, event: Event) -> Self {
        self.inner.lock().unwrap().events.push(event);
        self
    }

    /// Add a participant status to the vocabulary.
    pub fn with_status(self, status: ParticipantStatus) -> Self {
        self.inner.lock().unwrap().statuses.push(status);
        self
    }

    /// Add an existing participant record.
    pub fn with_participant(self, participant: Participant) -> Self {
        self.inner.lock().unwrap().participants.push(participant);
        self
    }

    /// Make every participant write for this contact fail.
    pub fn fail_contact(&self, id: ContactId) {
        self.inner
            .lock()
            .unwrap()
            .failing_contacts
            .insert(id.value());
    }

    /// Make every operation fail as unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.lock().unwrap().unavailable = unavailable;
    }

    /// Number of participant lookups and writes issued so far.
    pub fn participant_calls(&self) -> usize {
        self.inner.lock().unwrap().participant_calls
    }

    /// Current participant records, in insertion order.
    pub fn participants(&self) -> Vec<Participant> {
        self.inner.lock().unwrap().participants.clone()
    }

    fn check_available(inner: &Inner) -> Result<(), DirectoryError> {
        if inner.unavailable {
            Err(DirectoryError::Unreachable(
                "in-memory roster marked unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn check_contact(inner: &Inner, contact_id: ContactId) -> Result<(), DirectoryError> {
        if inner.failing_contacts.contains(&contact_id.value()) {
            Err(DirectoryError::api(
                "Participant",
                "get",
                format!("injected failure for contact {contact_id}"),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RosterStore for MemoryRoster {
    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, DirectoryError> {
        let inner = self.inner.lock().unwrap();
        Self::check_available(&inner)?;
        let mut events: Vec<Event> = inner
            .events
            .iter()
            .filter(|e| !(query.active_only && !e.is_active))
            .filter(|e| query.in_window(e.start_date.as_deref()))
            .cloned()
            .collect();
        // Most recent first, matching the live store's ordering.
        events.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
        if query.limit > 0 {
            events.truncate(query.limit as usize);
        }
        Ok(events)
    }

    async fn participant_statuses(&self) -> Result<Vec<ParticipantStatus>, DirectoryError> {
        let inner = self.inner.lock().unwrap();
        Self::check_available(&inner)?;
        Ok(inner.statuses.clone())
    }

    async fn find_participant(
        &self,
        event_id: EventId,
        contact_id: ContactId,
    ) -> Result<Option<Participant>, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.participant_calls += 1;
        Self::check_available(&inner)?;
        Self::check_contact(&inner, contact_id)?;
        Ok(inner
            .participants
            .iter()
            .find(|p| p.event_id == event_id && p.contact_id == contact_id)
            .cloned())
    }

    async fn create_participant(
        &self,
        request: &AttendanceRequest,
    ) -> Result<Participant, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.participant_calls += 1;
        Self::check_available(&inner)?;
        Self::check_contact(&inner, request.contact_id)?;
        inner.next_participant_id += 1;
        let participant = Participant {
            id: ParticipantId::new(inner.next_participant_id),
            event_id: request.event_id,
            contact_id: request.contact_id,
            status_id: request.status_id,
            register_date: None,
        };
        inner.participants.push(participant.clone());
        Ok(participant)
    }

    async fn update_participant(
        &self,
        id: ParticipantId,
        status_id: StatusId,
    ) -> Result<Participant, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.participant_calls += 1;
        Self::check_available(&inner)?;
        let participant = inner
            .participants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| DirectoryError::NotFound {
                entity: "Participant".to_string(),
                id: id.value(),
            })?;
        participant.status_id = status_id;
        Ok(participant.clone())
    }
}
