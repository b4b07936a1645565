//! Attendance recording - the upsert policy over the store

use crate::error::RosterError;
use crate::store::RosterStore;
use crate::types::{
    AttendanceOutcome, AttendanceRequest, Event, EventId, EventQuery, Participant,
    ParticipantStatus, StatusId,
};
use peermatch_domain::ContactId;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of a bulk recording pass: what was applied, and which
/// contacts failed with what.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    /// Successfully recorded attendances, in input order
    pub applied: Vec<AttendanceOutcome>,

    /// Contacts whose recording failed, with the failure
    pub failures: Vec<(ContactId, RosterError)>,
}

/// The attendance roster service.
///
/// Stateless over an owned store handle; all policy (id validation, the
/// upsert decision, bulk failure isolation) lives here, never in the
/// store.
pub struct Roster<S> {
    store: Arc<S>,
}

impl<S: RosterStore> Roster<S> {
    /// Wrap a store.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// List events.
    ///
    /// # Errors
    ///
    /// `Store` when the event listing fails.
    pub async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, RosterError> {
        self.store
            .list_events(query)
            .await
            .map_err(|e| RosterError::store("Event", "get", e))
    }

    /// The participant-status vocabulary.
    ///
    /// # Errors
    ///
    /// `Store` when the vocabulary lookup fails.
    pub async fn participant_statuses(&self) -> Result<Vec<ParticipantStatus>, RosterError> {
        self.store
            .participant_statuses()
            .await
            .map_err(|e| RosterError::store("ParticipantStatusType", "get", e))
    }

    /// Record one attendance, as an upsert keyed on (event, contact).
    ///
    /// An existing record with the requested status is left untouched;
    /// one with a different status is updated; otherwise a record is
    /// created.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` when any id is zero (rejected before any store
    /// call); `Store` when the lookup or the write fails.
    pub async fn record_attendance(
        &self,
        request: &AttendanceRequest,
    ) -> Result<AttendanceOutcome, RosterError> {
        validate(request)?;

        let existing = self
            .store
            .find_participant(request.event_id, request.contact_id)
            .await
            .map_err(|e| RosterError::store("Participant", "get", e))?;

        let outcome = match existing {
            Some(participant) if participant.status_id == request.status_id => {
                AttendanceOutcome::Unchanged(participant)
            }
            Some(participant) => {
                let updated = self
                    .store
                    .update_participant(participant.id, request.status_id)
                    .await
                    .map_err(|e| RosterError::store("Participant", "update", e))?;
                AttendanceOutcome::Updated(updated)
            }
            None => {
                let created = self
                    .store
                    .create_participant(request)
                    .await
                    .map_err(|e| RosterError::store("Participant", "create", e))?;
                AttendanceOutcome::Created(created)
            }
        };

        info!(
            event = %request.event_id,
            contact = %request.contact_id,
            status = %request.status_id,
            outcome = outcome_name(&outcome),
            "attendance recorded"
        );
        Ok(outcome)
    }

    /// Record one status for many contacts at one event.
    ///
    /// Contacts are processed in order; a failure for one contact is
    /// collected and the rest proceed.
    pub async fn record_bulk(
        &self,
        event_id: EventId,
        status_id: StatusId,
        contacts: &[ContactId],
    ) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();
        for &contact_id in contacts {
            let request = AttendanceRequest {
                event_id,
                contact_id,
                status_id,
            };
            match self.record_attendance(&request).await {
                Ok(applied) => outcome.applied.push(applied),
                Err(error) => {
                    warn!(%contact_id, %error, "attendance failed for contact, continuing");
                    outcome.failures.push((contact_id, error));
                }
            }
        }
        info!(
            event = %event_id,
            applied = outcome.applied.len(),
            failed = outcome.failures.len(),
            "bulk attendance complete"
        );
        outcome
    }
}

fn validate(request: &AttendanceRequest) -> Result<(), RosterError> {
    if request.event_id.value() == 0 {
        return Err(RosterError::InvalidRequest(
            "event id is required".to_string(),
        ));
    }
    if request.contact_id.value() == 0 {
        return Err(RosterError::InvalidRequest(
            "contact id is required".to_string(),
        ));
    }
    if request.status_id.value() == 0 {
        return Err(RosterError::InvalidRequest(
            "status id is required".to_string(),
        ));
    }
    Ok(())
}

fn outcome_name(outcome: &AttendanceOutcome) -> &'static str {
    match outcome {
        AttendanceOutcome::Created(_) => "created",
        AttendanceOutcome::Updated(_) => "updated",
        AttendanceOutcome::Unchanged(_) => "unchanged",
    }
}
