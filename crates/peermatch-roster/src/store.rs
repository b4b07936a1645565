//! The storage boundary for roster data

use crate::types::{
    AttendanceRequest, Event, EventId, EventQuery, Participant, ParticipantId, ParticipantStatus,
    StatusId,
};
use async_trait::async_trait;
use peermatch_directory::DirectoryError;
use peermatch_domain::ContactId;

/// Storage for events, statuses, and participant records.
///
/// Implementations report failures with [`DirectoryError`]; the service
/// layer wraps them with the entity and operation involved.
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// List events matching the query, most recent first.
    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, DirectoryError>;

    /// The participant-status vocabulary.
    async fn participant_statuses(&self) -> Result<Vec<ParticipantStatus>, DirectoryError>;

    /// The participant record for a contact at an event, if one exists.
    async fn find_participant(
        &self,
        event_id: EventId,
        contact_id: ContactId,
    ) -> Result<Option<Participant>, DirectoryError>;

    /// Create a participant record.
    async fn create_participant(
        &self,
        request: &AttendanceRequest,
    ) -> Result<Participant, DirectoryError>;

    /// Change the status of an existing participant record.
    async fn update_participant(
        &self,
        id: ParticipantId,
        status_id: StatusId,
    ) -> Result<Participant, DirectoryError>;
}
