//! REST implementation of the roster store
//!
//! Rides the same JSON API transport as the contact directory; in a
//! deployed setup both wrap one shared [`Api4Client`].

use crate::store::RosterStore;
use crate::types::{
    AttendanceRequest, Event, EventId, EventQuery, Participant, ParticipantId, ParticipantStatus,
    StatusId,
};
use async_trait::async_trait;
use peermatch_directory::{Api4Client, ApiPage, DirectoryError};
use peermatch_domain::ContactId;
use serde::Deserialize;
use serde_json::{json, Value};

/// `RosterStore` over a live JSON API.
#[derive(Clone)]
pub struct RestRoster {
    api: Api4Client,
}

impl RestRoster {
    /// Wrap an API client, typically the one the contact directory
    /// already holds.
    pub fn new(api: Api4Client) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RosterStore for RestRoster {
    async fn list_events(&self, query: &EventQuery) -> Result<Vec<Event>, DirectoryError> {
        let page: ApiPage<EventRecord> = self
            .api
            .request("Event", "get", event_params(query))
            .await?;
        Ok(page.values.into_iter().map(Event::from).collect())
    }

    async fn participant_statuses(&self) -> Result<Vec<ParticipantStatus>, DirectoryError> {
        let params = json!({
            "select": ["id", "name", "label", "is_counted"],
            "orderBy": {"weight": "ASC"},
        });
        let page: ApiPage<StatusRecord> = self
            .api
            .request("ParticipantStatusType", "get", params)
            .await?;
        Ok(page.values.into_iter().map(ParticipantStatus::from).collect())
    }

    async fn find_participant(
        &self,
        event_id: EventId,
        contact_id: ContactId,
    ) -> Result<Option<Participant>, DirectoryError> {
        let params = json!({
            "where": [
                ["event_id", "=", event_id.value()],
                ["contact_id", "=", contact_id.value()],
            ],
            "limit": 1,
        });
        let page: ApiPage<ParticipantRecord> =
            self.api.request("Participant", "get", params).await?;
        Ok(page.values.into_iter().next().map(Participant::from))
    }

    async fn create_participant(
        &self,
        request: &AttendanceRequest,
    ) -> Result<Participant, DirectoryError> {
        let params = json!({
            "values": {
                "event_id": request.event_id.value(),
                "contact_id": request.contact_id.value(),
                "status_id": request.status_id.value(),
            },
        });
        let page: ApiPage<ParticipantRecord> =
            self.api.request("Participant", "create", params).await?;
        created_record(page, "create").map(Participant::from)
    }

    async fn update_participant(
        &self,
        id: ParticipantId,
        status_id: StatusId,
    ) -> Result<Participant, DirectoryError> {
        let params = json!({
            "where": [["id", "=", id.value()]],
            "values": {"status_id": status_id.value()},
        });
        let page: ApiPage<ParticipantRecord> =
            self.api.request("Participant", "update", params).await?;
        created_record(page, "update").map(Participant::from)
    }
}

/// Write actions echo the affected record; an empty echo is a protocol
/// violation surfaced as a decode failure.
fn created_record(
    page: ApiPage<ParticipantRecord>,
    action: &str,
) -> Result<ParticipantRecord, DirectoryError> {
    page.values.into_iter().next().ok_or_else(|| {
        DirectoryError::Decode(format!("Participant {action} returned no record"))
    })
}

fn event_params(query: &EventQuery) -> Value {
    let mut clauses = Vec::new();
    if query.active_only {
        clauses.push(json!(["is_active", "=", true]));
    }
    if let Some(after) = &query.starts_after {
        clauses.push(json!(["start_date", ">=", after]));
    }
    if let Some(before) = &query.starts_before {
        clauses.push(json!(["start_date", "<=", before]));
    }
    let mut params = json!({
        "select": ["id", "title", "start_date", "end_date", "is_active"],
        "where": Value::Array(clauses),
        "orderBy": {"start_date": "DESC"},
    });
    if query.limit > 0 {
        params["limit"] = json!(query.limit);
    }
    params
}

#[derive(Debug, Deserialize)]
struct EventRecord {
    id: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    #[serde(default)]
    is_active: bool,
}

impl From<EventRecord> for Event {
    fn from(record: EventRecord) -> Self {
        Event {
            id: EventId::new(record.id),
            title: record.title,
            start_date: record.start_date,
            end_date: record.end_date,
            is_active: record.is_active,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatusRecord {
    id: u64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    is_counted: bool,
}

impl From<StatusRecord> for ParticipantStatus {
    fn from(record: StatusRecord) -> Self {
        ParticipantStatus {
            id: StatusId::new(record.id),
            name: record.name,
            label: record.label,
            is_counted: record.is_counted,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ParticipantRecord {
    id: u64,
    event_id: u64,
    contact_id: u64,
    status_id: u64,
    #[serde(default)]
    register_date: Option<String>,
}

impl From<ParticipantRecord> for Participant {
    fn from(record: ParticipantRecord) -> Self {
        Participant {
            id: ParticipantId::new(record.id),
            event_id: EventId::new(record.event_id),
            contact_id: ContactId::new(record.contact_id),
            status_id: StatusId::new(record.status_id),
            register_date: record.register_date,
        }
    }
}
