//! REST implementation of the directory boundary
//!
//! Speaks the JSON API v4 convention: `POST {base}/{Entity}/{action}`
//! with a JSON `params` envelope, typed values in the reply. The engine
//! never sees any of this; it is all behind [`ContactDirectory`].

use crate::directory::ContactDirectory;
use crate::error::DirectoryError;
use crate::query::{ContactQuery, Endpoint, RelationshipFilter};
use async_trait::async_trait;
use peermatch_domain::{
    Contact, ContactId, Relationship, RelationshipId, RelationshipType, RelationshipTypeId,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Default timeout for directory requests (10 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const CONTACT_SELECT: [&str; 6] = [
    "id",
    "display_name",
    "sort_name",
    "email_primary.email",
    "contact_type",
    "contact_sub_type",
];

/// Thin transport over the directory's JSON API.
///
/// Cloning is cheap and shares the underlying connection pool; the
/// roster layer reuses the same client for its own entities.
#[derive(Clone)]
pub struct Api4Client {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

/// One page of API values.
#[derive(Debug, Deserialize)]
pub struct ApiPage<T> {
    /// Matched-row count, when the action reports one
    #[serde(default)]
    pub count: u64,

    /// The records themselves
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

impl Api4Client {
    /// Create a client for the given base URL, with the default
    /// per-request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with an explicit per-request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into(),
            api_key: None,
            client,
        }
    }

    /// Authenticate requests with an API key (sent as a bearer token).
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Issue one API request and decode the value page.
    pub async fn request<T: DeserializeOwned>(
        &self,
        entity: &str,
        action: &str,
        params: Value,
    ) -> Result<ApiPage<T>, DirectoryError> {
        let url = endpoint(&self.base_url, entity, action);
        debug!(%url, "directory request");

        let mut builder = self.client.post(&url).json(&json!({ "params": params }));
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| DirectoryError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::api(
                entity,
                action,
                format!("HTTP {status}: {body}"),
            ));
        }

        response
            .json::<ApiPage<T>>()
            .await
            .map_err(|e| DirectoryError::Decode(e.to_string()))
    }
}

/// `ContactDirectory` over a live JSON API.
#[derive(Clone)]
pub struct RestDirectory {
    api: Api4Client,
}

impl RestDirectory {
    /// Wrap an API client.
    pub fn new(api: Api4Client) -> Self {
        Self { api }
    }

    /// Access the underlying transport, e.g. to share it with the
    /// roster layer.
    pub fn api(&self) -> &Api4Client {
        &self.api
    }
}

#[async_trait]
impl ContactDirectory for RestDirectory {
    async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>, DirectoryError> {
        let page: ApiPage<ContactRecord> = self
            .api
            .request("Contact", "get", contact_get_params(id))
            .await?;
        Ok(page.values.into_iter().next().map(Contact::from))
    }

    async fn list_contacts(
        &self,
        query: &ContactQuery,
    ) -> Result<Vec<Contact>, DirectoryError> {
        let page: ApiPage<ContactRecord> = self
            .api
            .request("Contact", "get", contact_list_params(query))
            .await?;
        Ok(page.values.into_iter().map(Contact::from).collect())
    }

    async fn count_contacts(&self, types: &[String]) -> Result<u64, DirectoryError> {
        let page: ApiPage<Value> = self
            .api
            .request("Contact", "get", contact_count_params(types))
            .await?;
        Ok(page.count)
    }

    async fn get_relationships(
        &self,
        filter: &RelationshipFilter,
    ) -> Result<Vec<Relationship>, DirectoryError> {
        let mut records: Vec<RelationshipRecord> = Vec::new();
        for params in relationship_params(filter) {
            let page: ApiPage<RelationshipRecord> =
                self.api.request("Relationship", "get", params).await?;
            records.extend(page.values);
        }
        // The "either endpoint" form issues two queries; merge and
        // de-duplicate on record id for a deterministic result.
        records.sort_by_key(|r| r.id);
        records.dedup_by_key(|r| r.id);
        Ok(records.into_iter().map(Relationship::from).collect())
    }

    async fn get_relationship_type(
        &self,
        id: RelationshipTypeId,
    ) -> Result<Option<RelationshipType>, DirectoryError> {
        let params = json!({
            "where": [["id", "=", id.value()]],
            "limit": 1,
        });
        let page: ApiPage<RelationshipTypeRecord> = self
            .api
            .request("RelationshipType", "get", params)
            .await?;
        Ok(page.values.into_iter().next().map(RelationshipType::from))
    }
}

fn endpoint(base_url: &str, entity: &str, action: &str) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), entity, action)
}

fn contact_get_params(id: ContactId) -> Value {
    json!({
        "select": CONTACT_SELECT,
        "where": [["id", "=", id.value()]],
        "limit": 1,
    })
}

fn contact_list_params(query: &ContactQuery) -> Value {
    let mut params = json!({
        "select": CONTACT_SELECT,
        "where": contact_where(&query.types, query.exclude_deleted),
        "orderBy": {"sort_name": "ASC", "id": "ASC"},
    });
    if query.limit > 0 {
        params["limit"] = json!(query.limit);
    }
    if query.offset > 0 {
        params["offset"] = json!(query.offset);
    }
    params
}

fn contact_count_params(types: &[String]) -> Value {
    json!({
        "select": ["row_count"],
        "where": contact_where(types, true),
    })
}

fn contact_where(types: &[String], exclude_deleted: bool) -> Value {
    let mut clauses = vec![json!(["contact_type", "IN", types])];
    if exclude_deleted {
        clauses.push(json!(["is_deleted", "=", false]));
    }
    Value::Array(clauses)
}

/// One params payload per endpoint query the filter requires: one for a
/// pinned role, two for "either endpoint".
fn relationship_params(filter: &RelationshipFilter) -> Vec<Value> {
    let columns: &[&str] = match filter.endpoint {
        Endpoint::RoleA(_) => &["contact_id_a"],
        Endpoint::RoleB(_) => &["contact_id_b"],
        Endpoint::Either(_) => &["contact_id_a", "contact_id_b"],
    };
    let contact = filter.endpoint.contact();
    let type_ids: Vec<u64> = filter.type_ids.iter().map(|t| t.value()).collect();

    columns
        .iter()
        .map(|column| {
            let mut clauses = vec![
                json!([column, "=", contact.value()]),
                json!(["relationship_type_id", "IN", type_ids]),
            ];
            if filter.active_only {
                clauses.push(json!(["is_active", "=", true]));
            }
            json!({ "where": Value::Array(clauses) })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct ContactRecord {
    id: u64,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    sort_name: String,
    #[serde(default, rename = "email_primary.email")]
    email: Option<String>,
    #[serde(default)]
    contact_type: String,
    #[serde(default)]
    contact_sub_type: Vec<String>,
}

impl From<ContactRecord> for Contact {
    fn from(record: ContactRecord) -> Self {
        Contact {
            id: ContactId::new(record.id),
            display_name: record.display_name,
            sort_name: record.sort_name,
            email: record.email,
            contact_type: record.contact_type,
            subtypes: record.contact_sub_type,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RelationshipRecord {
    id: u64,
    relationship_type_id: u64,
    contact_id_a: u64,
    contact_id_b: u64,
    #[serde(default = "default_true")]
    is_active: bool,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
}

impl From<RelationshipRecord> for Relationship {
    fn from(record: RelationshipRecord) -> Self {
        Relationship {
            id: RelationshipId::new(record.id),
            type_id: RelationshipTypeId::new(record.relationship_type_id),
            endpoint_a: ContactId::new(record.contact_id_a),
            endpoint_b: ContactId::new(record.contact_id_b),
            is_active: record.is_active,
            start_date: record.start_date,
            end_date: record.end_date,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RelationshipTypeRecord {
    id: u64,
    #[serde(default)]
    label_a_b: String,
    #[serde(default)]
    label_b_a: String,
}

impl From<RelationshipTypeRecord> for RelationshipType {
    fn from(record: RelationshipTypeRecord) -> Self {
        RelationshipType {
            id: RelationshipTypeId::new(record.id),
            label_forward: record.label_a_b,
            label_reverse: record.label_b_a,
        }
    }
}
