//! The `ContactDirectory` trait - the engine's view of the remote directory

use crate::error::DirectoryError;
use crate::query::{ContactQuery, RelationshipFilter};
use async_trait::async_trait;
use peermatch_domain::{Contact, ContactId, Relationship, RelationshipType, RelationshipTypeId};

/// Read-only access to the remote contact directory.
///
/// The wire protocol is owned by the implementation; the engine only
/// depends on these five logical operations. All implementations must
/// uphold the ordering contract of [`ContactQuery`]: `list_contacts`
/// returns records sorted by `sort_name` ascending, contact id as
/// tie-break.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    /// Fetch one contact, with subtypes. `Ok(None)` when the id does
    /// not resolve; `Err` only when the directory itself misbehaves.
    async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>, DirectoryError>;

    /// Fetch contacts matching the query, in scan order.
    async fn list_contacts(&self, query: &ContactQuery)
        -> Result<Vec<Contact>, DirectoryError>;

    /// Count the contacts the same query would return unpaginated.
    /// Applies the type and deletion filters only.
    async fn count_contacts(&self, types: &[String]) -> Result<u64, DirectoryError>;

    /// Fetch relationships satisfying the filter.
    async fn get_relationships(
        &self,
        filter: &RelationshipFilter,
    ) -> Result<Vec<Relationship>, DirectoryError>;

    /// Resolve a relationship type to its pair of directional labels.
    async fn get_relationship_type(
        &self,
        id: RelationshipTypeId,
    ) -> Result<Option<RelationshipType>, DirectoryError>;
}
