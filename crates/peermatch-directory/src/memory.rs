//! Deterministic in-memory directory for tests and local development
//!
//! Mirrors the contract of the REST implementation without any network
//! calls, and adds two test affordances: per-contact failure injection
//! and call counters, so suites can assert which remote operations a
//! code path did (or did not) issue.

use crate::directory::ContactDirectory;
use crate::error::DirectoryError;
use crate::query::{ContactQuery, RelationshipFilter};
use async_trait::async_trait;
use peermatch_domain::{Contact, ContactId, Relationship, RelationshipType, RelationshipTypeId};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Inner {
    contacts: BTreeMap<u64, StoredContact>,
    relationships: Vec<Relationship>,
    relationship_types: BTreeMap<u64, RelationshipType>,
    failing_contacts: BTreeSet<u64>,
    unavailable: bool,
    contact_calls: usize,
    list_calls: usize,
    count_calls: usize,
    relationship_calls: usize,
    relationship_type_calls: usize,
}

struct StoredContact {
    contact: Contact,
    deleted: bool,
}

/// In-memory `ContactDirectory` implementation.
///
/// Clones share state, so a test can keep a handle for assertions while
/// the engine owns another.
#[derive(Clone, Default)]
pub struct MemoryDirectory {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contact.
    pub fn with_contact(self, contact: Contact) -> Self {
        self.insert_contact(contact, false);
        self
    }

    /// Add a soft-deleted contact; it is invisible to listing and
    /// counting but still resolvable by id, matching directory behavior.
    pub fn with_deleted_contact(self, contact: Contact) -> Self {
        self.insert_contact(contact, true);
        self
    }

    /// Add a relationship record.
    pub fn with_relationship(self, relationship: Relationship) -> Self {
        self.inner.lock().unwrap().relationships.push(relationship);
        self
    }

    /// Add a relationship type.
    pub fn with_relationship_type(self, relationship_type: RelationshipType) -> Self {
        self.inner
            .lock()
            .unwrap()
            .relationship_types
            .insert(relationship_type.id.value(), relationship_type);
        self
    }

    /// Make every `get_contact` for this id fail with an API error.
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

    /// Number of `get_contact` calls issued so far.
    pub fn contact_calls(&self) -> usize {
        self.inner.lock().unwrap().contact_calls
    }

    /// Number of `list_contacts` calls issued so far.
    pub fn list_calls(&self) -> usize {
        self.inner.lock().unwrap().list_calls
    }

    /// Number of `count_contacts` calls issued so far.
    pub fn count_calls(&self) -> usize {
        self.inner.lock().unwrap().count_calls
    }

    /// Number of `get_relationships` calls issued so far.
    pub fn relationship_calls(&self) -> usize {
        self.inner.lock().unwrap().relationship_calls
    }

    fn insert_contact(&self, contact: Contact, deleted: bool) {
        self.inner
            .lock()
            .unwrap()
            .contacts
            .insert(contact.id.value(), StoredContact { contact, deleted });
    }

    fn check_available(inner: &Inner) -> Result<(), DirectoryError> {
        if inner.unavailable {
            Err(DirectoryError::Unreachable(
                "in-memory directory marked unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ContactDirectory for MemoryDirectory {
    async fn get_contact(&self, id: ContactId) -> Result<Option<Contact>, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.contact_calls += 1;
        Self::check_available(&inner)?;
        if inner.failing_contacts.contains(&id.value()) {
            return Err(DirectoryError::api(
                "Contact",
                "get",
                format!("injected failure for contact {id}"),
            ));
        }
        Ok(inner.contacts.get(&id.value()).map(|s| s.contact.clone()))
    }

    async fn list_contacts(
        &self,
        query: &ContactQuery,
    ) -> Result<Vec<Contact>, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.list_calls += 1;
        Self::check_available(&inner)?;

        let mut matching: Vec<&Contact> = inner
            .contacts
            .values()
            .filter(|s| !(query.exclude_deleted && s.deleted))
            .map(|s| &s.contact)
            .filter(|c| query.types.contains(&c.contact_type))
            .collect();
        // Stable scan order: sort_name, then id as tie-break.
        matching.sort_by(|a, b| {
            a.sort_name
                .cmp(&b.sort_name)
                .then_with(|| a.id.cmp(&b.id))
        });

        let offset = query.offset.min(matching.len() as u64) as usize;
        let mut page = matching.split_off(offset);
        if query.limit > 0 {
            page.truncate(query.limit as usize);
        }
        Ok(page.into_iter().cloned().collect())
    }

    async fn count_contacts(&self, types: &[String]) -> Result<u64, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.count_calls += 1;
        Self::check_available(&inner)?;
        let count = inner
            .contacts
            .values()
            .filter(|s| !s.deleted)
            .filter(|s| types.contains(&s.contact.contact_type))
            .count();
        Ok(count as u64)
    }

    async fn get_relationships(
        &self,
        filter: &RelationshipFilter,
    ) -> Result<Vec<Relationship>, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.relationship_calls += 1;
        Self::check_available(&inner)?;
        Ok(inner
            .relationships
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn get_relationship_type(
        &self,
        id: RelationshipTypeId,
    ) -> Result<Option<RelationshipType>, DirectoryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.relationship_type_calls += 1;
        Self::check_available(&inner)?;
        Ok(inner.relationship_types.get(&id.value()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Endpoint;
    use peermatch_domain::RelationshipId;

    fn contact(id: u64, sort_name: &str, contact_type: &str) -> Contact {
        Contact {
            id: ContactId::new(id),
            display_name: sort_name.to_string(),
            sort_name: sort_name.to_string(),
            email: None,
            contact_type: contact_type.to_string(),
            subtypes: vec![],
        }
    }

    fn individuals() -> ContactQuery {
        ContactQuery::of_types(vec!["Individual".to_string()])
    }

    #[tokio::test]
    async fn test_list_is_sorted_and_typed() {
        let dir = MemoryDirectory::new()
            .with_contact(contact(1, "Zuse, Konrad", "Individual"))
            .with_contact(contact(2, "Boole, George", "Individual"))
            .with_contact(contact(3, "Acme Corp", "Organization"));

        let listed = dir.list_contacts(&individuals()).await.unwrap();
        let names: Vec<_> = listed.iter().map(|c| c.sort_name.as_str()).collect();
        assert_eq!(names, ["Boole, George", "Zuse, Konrad"]);
    }

    #[tokio::test]
    async fn test_sort_tie_break_by_id() {
        let dir = MemoryDirectory::new()
            .with_contact(contact(9, "Smith, Jan", "Individual"))
            .with_contact(contact(4, "Smith, Jan", "Individual"));

        let listed = dir.list_contacts(&individuals()).await.unwrap();
        let ids: Vec<_> = listed.iter().map(|c| c.id.value()).collect();
        assert_eq!(ids, [4, 9]);
    }

    #[tokio::test]
    async fn test_deleted_contacts_hidden_from_scan_but_resolvable() {
        let dir = MemoryDirectory::new()
            .with_contact(contact(1, "Boole, George", "Individual"))
            .with_deleted_contact(contact(2, "Gone, Long", "Individual"));

        assert_eq!(dir.list_contacts(&individuals()).await.unwrap().len(), 1);
        assert_eq!(dir.count_contacts(&["Individual".to_string()]).await.unwrap(), 1);
        assert!(dir.get_contact(ContactId::new(2)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_pagination_slices_are_disjoint_and_ordered() {
        let mut dir = MemoryDirectory::new();
        for (id, name) in [(1, "Aa"), (2, "Bb"), (3, "Cc"), (4, "Dd"), (5, "Ee")] {
            dir = dir.with_contact(contact(id, name, "Individual"));
        }

        let page1 = dir
            .list_contacts(&individuals().paged(2, 0))
            .await
            .unwrap();
        let page2 = dir
            .list_contacts(&individuals().paged(2, 2))
            .await
            .unwrap();
        let all = dir.list_contacts(&individuals()).await.unwrap();

        let concat: Vec<_> = page1.iter().chain(page2.iter()).cloned().collect();
        assert_eq!(concat, all[..4].to_vec());
    }

    #[tokio::test]
    async fn test_offset_past_end_is_empty() {
        let dir = MemoryDirectory::new().with_contact(contact(1, "Aa", "Individual"));
        let page = dir
            .list_contacts(&individuals().paged(10, 50))
            .await
            .unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn test_relationship_filtering() {
        let dir = MemoryDirectory::new().with_relationship(Relationship {
            id: RelationshipId::new(1),
            type_id: RelationshipTypeId::new(5),
            endpoint_a: ContactId::new(1),
            endpoint_b: ContactId::new(2),
            is_active: true,
            start_date: None,
            end_date: None,
        });

        let filter = RelationshipFilter {
            endpoint: Endpoint::Either(ContactId::new(2)),
            type_ids: vec![RelationshipTypeId::new(5)],
            active_only: true,
        };
        assert_eq!(dir.get_relationships(&filter).await.unwrap().len(), 1);

        let wrong_type = RelationshipFilter {
            type_ids: vec![RelationshipTypeId::new(9)],
            ..filter
        };
        assert!(dir.get_relationships(&wrong_type).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_injection_and_counters() {
        let dir = MemoryDirectory::new().with_contact(contact(1, "Aa", "Individual"));
        dir.fail_contact(ContactId::new(1));

        let err = dir.get_contact(ContactId::new(1)).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Api { .. }));
        assert_eq!(dir.contact_calls(), 1);
        assert_eq!(dir.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_fails_everything() {
        let dir = MemoryDirectory::new();
        dir.set_unavailable(true);
        let err = dir.list_contacts(&individuals()).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Unreachable(_)));
    }
}
