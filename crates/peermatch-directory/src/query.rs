//! Query and filter types whose shape the matching engine dictates

use peermatch_domain::{ContactId, Relationship, RelationshipTypeId};

/// A candidate-pool query against the directory.
///
/// Results are always ordered by `sort_name` ascending with the contact
/// id as tie-break; pagination offsets depend on that order being
/// stable across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactQuery {
    /// Contact types to include, e.g. `["Individual"]`
    pub types: Vec<String>,

    /// Whether soft-deleted records are excluded (the engine always
    /// sets this; it is a field so the wire layer can say so explicitly)
    pub exclude_deleted: bool,

    /// Maximum records to return; 0 means unbounded
    pub limit: u64,

    /// Records to skip before the first returned one
    pub offset: u64,
}

impl ContactQuery {
    /// Query for all non-deleted contacts of the given types.
    pub fn of_types(types: Vec<String>) -> Self {
        Self {
            types,
            exclude_deleted: true,
            limit: 0,
            offset: 0,
        }
    }

    /// Restrict the query to one page.
    pub fn paged(mut self, limit: u64, offset: u64) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }
}

/// Which endpoint position a relationship query pins to a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The contact must occupy endpoint A
    RoleA(ContactId),

    /// The contact must occupy endpoint B
    RoleB(ContactId),

    /// The contact may occupy either endpoint. This is the batched form
    /// the engine prefers; the caller recovers the role from the record.
    Either(ContactId),
}

impl Endpoint {
    /// The contact the filter pins.
    pub fn contact(&self) -> ContactId {
        match self {
            Endpoint::RoleA(id) | Endpoint::RoleB(id) | Endpoint::Either(id) => *id,
        }
    }
}

/// A relationship query: endpoint pin, type restriction, activity flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipFilter {
    /// Endpoint pin
    pub endpoint: Endpoint,

    /// Relationship types to include; must be non-empty
    pub type_ids: Vec<RelationshipTypeId>,

    /// When true, inactive relationships are excluded
    pub active_only: bool,
}

impl RelationshipFilter {
    /// Whether a relationship record satisfies this filter. Shared by
    /// in-memory evaluation and by tests pinning down the wire queries.
    pub fn matches(&self, relationship: &Relationship) -> bool {
        if self.active_only && !relationship.is_active {
            return false;
        }
        if !self.type_ids.contains(&relationship.type_id) {
            return false;
        }
        match self.endpoint {
            Endpoint::RoleA(id) => relationship.endpoint_a == id,
            Endpoint::RoleB(id) => relationship.endpoint_b == id,
            Endpoint::Either(id) => {
                relationship.endpoint_a == id || relationship.endpoint_b == id
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peermatch_domain::RelationshipId;

    fn rel(a: u64, b: u64, type_id: u64, active: bool) -> Relationship {
        Relationship {
            id: RelationshipId::new(1),
            type_id: RelationshipTypeId::new(type_id),
            endpoint_a: ContactId::new(a),
            endpoint_b: ContactId::new(b),
            is_active: active,
            start_date: None,
            end_date: None,
        }
    }

    fn filter(endpoint: Endpoint, active_only: bool) -> RelationshipFilter {
        RelationshipFilter {
            endpoint,
            type_ids: vec![RelationshipTypeId::new(5)],
            active_only,
        }
    }

    #[test]
    fn test_either_matches_both_roles() {
        let f = filter(Endpoint::Either(ContactId::new(1)), false);
        assert!(f.matches(&rel(1, 2, 5, true)));
        assert!(f.matches(&rel(2, 1, 5, true)));
        assert!(!f.matches(&rel(2, 3, 5, true)));
    }

    #[test]
    fn test_role_pins_are_strict() {
        let a = filter(Endpoint::RoleA(ContactId::new(1)), false);
        assert!(a.matches(&rel(1, 2, 5, true)));
        assert!(!a.matches(&rel(2, 1, 5, true)));

        let b = filter(Endpoint::RoleB(ContactId::new(1)), false);
        assert!(!b.matches(&rel(1, 2, 5, true)));
        assert!(b.matches(&rel(2, 1, 5, true)));
    }

    #[test]
    fn test_activity_filter() {
        let f = filter(Endpoint::Either(ContactId::new(1)), true);
        assert!(!f.matches(&rel(1, 2, 5, false)));

        let lenient = filter(Endpoint::Either(ContactId::new(1)), false);
        assert!(lenient.matches(&rel(1, 2, 5, false)));
    }

    #[test]
    fn test_type_restriction() {
        let f = filter(Endpoint::Either(ContactId::new(1)), false);
        assert!(!f.matches(&rel(1, 2, 9, true)));
    }
}
