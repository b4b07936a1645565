//! Relationship module - typed, directional edges between contacts

use crate::contact::ContactId;
use std::fmt;

/// Opaque identifier for a relationship record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationshipId(u64);

impl RelationshipId {
    /// Wrap a raw directory id.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw id value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for a relationship type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelationshipTypeId(u64);

impl RelationshipTypeId {
    /// Wrap a raw directory id.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw id value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RelationshipTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which endpoint of a relationship a contact occupies.
///
/// A relationship's two endpoints carry asymmetric labels ("Employee of"
/// vs. "Employer of"), so role determines which label reads naturally
/// for a given contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    /// The contact is endpoint A
    A,
    /// The contact is endpoint B
    B,
}

impl Role {
    /// The opposite role.
    pub fn flip(self) -> Self {
        match self {
            Role::A => Role::B,
            Role::B => Role::A,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::A => write!(f, "a"),
            Role::B => write!(f, "b"),
        }
    }
}

/// A relationship type with its two directional labels.
///
/// A type id always resolves to exactly one pair of labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipType {
    /// Type identifier
    pub id: RelationshipTypeId,

    /// Label when the subject occupies endpoint A ("Employee of")
    pub label_forward: String,

    /// Label when the subject occupies endpoint B ("Employer of")
    pub label_reverse: String,
}

impl RelationshipType {
    /// The label that reads naturally for a subject in the given role.
    pub fn label_for(&self, role: Role) -> &str {
        match role {
            Role::A => &self.label_forward,
            Role::B => &self.label_reverse,
        }
    }
}

/// A relationship record between two contacts.
///
/// Undirected in membership (either endpoint "has" the relationship),
/// directional in semantics (the endpoints carry different labels).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Record identifier
    pub id: RelationshipId,

    /// The relationship type
    pub type_id: RelationshipTypeId,

    /// Contact occupying endpoint A
    pub endpoint_a: ContactId,

    /// Contact occupying endpoint B
    pub endpoint_b: ContactId,

    /// Whether the relationship is currently active
    pub is_active: bool,

    /// Start date, directory-formatted, when recorded
    pub start_date: Option<String>,

    /// End date, directory-formatted, when recorded
    pub end_date: Option<String>,
}

impl Relationship {
    /// The role `contact` occupies in this relationship, if any.
    pub fn role_of(&self, contact: ContactId) -> Option<Role> {
        if self.endpoint_a == contact {
            Some(Role::A)
        } else if self.endpoint_b == contact {
            Some(Role::B)
        } else {
            None
        }
    }

    /// The endpoint opposite `contact`, if `contact` is a member.
    pub fn counterpart_of(&self, contact: ContactId) -> Option<ContactId> {
        match self.role_of(contact)? {
            Role::A => Some(self.endpoint_b),
            Role::B => Some(self.endpoint_a),
        }
    }
}
