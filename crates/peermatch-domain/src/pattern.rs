//! Pattern module - derived relationship patterns and match evidence

use crate::contact::{Contact, ContactRef};
use crate::relationship::{RelationshipId, RelationshipTypeId, Role};
use std::collections::BTreeMap;
use std::fmt;

/// A derived relationship pattern held by the anchor contact.
///
/// "The anchor holds a relationship of this type, in this role, to some
/// contact carrying this subtype." Patterns are never persisted; they
/// exist only for the duration of one matching request. Multiple
/// distinct relationships can collapse into the same pattern.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pattern {
    /// The relationship type involved
    pub type_id: RelationshipTypeId,

    /// The subtype the counterpart contact must carry
    pub subtype: String,

    /// The role the anchor occupies in the relationship
    pub role: Role,
}

impl Pattern {
    /// Composite key identifying this pattern: `type|subtype|role`.
    pub fn key(&self) -> String {
        format!("{}|{}|{}", self.type_id, self.subtype, self.role)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Evidence that one candidate satisfies one anchor pattern.
///
/// At most one `MatchedRelationship` is recorded per pattern key; when
/// several relationships satisfy the same pattern, the first one found
/// wins and the rest earn no extra credit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRelationship {
    /// Key of the anchor pattern this evidence satisfies
    pub pattern_key: String,

    /// The relationship record that produced the match
    pub relationship_id: RelationshipId,

    /// Type of the matched relationship
    pub relationship_type_id: RelationshipTypeId,

    /// Type label resolved for the candidate's own role, so the text
    /// reads naturally for the contact being described
    pub label: String,

    /// The role the candidate occupies in the matched relationship
    pub role: Role,

    /// The subtype that satisfied the pattern
    pub subtype: String,

    /// The contact at the other end of the matched relationship
    pub counterpart: ContactRef,

    /// Whether the matched relationship is active
    pub is_active: bool,

    /// Start date of the matched relationship, when recorded
    pub start_date: Option<String>,

    /// End date of the matched relationship, when recorded
    pub end_date: Option<String>,
}

/// A candidate contact admitted to the result, with the evidence that
/// admitted it, keyed by pattern key.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerResult {
    /// The admitted contact
    pub contact: Contact,

    /// Pattern key → the relationship that satisfied it
    pub matched: BTreeMap<String, MatchedRelationship>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_key_format() {
        let p = Pattern {
            type_id: RelationshipTypeId::new(5),
            subtype: "Employer".to_string(),
            role: Role::A,
        };
        assert_eq!(p.key(), "5|Employer|a");

        let q = Pattern { role: Role::B, ..p };
        assert_eq!(q.key(), "5|Employer|b");
    }

    #[test]
    fn test_pattern_keys_distinguish_roles() {
        let a = Pattern {
            type_id: RelationshipTypeId::new(5),
            subtype: "Employer".to_string(),
            role: Role::A,
        };
        let b = Pattern { role: Role::B, ..a.clone() };
        assert_ne!(a, b);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_pattern_ordering_is_stable() {
        let mut patterns = vec![
            Pattern {
                type_id: RelationshipTypeId::new(9),
                subtype: "Employer".to_string(),
                role: Role::A,
            },
            Pattern {
                type_id: RelationshipTypeId::new(5),
                subtype: "Employer".to_string(),
                role: Role::B,
            },
            Pattern {
                type_id: RelationshipTypeId::new(5),
                subtype: "Employer".to_string(),
                role: Role::A,
            },
        ];
        patterns.sort();
        assert_eq!(patterns[0].key(), "5|Employer|a");
        assert_eq!(patterns[1].key(), "5|Employer|b");
        assert_eq!(patterns[2].key(), "9|Employer|a");
    }
}
