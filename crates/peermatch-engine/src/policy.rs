//! Inclusion policy - deciding whether matched patterns admit a candidate

use crate::patterns::PatternSet;
use peermatch_domain::MatchedRelationship;
use std::collections::BTreeMap;

/// Whether a candidate's matched-pattern set qualifies it for the
/// result.
///
/// All-of requires every anchor pattern to have at least one match;
/// any-of requires at least one. Membership is per pattern key, not per
/// relationship: several relationships satisfying one pattern count
/// once. An empty anchor set admits nothing (the engine short-circuits
/// before matching in that case; this guard keeps the function total).
pub(crate) fn qualifies(
    matched: &BTreeMap<String, MatchedRelationship>,
    anchor: &PatternSet,
    require_all_patterns: bool,
) -> bool {
    if anchor.is_empty() {
        return false;
    }
    if require_all_patterns {
        anchor.keys().all(|key| matched.contains_key(&key))
    } else {
        !matched.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peermatch_domain::{
        ContactId, ContactRef, Pattern, RelationshipId, RelationshipTypeId, Role,
    };

    fn pattern(type_id: u64) -> Pattern {
        Pattern {
            type_id: RelationshipTypeId::new(type_id),
            subtype: "Employer".to_string(),
            role: Role::A,
        }
    }

    fn anchor_set(type_ids: &[u64]) -> PatternSet {
        let mut set = PatternSet::default();
        for id in type_ids {
            set.insert(pattern(*id));
        }
        set
    }

    fn evidence_for(patterns: &[Pattern]) -> BTreeMap<String, MatchedRelationship> {
        patterns
            .iter()
            .map(|p| {
                (
                    p.key(),
                    MatchedRelationship {
                        pattern_key: p.key(),
                        relationship_id: RelationshipId::new(1),
                        relationship_type_id: p.type_id,
                        label: "Employee of".to_string(),
                        role: p.role,
                        subtype: p.subtype.clone(),
                        counterpart: ContactRef {
                            id: ContactId::new(10),
                            display_name: "Institution I".to_string(),
                        },
                        is_active: true,
                        start_date: None,
                        end_date: None,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_any_of_admits_partial_match() {
        let anchor = anchor_set(&[5, 9]);
        let matched = evidence_for(&[pattern(5)]);
        assert!(qualifies(&matched, &anchor, false));
        assert!(!qualifies(&matched, &anchor, true));
    }

    #[test]
    fn test_full_match_admitted_under_both_policies() {
        let anchor = anchor_set(&[5, 9]);
        let matched = evidence_for(&[pattern(5), pattern(9)]);
        assert!(qualifies(&matched, &anchor, false));
        assert!(qualifies(&matched, &anchor, true));
    }

    #[test]
    fn test_no_match_excluded_under_both_policies() {
        let anchor = anchor_set(&[5]);
        let matched = evidence_for(&[]);
        assert!(!qualifies(&matched, &anchor, false));
        assert!(!qualifies(&matched, &anchor, true));
    }

    #[test]
    fn test_empty_anchor_admits_nothing() {
        let anchor = PatternSet::default();
        let matched = evidence_for(&[pattern(5)]);
        assert!(!qualifies(&matched, &anchor, false));
        assert!(!qualifies(&matched, &anchor, true));
    }
}
