//! Pattern extraction - deriving the anchor's relationship patterns

use crate::error::EngineError;
use crate::remote;
use crate::types::FindPeersRequest;
use peermatch_directory::{ContactDirectory, Endpoint, RelationshipFilter};
use peermatch_domain::{Pattern, RelationshipTypeId, Role};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, warn};

/// The anchor's de-duplicated relationship patterns.
///
/// Read-only once extraction completes; the matcher shares it across
/// workers without further synchronization.
#[derive(Debug, Default)]
pub struct PatternSet {
    patterns: BTreeSet<Pattern>,
}

impl PatternSet {
    /// Whether extraction found no patterns. An empty set short-circuits
    /// the whole request to an empty result.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of distinct patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Iterate patterns in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    /// Pattern keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        self.patterns.iter().map(Pattern::key)
    }

    /// The anchor patterns a candidate observation satisfies.
    ///
    /// Role-sensitive lookups require the candidate to occupy the same
    /// role the anchor does; role-agnostic lookups accept a pattern
    /// with either role, so one observation can credit up to two
    /// patterns.
    pub fn hits(
        &self,
        type_id: RelationshipTypeId,
        subtype: &str,
        role: Role,
        match_roles: bool,
    ) -> Vec<&Pattern> {
        let roles: &[Role] = if match_roles {
            &[role]
        } else {
            &[Role::A, Role::B]
        };
        roles
            .iter()
            .filter_map(|candidate_role| {
                self.patterns.get(&Pattern {
                    type_id,
                    subtype: subtype.to_string(),
                    role: *candidate_role,
                })
            })
            .collect()
    }

    pub(crate) fn insert(&mut self, pattern: Pattern) {
        self.patterns.insert(pattern);
    }
}

/// Derive the anchor's patterns from its relationships and the subtypes
/// of the contacts at the other end.
///
/// A counterpart lookup failure skips that one relationship; discovery
/// is best-effort and one bad record must not abort it. A failure of
/// the anchor's own relationship fetch is fatal: without it the request
/// cannot even start.
pub(crate) async fn extract_patterns<D: ContactDirectory>(
    directory: &D,
    request: &FindPeersRequest,
    call_timeout: Duration,
) -> Result<PatternSet, EngineError> {
    let mut set = PatternSet::default();

    // No filter basis means no patterns, never "match everything".
    if request.relationship_type_ids.is_empty() || request.target_subtypes.is_empty() {
        return Ok(set);
    }

    let filter = RelationshipFilter {
        endpoint: Endpoint::Either(request.anchor),
        type_ids: request.relationship_type_ids.clone(),
        active_only: !request.include_inactive,
    };
    let relationships = remote::with_timeout(call_timeout, directory.get_relationships(&filter))
        .await
        .map_err(|e| EngineError::directory("Relationship", "get", e))?;

    for relationship in &relationships {
        let Some(role) = relationship.role_of(request.anchor) else {
            continue;
        };
        let Some(counterpart_id) = relationship.counterpart_of(request.anchor) else {
            continue;
        };

        let counterpart =
            match remote::with_timeout(call_timeout, directory.get_contact(counterpart_id)).await
            {
                Ok(Some(contact)) => contact,
                Ok(None) => {
                    debug!(%counterpart_id, "counterpart not found, skipping relationship");
                    continue;
                }
                Err(error) => {
                    warn!(%counterpart_id, %error, "counterpart lookup failed, skipping relationship");
                    continue;
                }
            };

        for subtype in &counterpart.subtypes {
            if request.target_subtypes.contains(subtype) {
                set.insert(Pattern {
                    type_id: relationship.type_id,
                    subtype: subtype.clone(),
                    role,
                });
            }
        }
    }

    debug!(patterns = set.len(), "pattern extraction complete");
    Ok(set)
}
