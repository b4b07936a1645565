//! Per-candidate pattern matching

use crate::patterns::PatternSet;
use crate::remote;
use peermatch_directory::{ContactDirectory, Endpoint, RelationshipFilter};
use peermatch_domain::{
    Contact, ContactRef, MatchedRelationship, Pattern, RelationshipTypeId,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Everything one matching worker needs. The pattern set is frozen
/// before workers start, so sharing is plain `Arc` with no locking.
pub(crate) struct MatchContext<D> {
    pub directory: Arc<D>,
    pub patterns: Arc<PatternSet>,
    pub type_ids: Arc<Vec<RelationshipTypeId>>,
    pub include_inactive: bool,
    pub match_roles: bool,
    pub call_timeout: Duration,
}

impl<D> Clone for MatchContext<D> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            patterns: Arc::clone(&self.patterns),
            type_ids: Arc::clone(&self.type_ids),
            include_inactive: self.include_inactive,
            match_roles: self.match_roles,
            call_timeout: self.call_timeout,
        }
    }
}

/// Decide which anchor patterns this candidate satisfies.
///
/// Every failure here is per-unit: a failed relationship fetch leaves
/// the candidate with no matches, a failed counterpart or label lookup
/// skips that one relationship. Nothing propagates; sibling candidates
/// are unaffected.
pub(crate) async fn match_candidate<D: ContactDirectory>(
    ctx: &MatchContext<D>,
    candidate: &Contact,
) -> BTreeMap<String, MatchedRelationship> {
    let mut matched: BTreeMap<String, MatchedRelationship> = BTreeMap::new();

    let filter = RelationshipFilter {
        endpoint: Endpoint::Either(candidate.id),
        type_ids: ctx.type_ids.as_ref().clone(),
        active_only: !ctx.include_inactive,
    };
    let relationships = match remote::with_timeout(
        ctx.call_timeout,
        ctx.directory.get_relationships(&filter),
    )
    .await
    {
        Ok(relationships) => relationships,
        Err(error) => {
            warn!(candidate = %candidate.id, %error, "relationship lookup failed, candidate unmatched");
            return matched;
        }
    };

    for relationship in &relationships {
        let Some(role) = relationship.role_of(candidate.id) else {
            continue;
        };
        let Some(counterpart_id) = relationship.counterpart_of(candidate.id) else {
            continue;
        };

        let counterpart = match remote::with_timeout(
            ctx.call_timeout,
            ctx.directory.get_contact(counterpart_id),
        )
        .await
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

        let mut hits: Vec<&Pattern> = Vec::new();
        for subtype in &counterpart.subtypes {
            hits.extend(ctx.patterns.hits(relationship.type_id, subtype, role, ctx.match_roles));
        }
        if hits.is_empty() {
            continue;
        }

        // Resolve the label from the candidate's own endpoint so the
        // text reads naturally for the contact being described.
        let label = match remote::with_timeout(
            ctx.call_timeout,
            ctx.directory.get_relationship_type(relationship.type_id),
        )
        .await
        {
            Ok(Some(relationship_type)) => relationship_type.label_for(role).to_string(),
            Ok(None) => {
                debug!(type_id = %relationship.type_id, "relationship type not found, skipping");
                continue;
            }
            Err(error) => {
                warn!(type_id = %relationship.type_id, %error, "label lookup failed, skipping relationship");
                continue;
            }
        };

        for pattern in hits {
            // First relationship satisfying a pattern wins; later ones
            // earn no extra credit.
            matched.entry(pattern.key()).or_insert_with(|| MatchedRelationship {
                pattern_key: pattern.key(),
                relationship_id: relationship.id,
                relationship_type_id: relationship.type_id,
                label: label.clone(),
                role,
                subtype: pattern.subtype.clone(),
                counterpart: ContactRef::from(&counterpart),
                is_active: relationship.is_active,
                start_date: relationship.start_date.clone(),
                end_date: relationship.end_date.clone(),
            });
        }
    }

    matched
}
