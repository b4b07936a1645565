//! Request and response types for `find_peers`

use crate::error::EngineError;
use peermatch_domain::{ContactId, PageInfo, PageRequest, PeerResult, RelationshipTypeId};

/// One peer-discovery request.
///
/// The anchor is passed explicitly; the engine never resolves a
/// "current user" on its own. If `relationship_type_ids` or
/// `target_subtypes` is empty the result is empty by contract; there is
/// no filter basis, so nothing can match.
#[derive(Debug, Clone)]
pub struct FindPeersRequest {
    /// The contact whose peers are being discovered
    pub anchor: ContactId,

    /// Relationship types that form patterns
    pub relationship_type_ids: Vec<RelationshipTypeId>,

    /// Counterpart subtypes that form patterns
    pub target_subtypes: Vec<String>,

    /// Candidate contact types; empty means the engine default
    pub contact_types: Vec<String>,

    /// Include inactive relationships in extraction and matching
    pub include_inactive: bool,

    /// All-of inclusion: a candidate must satisfy every anchor pattern.
    /// The default (false) includes candidates matching any pattern.
    pub require_all_patterns: bool,

    /// Role-sensitive matching: a candidate must occupy the same
    /// endpoint role as the anchor's pattern. When false, role is
    /// ignored for lookup but still recorded in the evidence.
    pub match_roles: bool,

    /// Cap on candidates scanned when pagination is off; 0 means all
    pub limit: u64,

    /// Scan one page instead of the whole candidate pool
    pub pagination: Option<PageRequest>,

    /// Compute candidate-pool metadata counts (pagination only)
    pub count_total: bool,
}

impl FindPeersRequest {
    /// A request with the documented defaults: individual candidates,
    /// active relationships only, any-of inclusion, role-agnostic
    /// matching, no pagination.
    pub fn new(anchor: ContactId) -> Self {
        Self {
            anchor,
            relationship_type_ids: Vec::new(),
            target_subtypes: Vec::new(),
            contact_types: vec!["Individual".to_string()],
            include_inactive: false,
            require_all_patterns: false,
            match_roles: false,
            limit: 0,
            pagination: None,
            count_total: true,
        }
    }

    /// Reject malformed input before any remote call is made. Page
    /// numbers below 1 are clamped later, not rejected here.
    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        if self.anchor.value() == 0 {
            return Err(EngineError::InvalidRequest(
                "anchor contact id is required".to_string(),
            ));
        }
        if let Some(page) = &self.pagination {
            if page.page_size == 0 {
                return Err(EngineError::InvalidRequest(
                    "page_size must be at least 1 when pagination is enabled".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// The peer list plus, when pagination was requested, its metadata.
///
/// Metadata is a sibling of the list, never interleaved with it, so a
/// record in `peers` is always a literal contact result.
#[derive(Debug, Clone, Default)]
pub struct FindPeersResponse {
    /// Accepted candidates in scan order (sort_name ascending)
    pub peers: Vec<PeerResult>,

    /// Pagination metadata; `None` when pagination was off or the
    /// request short-circuited before the scan
    pub page_info: Option<PageInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = FindPeersRequest::new(ContactId::new(7));
        assert_eq!(request.contact_types, vec!["Individual".to_string()]);
        assert!(!request.include_inactive);
        assert!(!request.require_all_patterns);
        assert!(!request.match_roles);
        assert!(request.count_total);
        assert!(request.pagination.is_none());
    }

    #[test]
    fn test_zero_anchor_rejected() {
        let request = FindPeersRequest::new(ContactId::new(0));
        assert!(matches!(
            request.validate(),
            Err(EngineError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let request = FindPeersRequest {
            pagination: Some(PageRequest::new(1, 0)),
            ..FindPeersRequest::new(ContactId::new(7))
        };
        assert!(matches!(
            request.validate(),
            Err(EngineError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_low_page_not_rejected() {
        let request = FindPeersRequest {
            pagination: Some(PageRequest::new(0, 10)),
            ..FindPeersRequest::new(ContactId::new(7))
        };
        assert!(request.validate().is_ok());
    }
}
