//! Candidate scanning - enumerating the contacts to evaluate

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::remote;
use crate::types::FindPeersRequest;
use peermatch_directory::{ContactDirectory, ContactQuery};
use peermatch_domain::{Contact, PageRequest};
use tracing::debug;

/// One scanned page (or the whole pool) of candidates, plus what the
/// assembler needs to describe it.
pub(crate) struct ScanOutcome {
    /// Candidates in scan order, anchor already excluded
    pub candidates: Vec<Contact>,

    /// Candidate-pool size, when counting was requested. Independent of
    /// relationship matching: it bounds the scan, not the match count.
    pub total_count: Option<u64>,

    /// The clamped page that was scanned, when pagination was on
    pub page: Option<PageRequest>,
}

/// Fetch candidates from the directory: filtered by contact type,
/// soft-deleted records excluded, ordered by sort_name, anchor removed.
pub(crate) async fn scan_candidates<D: ContactDirectory>(
    directory: &D,
    request: &FindPeersRequest,
    config: &EngineConfig,
) -> Result<ScanOutcome, EngineError> {
    let call_timeout = config.call_timeout();
    let types = if request.contact_types.is_empty() {
        config.default_contact_types.clone()
    } else {
        request.contact_types.clone()
    };

    let page = request
        .pagination
        .map(|p| PageRequest::new(p.page, p.page_size));

    let total_count = match &page {
        Some(_) if request.count_total => {
            let count = remote::with_timeout(call_timeout, directory.count_contacts(&types))
                .await
                .map_err(|e| EngineError::directory("Contact", "getcount", e))?;
            Some(count)
        }
        _ => None,
    };

    let mut query = ContactQuery::of_types(types);
    if let Some(page) = &page {
        query = query.paged(page.page_size, page.offset());
    } else if request.limit > 0 {
        query = query.paged(request.limit, 0);
    }

    let contacts = remote::with_timeout(call_timeout, directory.list_contacts(&query))
        .await
        .map_err(|e| EngineError::directory("Contact", "get", e))?;

    // The anchor is never a peer of itself.
    let candidates: Vec<Contact> = contacts
        .into_iter()
        .filter(|c| c.id != request.anchor)
        .collect();

    debug!(
        candidates = candidates.len(),
        total = ?total_count,
        "candidate scan complete"
    );
    Ok(ScanOutcome {
        candidates,
        total_count,
        page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use peermatch_directory::MemoryDirectory;
    use peermatch_domain::ContactId;

    fn individual(id: u64, sort_name: &str) -> Contact {
        Contact {
            id: ContactId::new(id),
            display_name: sort_name.to_string(),
            sort_name: sort_name.to_string(),
            email: None,
            contact_type: "Individual".to_string(),
            subtypes: vec![],
        }
    }

    fn directory_with(names: &[(u64, &str)]) -> MemoryDirectory {
        let mut directory = MemoryDirectory::new();
        for (id, name) in names {
            directory = directory.with_contact(individual(*id, name));
        }
        directory
    }

    #[tokio::test]
    async fn test_anchor_excluded_from_candidates() {
        let directory = directory_with(&[(1, "Aa"), (2, "Bb"), (3, "Cc")]);
        let request = FindPeersRequest::new(ContactId::new(2));

        let scan = scan_candidates(&directory, &request, &EngineConfig::default())
            .await
            .unwrap();
        let ids: Vec<_> = scan.candidates.iter().map(|c| c.id.value()).collect();
        assert_eq!(ids, [1, 3]);
    }

    #[tokio::test]
    async fn test_page_below_one_clamped() {
        let directory = directory_with(&[(1, "Aa"), (2, "Bb")]);
        let request = FindPeersRequest {
            pagination: Some(PageRequest::new(0, 10)),
            ..FindPeersRequest::new(ContactId::new(99))
        };

        let scan = scan_candidates(&directory, &request, &EngineConfig::default())
            .await
            .unwrap();
        assert_eq!(scan.page.unwrap().page, 1);
        assert_eq!(scan.candidates.len(), 2);
    }

    #[tokio::test]
    async fn test_count_covers_pool_not_matches() {
        let directory = directory_with(&[(1, "Aa"), (2, "Bb"), (3, "Cc")]);
        let request = FindPeersRequest {
            pagination: Some(PageRequest::new(1, 2)),
            ..FindPeersRequest::new(ContactId::new(1))
        };

        let scan = scan_candidates(&directory, &request, &EngineConfig::default())
            .await
            .unwrap();
        // Pool count includes the anchor; the scan itself excludes it.
        assert_eq!(scan.total_count, Some(3));
        assert_eq!(scan.candidates.len(), 1);
    }

    #[tokio::test]
    async fn test_no_count_when_disabled() {
        let directory = directory_with(&[(1, "Aa")]);
        let request = FindPeersRequest {
            pagination: Some(PageRequest::new(1, 10)),
            count_total: false,
            ..FindPeersRequest::new(ContactId::new(99))
        };

        let scan = scan_candidates(&directory, &request, &EngineConfig::default())
            .await
            .unwrap();
        assert_eq!(scan.total_count, None);
        assert_eq!(directory.count_calls(), 0);
    }

    #[tokio::test]
    async fn test_unpaginated_limit_caps_scan() {
        let directory = directory_with(&[(1, "Aa"), (2, "Bb"), (3, "Cc")]);
        let request = FindPeersRequest {
            limit: 2,
            ..FindPeersRequest::new(ContactId::new(99))
        };

        let scan = scan_candidates(&directory, &request, &EngineConfig::default())
            .await
            .unwrap();
        assert_eq!(scan.candidates.len(), 2);
        assert!(scan.page.is_none());
    }
}
