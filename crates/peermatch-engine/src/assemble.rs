//! Result assembly - the peer list and its pagination metadata

use crate::scan::ScanOutcome;
use crate::types::FindPeersResponse;
use peermatch_domain::{PageInfo, PeerResult};

/// Build the response from the accepted candidates, preserving scan
/// order. Metadata is attached as a sibling of the list, so a peer
/// record is always a literal contact result, and omitted entirely when
/// pagination was off.
pub(crate) fn assemble(accepted: Vec<PeerResult>, scan: &ScanOutcome) -> FindPeersResponse {
    let page_info = scan
        .page
        .map(|page| PageInfo::new(page, scan.total_count.unwrap_or(0)));
    FindPeersResponse {
        peers: accepted,
        page_info,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peermatch_domain::PageRequest;

    fn scan(page: Option<PageRequest>, total_count: Option<u64>) -> ScanOutcome {
        ScanOutcome {
            candidates: vec![],
            total_count,
            page,
        }
    }

    #[test]
    fn test_metadata_math() {
        let response = assemble(vec![], &scan(Some(PageRequest::new(2, 10)), Some(23)));
        let info = response.page_info.unwrap();
        assert_eq!(info.page, 2);
        assert_eq!(info.page_size, 10);
        assert_eq!(info.total_count, 23);
        assert_eq!(info.total_pages, 3);
    }

    #[test]
    fn test_metadata_omitted_without_pagination() {
        let response = assemble(vec![], &scan(None, None));
        assert!(response.page_info.is_none());
    }

    #[test]
    fn test_uncounted_page_reports_zero() {
        let response = assemble(vec![], &scan(Some(PageRequest::new(1, 10)), None));
        let info = response.page_info.unwrap();
        assert_eq!(info.total_count, 0);
        assert_eq!(info.total_pages, 0);
    }
}
