//! Pagination primitives shared by the scanner and the result assembler

/// A caller-requested page of candidates.
///
/// `page` below 1 is clamped up, never rejected; `page_size` of zero is
/// rejected by request validation before any remote call is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u64,

    /// Number of candidates per page
    pub page_size: u64,
}

impl PageRequest {
    /// Create a page request, clamping `page` to a minimum of 1.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size,
        }
    }

    /// Offset into the candidate scan for this page.
    pub fn offset(&self) -> u64 {
        (self.page.max(1) - 1) * self.page_size
    }
}

/// Pagination metadata attached alongside (never inside) the peer list.
///
/// `total_count` bounds the *candidate pool* (type and deletion filter
/// only), not the number of eventual matches: matching requires an
/// unbounded auxiliary relationship lookup per candidate and is not
/// cheaply countable. Callers must not assume it bounds match counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// The (clamped) page that was scanned
    pub page: u64,

    /// Page size used for the scan
    pub page_size: u64,

    /// Size of the candidate pool; zero when counting was not requested
    pub total_count: u64,

    /// `ceil(total_count / page_size)`, zero when the pool is empty
    pub total_pages: u64,
}

impl PageInfo {
    /// Build metadata for a scanned page.
    pub fn new(page: PageRequest, total_count: u64) -> Self {
        let total_pages = if page.page_size > 0 {
            total_count.div_ceil(page.page_size)
        } else {
            0
        };
        Self {
            page: page.page.max(1),
            page_size: page.page_size,
            total_count,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_clamped_to_one() {
        let p = PageRequest::new(0, 10);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_offset_math() {
        assert_eq!(PageRequest::new(1, 25).offset(), 0);
        assert_eq!(PageRequest::new(2, 25).offset(), 25);
        assert_eq!(PageRequest::new(4, 10).offset(), 30);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let info = PageInfo::new(PageRequest::new(1, 10), 23);
        assert_eq!(info.total_pages, 3);
    }

    #[test]
    fn test_total_pages_empty_pool() {
        let info = PageInfo::new(PageRequest::new(1, 10), 0);
        assert_eq!(info.total_pages, 0);
    }

    #[test]
    fn test_total_pages_exact_multiple() {
        let info = PageInfo::new(PageRequest::new(2, 10), 30);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.page, 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: total_pages is the smallest page count covering the pool
        #[test]
        fn test_total_pages_covers_pool(total in 0u64..100_000, size in 1u64..1_000) {
            let info = PageInfo::new(PageRequest::new(1, size), total);
            prop_assert!(info.total_pages * size >= total);
            if info.total_pages > 0 {
                prop_assert!((info.total_pages - 1) * size < total);
            } else {
                prop_assert_eq!(total, 0);
            }
        }

        /// Property: offsets of consecutive pages differ by exactly one page size
        #[test]
        fn test_consecutive_page_offsets(page in 1u64..10_000, size in 1u64..1_000) {
            let a = PageRequest::new(page, size);
            let b = PageRequest::new(page + 1, size);
            prop_assert_eq!(b.offset() - a.offset(), size);
        }
    }
}
