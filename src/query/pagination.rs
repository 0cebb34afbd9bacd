//! Server-reported pagination metadata.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pagination metadata returned with a page of records.
///
/// Pages are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PaginationMeta {
    /// The page these records belong to.
    pub page: u32,
    /// Number of records per page.
    pub limit: u32,
    /// Total number of records across all pages.
    pub total: u64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Creates metadata, deriving `has_next` / `has_prev` from the totals.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use admin_query::query::PaginationMeta;
    ///
    /// let meta = PaginationMeta::new(2, 50, 120);
    /// assert!(meta.has_next);
    /// assert!(meta.has_prev);
    /// assert_eq!(meta.last_page(), 3);
    /// ```
    #[must_use]
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let mut meta = Self {
            page,
            limit,
            total,
            has_next: false,
            has_prev: page > 1,
        };
        meta.has_next = page < meta.last_page();
        meta
    }

    /// Returns the number of the last page. An empty result still has page 1.
    #[must_use]
    pub fn last_page(&self) -> u32 {
        if self.limit == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(u64::from(self.limit)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Returns `true` if `page` exists under this metadata.
    #[must_use]
    pub fn contains(&self, page: u32) -> bool {
        (1..=self.last_page()).contains(&page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100, 10, 10)]
    #[case(101, 10, 11)]
    #[case(0, 10, 1)]
    #[case(5, 0, 1)]
    fn test_last_page(#[case] total: u64, #[case] limit: u32, #[case] expected: u32) {
        assert_eq!(PaginationMeta::new(1, limit, total).last_page(), expected);
    }

    #[rstest]
    fn test_new_derives_navigation_flags() {
        let first = PaginationMeta::new(1, 10, 100);
        assert!(first.has_next);
        assert!(!first.has_prev);

        let last = PaginationMeta::new(10, 10, 100);
        assert!(!last.has_next);
        assert!(last.has_prev);
    }

    #[rstest]
    fn test_contains() {
        let meta = PaginationMeta::new(1, 50, 120);
        assert!(!meta.contains(0));
        assert!(meta.contains(1));
        assert!(meta.contains(3));
        assert!(!meta.contains(4));
    }
}
