//! Offset-based pagination types for query results.
//!
//! ```rust
//! use rosterq_query::PageRequest;
//!
//! // Third page of 25 rows (pages are 0-indexed).
//! let request = PageRequest::of(2, 25);
//! assert_eq!(request.offset, 50);
//! assert_eq!(request.limit, 25);
//! assert_eq!(request.to_sql(), "LIMIT 25 OFFSET 50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::error::{QueryError, QueryResult};

/// A bounded window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of rows to skip.
    pub offset: u64,
    /// Maximum number of rows in the page. Must be positive.
    pub limit: u64,
}

impl PageRequest {
    /// Create a page request from a raw offset and limit.
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Create a request for a page (0-indexed) of `size` rows.
    pub fn of(page: u64, size: u64) -> Self {
        Self::new(page.saturating_mul(size), size)
    }

    /// Request for the first `n` rows.
    pub fn first(n: u64) -> Self {
        Self::new(0, n)
    }

    /// Validate the request; a zero limit is rejected.
    pub fn validate(&self) -> QueryResult<()> {
        if self.limit == 0 {
            return Err(QueryError::invalid_page("page limit must be positive"));
        }
        Ok(())
    }

    /// Generate the SQL LIMIT/OFFSET clause.
    pub fn to_sql(&self) -> String {
        let mut sql = String::with_capacity(28);
        let _ = write!(sql, "LIMIT {}", self.limit);
        if self.offset > 0 {
            let _ = write!(sql, " OFFSET {}", self.offset);
        }
        sql
    }
}

/// One page of results together with the total matching row count.
///
/// Invariants: `content.len() <= request.limit`, and when
/// `total <= request.offset` the content is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The rows of this page, in query order.
    pub content: Vec<T>,
    /// Total number of matching rows across all pages.
    pub total: u64,
    /// The request this page answers.
    pub request: PageRequest,
}

impl<T> Page<T> {
    /// Create a new page.
    pub fn new(content: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            content,
            total,
            request,
        }
    }

    /// Number of rows in this page.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the page holds no rows.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of pages needed for the full result set.
    pub fn total_pages(&self) -> u64 {
        if self.request.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.request.limit)
    }

    /// Whether rows exist past this page.
    pub fn has_next(&self) -> bool {
        self.request.offset + (self.content.len() as u64) < self.total
    }

    /// Whether rows exist before this page.
    pub fn has_previous(&self) -> bool {
        self.request.offset > 0
    }

    /// Map the page content, keeping request and total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_of() {
        let request = PageRequest::of(3, 10);
        assert_eq!(request.offset, 30);
        assert_eq!(request.limit, 10);
    }

    #[test]
    fn test_page_request_sql() {
        assert_eq!(PageRequest::new(10, 20).to_sql(), "LIMIT 20 OFFSET 10");
        assert_eq!(PageRequest::first(5).to_sql(), "LIMIT 5");
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let err = PageRequest::new(0, 0).validate().unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::InvalidPage);
    }

    #[test]
    fn test_page_metadata() {
        let page = Page::new(vec![1, 2, 3], PageRequest::new(0, 3), 7);
        assert_eq!(page.len(), 3);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page = Page::new(vec![7], PageRequest::new(6, 3), 7);
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_full_final_page_has_no_next() {
        // offset + len lands exactly on the total.
        let page = Page::new(vec![1, 2, 3], PageRequest::new(4, 3), 7);
        assert!(!page.has_next());
        let page = Page::new(vec![1, 2, 3], PageRequest::new(0, 3), 3);
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2], PageRequest::new(0, 10), 2).map(|v| v * 10);
        assert_eq!(page.content, vec![10, 20]);
        assert_eq!(page.total, 2);
    }
}
