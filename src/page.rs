//! Pagination strategies: how the total count is obtained.

use tracing::debug;

use rosterq_query::{DataStore, Filter, Page, PageRequest, QueryResult};

use crate::dto::MemberTeamDto;
use crate::executor::RelationExecutor;

/// How `search_page` obtains the total matching row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountStrategy {
    /// Content and total in one combined retrieval. Cheapest in round
    /// trips, but the total counts *joined* rows: a left join whose key
    /// can match several related rows inflates it. Only safe when the
    /// join cannot multiply rows.
    Eager,
    /// Content first, then a separate distinct count query against the
    /// same predicate. Always accurate, always two round trips.
    Deferred,
    /// Like `Deferred`, but the count query is skipped whenever the
    /// fetched page proves itself to be the last one, in which case the
    /// total is computed arithmetically.
    ShortCircuit,
}

/// Execute a paged search with the chosen count strategy.
pub fn execute_page<S: DataStore>(
    executor: &RelationExecutor<S>,
    predicate: &Filter,
    request: &PageRequest,
    strategy: CountStrategy,
) -> QueryResult<Page<MemberTeamDto>> {
    request.validate()?;

    let page = match strategy {
        CountStrategy::Eager => {
            let (content, total) = executor.fetch_page_with_total(predicate, request)?;
            Page::new(content, *request, total)
        }
        CountStrategy::Deferred => {
            let content = executor.fetch_page(predicate, request)?;
            let total = executor.count(predicate)?;
            Page::new(content, *request, total)
        }
        CountStrategy::ShortCircuit => {
            let content = executor.fetch_page(predicate, request)?;
            let total = match infer_total(request, content.len()) {
                Some(total) => {
                    debug!(total, "count query skipped, last page proven");
                    total
                }
                None => executor.count(predicate)?,
            };
            Page::new(content, *request, total)
        }
    };

    debug!(
        strategy = ?strategy,
        rows = page.len(),
        total = page.total,
        "paged search"
    );
    Ok(page)
}

/// Infer the total from the fetched page, when the page proves it is the
/// last one.
///
/// - A partial first page (`offset == 0`, fewer rows than `limit`) holds
///   the whole result set: total is the page size.
/// - A non-empty partial page at a later offset is the final page: total
///   is `offset + len`.
/// - A full page, or an empty page at a non-zero offset, proves nothing;
///   the count must be queried.
pub(crate) fn infer_total(request: &PageRequest, content_len: usize) -> Option<u64> {
    let len = content_len as u64;
    if len >= request.limit {
        return None;
    }
    if request.offset == 0 {
        return Some(len);
    }
    if len > 0 {
        return Some(request.offset + len);
    }
    // Empty page past offset zero: the set ended somewhere before the
    // window, and only a count can say where.
    None
}
