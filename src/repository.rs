//! The caller-facing member search repository.

use tracing::debug;

use rosterq_query::{
    DataStore, NullsOrder, OrderBy, OrderByField, Page, PageRequest, QueryResult,
};

use crate::condition::MemberSearchCondition;
use crate::dto::MemberTeamDto;
use crate::entity::member;
use crate::executor::RelationExecutor;
use crate::page::{self, CountStrategy};

/// Dynamic-filter search over members and their teams.
///
/// Stateless and reentrant: every call composes its own predicate and
/// owns no connection or transaction state, so concurrent callers with
/// different conditions never interfere.
///
/// ```rust
/// use rosterq::{MemberSearchCondition, MemberSearchRepository, Member, Team};
/// use rosterq_memory::MemoryStore;
///
/// let mut store = MemoryStore::new();
/// store.insert("team", Team::new(1, "teamA").into_row());
/// store.insert("member", Member::new(1, "member1", 10, Some(1)).into_row());
///
/// let repository = MemberSearchRepository::new(store);
/// let rows = repository
///     .search(&MemberSearchCondition::new().age_loe(15))
///     .unwrap();
/// assert_eq!(rows.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MemberSearchRepository<S> {
    executor: RelationExecutor<S>,
}

impl<S: DataStore> MemberSearchRepository<S> {
    /// Create a repository over the given store, inner-joining teams.
    pub fn new(store: S) -> Self {
        Self {
            executor: RelationExecutor::new(store),
        }
    }

    /// Create a repository with a preconfigured executor (join kind and
    /// fetch mode chosen by the caller).
    pub fn with_executor(executor: RelationExecutor<S>) -> Self {
        Self { executor }
    }

    /// The underlying executor.
    pub fn executor(&self) -> &RelationExecutor<S> {
        &self.executor
    }

    /// All rows matching the condition, via the fixed-arity composer.
    ///
    /// A condition with no present criteria matches every row.
    pub fn search(&self, condition: &MemberSearchCondition) -> QueryResult<Vec<MemberTeamDto>> {
        let filter = condition.to_filter();
        debug!(filter = ?filter, "search");
        self.executor.fetch_all(&filter)
    }

    /// All rows matching the condition, via the accumulator fold.
    ///
    /// Identical results to [`search`](Self::search) for every
    /// condition; both shapes share one composer.
    pub fn search_by_builder(
        &self,
        condition: &MemberSearchCondition,
    ) -> QueryResult<Vec<MemberTeamDto>> {
        let filter = condition.to_filter_folded();
        debug!(filter = ?filter, "search (builder shape)");
        self.executor.fetch_all(&filter)
    }

    /// All rows matching the condition, age descending, username
    /// ascending with unnamed members last.
    pub fn search_sorted(
        &self,
        condition: &MemberSearchCondition,
    ) -> QueryResult<Vec<MemberTeamDto>> {
        let order = OrderBy::from(OrderByField::desc(member::AGE))
            .then(OrderByField::asc(member::USERNAME).nulls(NullsOrder::Last));
        self.executor
            .fetch_all_ordered(&condition.to_filter(), order)
    }

    /// Exactly one row or none; ambiguous matches are an error.
    pub fn search_one(
        &self,
        condition: &MemberSearchCondition,
    ) -> QueryResult<Option<MemberTeamDto>> {
        self.executor.fetch_one(&condition.to_filter())
    }

    /// The first matching row, if any.
    pub fn search_first(
        &self,
        condition: &MemberSearchCondition,
    ) -> QueryResult<Option<MemberTeamDto>> {
        self.executor.fetch_first(&condition.to_filter())
    }

    /// All rows for an exact username.
    ///
    /// The equality is unconditional: a blank username is compared
    /// verbatim, not relaxed into match-all like the optional search
    /// criteria.
    pub fn find_by_username(&self, username: &str) -> QueryResult<Vec<MemberTeamDto>> {
        let filter = rosterq_query::Filter::equals(member::USERNAME, username);
        self.executor.fetch_all(&filter)
    }

    /// One page of matching rows with a total count obtained per the
    /// chosen strategy.
    pub fn search_page(
        &self,
        condition: &MemberSearchCondition,
        request: &PageRequest,
        strategy: CountStrategy,
    ) -> QueryResult<Page<MemberTeamDto>> {
        page::execute_page(&self.executor, &condition.to_filter(), request, strategy)
    }
}
