//! Execution of composed predicates against the joined member relation.

use tracing::debug;

use rosterq_query::{
    CountQuery, DataStore, FetchMode, Filter, Join, JoinKind, OrderBy, OrderByField, PageRequest,
    QueryError, QueryResult, RelationQuery,
};

use crate::dto::MemberTeamDto;
use crate::entity::{member, team};

/// Executes read queries over `member` joined to `team`.
///
/// The executor is stateless per call: it builds one [`RelationQuery`]
/// per fetch, hands it to the store, and materializes
/// [`MemberTeamDto`] rows. Join kind (inner/left) and fetch mode
/// (plain/fetch-join) are fixed at construction; the configured fetch
/// mode is also echoed back by the engine, since eager materialization
/// changes collaborator-visible behavior.
#[derive(Debug, Clone)]
pub struct RelationExecutor<S> {
    store: S,
    join_kind: JoinKind,
    fetch_mode: FetchMode,
}

impl<S: DataStore> RelationExecutor<S> {
    /// Create an executor with an inner, lazily fetched join.
    pub fn new(store: S) -> Self {
        Self {
            store,
            join_kind: JoinKind::Inner,
            fetch_mode: FetchMode::Lazy,
        }
    }

    /// Use a left join instead of the default inner join.
    pub fn left_join(mut self) -> Self {
        self.join_kind = JoinKind::Left;
        self
    }

    /// Use a fetch-join: the team side is materialized eagerly.
    pub fn fetch_join(mut self) -> Self {
        self.fetch_mode = FetchMode::Eager;
        self
    }

    /// The join fetch mode this executor issues.
    pub fn fetch_mode(&self) -> FetchMode {
        self.fetch_mode
    }

    fn join(&self) -> Join {
        let join = match self.join_kind {
            JoinKind::Inner => Join::inner(team::RELATION, member::TEAM_ID, team::ID),
            JoinKind::Left => Join::left(team::RELATION, member::TEAM_ID, team::ID),
        };
        match self.fetch_mode {
            FetchMode::Eager => join.fetch_join(),
            FetchMode::Lazy => join,
        }
    }

    fn base_query(&self, predicate: &Filter) -> RelationQuery {
        RelationQuery::from(member::RELATION)
            .join(self.join())
            .select(MemberTeamDto::projection())
            .r#where(predicate.clone())
    }

    fn materialize(&self, query: &RelationQuery) -> QueryResult<Vec<MemberTeamDto>> {
        let result = self.store.fetch(query)?;
        result.rows.iter().map(MemberTeamDto::from_row).collect()
    }

    /// All matching rows, in engine order.
    pub fn fetch_all(&self, predicate: &Filter) -> QueryResult<Vec<MemberTeamDto>> {
        self.materialize(&self.base_query(predicate))
    }

    /// All matching rows in the given order.
    pub fn fetch_all_ordered(
        &self,
        predicate: &Filter,
        order: impl Into<OrderBy>,
    ) -> QueryResult<Vec<MemberTeamDto>> {
        self.materialize(&self.base_query(predicate).order_by(order))
    }

    /// Exactly one row or none.
    ///
    /// More than one matching row is caller misuse and fails with
    /// [`ErrorCode::NotUnique`](rosterq_query::ErrorCode::NotUnique); it
    /// is not retryable. Zero rows is a normal outcome, returned as
    /// `Ok(None)`.
    pub fn fetch_one(
        &self,
        predicate: &Filter,
    ) -> QueryResult<Option<MemberTeamDto>> {
        // Limit 2 is enough to detect ambiguity without draining the set.
        let mut rows = self.materialize(&self.base_query(predicate).limit(2))?;
        if rows.len() > 1 {
            return Err(QueryError::not_unique(member::RELATION));
        }
        Ok(rows.pop())
    }

    /// The first matching row, never ambiguous.
    pub fn fetch_first(
        &self,
        predicate: &Filter,
    ) -> QueryResult<Option<MemberTeamDto>> {
        let mut rows = self.materialize(&self.base_query(predicate).limit(1))?;
        Ok(rows.pop())
    }

    /// One page of matching rows in a stable order.
    ///
    /// The member id is appended as a tiebreaker so pagination is
    /// deterministic across calls even when the caller ordering leaves
    /// ties.
    pub fn fetch_page(
        &self,
        predicate: &Filter,
        request: &PageRequest,
    ) -> QueryResult<Vec<MemberTeamDto>> {
        request.validate()?;
        self.materialize(
            &self
                .base_query(predicate)
                .order_by(page_order(OrderBy::none()))
                .offset(request.offset)
                .limit(request.limit),
        )
    }

    /// One page plus the engine's joined row total from the same round
    /// trip. The total counts *joined* rows: under a duplicating left
    /// join it is inflated.
    pub fn fetch_page_with_total(
        &self,
        predicate: &Filter,
        request: &PageRequest,
    ) -> QueryResult<(Vec<MemberTeamDto>, u64)> {
        request.validate()?;
        let query = self
            .base_query(predicate)
            .order_by(page_order(OrderBy::none()))
            .offset(request.offset)
            .limit(request.limit)
            .with_total();

        let result = self.store.fetch(&query)?;
        let total = result.total.ok_or_else(|| {
            QueryError::store_failure("engine did not return the requested total")
        })?;
        let rows: Vec<MemberTeamDto> = result
            .rows
            .iter()
            .map(MemberTeamDto::from_row)
            .collect::<QueryResult<_>>()?;

        debug!(rows = rows.len(), total, "eager page fetch");
        Ok((rows, total))
    }

    /// Count matching members with an independent count query.
    ///
    /// Counts distinct member ids over the same join kind the content
    /// queries use, so the total stays correct when the join multiplies
    /// rows and never includes members an inner join would drop.
    pub fn count(&self, predicate: &Filter) -> QueryResult<u64> {
        let join = match self.join_kind {
            JoinKind::Inner => Join::inner(team::RELATION, member::TEAM_ID, team::ID),
            JoinKind::Left => Join::left(team::RELATION, member::TEAM_ID, team::ID),
        };
        self.store.count(
            &CountQuery::from(member::RELATION)
                .join(join)
                .r#where(predicate.clone())
                .distinct(member::ID),
        )
    }
}

/// Append the member-id tiebreaker to a caller ordering.
fn page_order(order: OrderBy) -> OrderBy {
    order.then(OrderByField::asc(member::ID))
}
