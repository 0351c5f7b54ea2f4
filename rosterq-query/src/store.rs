//! The execution contract between the search layer and a data store.
//!
//! The search core never talks to a concrete database. It describes what
//! it wants — a source relation, an optional join, a predicate, ordering
//! and a row window — as a [`RelationQuery`] or [`CountQuery`] and hands
//! it to a [`DataStore`]. Connection scoping, transactions and SQL
//! generation are entirely the engine's concern; failures come back
//! verbatim as [`ErrorCode::StoreFailure`](crate::ErrorCode::StoreFailure)
//! errors and are never retried here.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::filter::{FieldName, Filter, FilterValue};
use crate::types::OrderBy;

/// How a join is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinKind {
    /// Inner join: unmatched source rows are dropped.
    Inner,
    /// Left join: unmatched source rows are kept with null join columns.
    Left,
}

/// How the joined side is materialized.
///
/// Engines echo the mode back in [`FetchResult`] because it changes a
/// collaborator's visible behavior: an eager fetch-join loads related
/// rows in the same round trip, a lazy plain join defers them to the
/// surrounding persistence runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FetchMode {
    /// Fetch-join: related rows are loaded in the same round trip.
    Eager,
    /// Plain join: related rows load on first access, outside this core.
    Lazy,
}

/// A join from the source relation to one related relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Join {
    /// Name of the related relation.
    pub target: FieldName,
    /// Inner or left.
    pub kind: JoinKind,
    /// Eager fetch-join or lazy plain join.
    pub fetch: FetchMode,
    /// Join key column on the source relation (namespaced).
    pub source_key: FieldName,
    /// Join key column on the target relation (namespaced).
    pub target_key: FieldName,
}

impl Join {
    /// Create an inner, lazily fetched join.
    pub fn inner(
        target: impl Into<FieldName>,
        source_key: impl Into<FieldName>,
        target_key: impl Into<FieldName>,
    ) -> Self {
        Self {
            target: target.into(),
            kind: JoinKind::Inner,
            fetch: FetchMode::Lazy,
            source_key: source_key.into(),
            target_key: target_key.into(),
        }
    }

    /// Create a left, lazily fetched join.
    pub fn left(
        target: impl Into<FieldName>,
        source_key: impl Into<FieldName>,
        target_key: impl Into<FieldName>,
    ) -> Self {
        Self {
            kind: JoinKind::Left,
            ..Self::inner(target, source_key, target_key)
        }
    }

    /// Turn this into a fetch-join.
    pub fn fetch_join(mut self) -> Self {
        self.fetch = FetchMode::Eager;
        self
    }
}

/// One projected row: an ordered column-name to value map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    columns: IndexMap<FieldName, FilterValue>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column insertion.
    pub fn with(mut self, column: impl Into<FieldName>, value: impl Into<FilterValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Insert a column value.
    pub fn insert(&mut self, column: impl Into<FieldName>, value: impl Into<FilterValue>) {
        self.columns.insert(column.into(), value.into());
    }

    /// Look up a column value. Missing columns return `None`.
    pub fn get(&self, column: &str) -> Option<&FilterValue> {
        self.columns.get(column)
    }

    /// Iterate columns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &FilterValue)> {
        self.columns.iter()
    }

    /// Keep only the named columns, in the given order.
    pub fn project(&self, columns: &[FieldName]) -> Row {
        let mut projected = Row::new();
        for column in columns {
            let value = self.get(column).cloned().unwrap_or(FilterValue::Null);
            projected.insert(column.clone(), value);
        }
        projected
    }

    /// Required integer column.
    pub fn get_i64(&self, column: &str) -> QueryResult<i64> {
        match self.get(column) {
            Some(FilterValue::Int(v)) => Ok(*v),
            Some(_) => Err(QueryError::type_mismatch(column, "an integer")),
            None => Err(QueryError::column_not_found(column)),
        }
    }

    /// Nullable integer column.
    pub fn get_opt_i64(&self, column: &str) -> QueryResult<Option<i64>> {
        match self.get(column) {
            Some(FilterValue::Int(v)) => Ok(Some(*v)),
            Some(FilterValue::Null) | None => Ok(None),
            Some(_) => Err(QueryError::type_mismatch(column, "an integer")),
        }
    }

    /// Required string column.
    pub fn get_str(&self, column: &str) -> QueryResult<&str> {
        match self.get(column) {
            Some(FilterValue::String(s)) => Ok(s),
            Some(_) => Err(QueryError::type_mismatch(column, "a string")),
            None => Err(QueryError::column_not_found(column)),
        }
    }

    /// Nullable string column.
    pub fn get_opt_str(&self, column: &str) -> QueryResult<Option<&str>> {
        match self.get(column) {
            Some(FilterValue::String(s)) => Ok(Some(s)),
            Some(FilterValue::Null) | None => Ok(None),
            Some(_) => Err(QueryError::type_mismatch(column, "a string")),
        }
    }
}

/// A read query over a source relation with an optional join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationQuery {
    /// Name of the source relation.
    pub source: FieldName,
    /// Optional join to a related relation.
    pub join: Option<Join>,
    /// Columns to project (namespaced); empty means all.
    pub projection: Vec<FieldName>,
    /// The composed predicate; `Filter::None` matches every row.
    pub predicate: Filter,
    /// Row ordering; empty means engine order.
    pub order: OrderBy,
    /// Rows to skip.
    pub offset: Option<u64>,
    /// Maximum rows to return.
    pub limit: Option<u64>,
    /// Ask the engine for the pre-window matching row count in the same
    /// round trip. The count is over *joined* rows, so a duplicating
    /// left join inflates it.
    pub with_total: bool,
}

impl RelationQuery {
    /// Start a query over the named source relation.
    pub fn from(source: impl Into<FieldName>) -> Self {
        Self {
            source: source.into(),
            join: None,
            projection: Vec::new(),
            predicate: Filter::None,
            order: OrderBy::none(),
            offset: None,
            limit: None,
            with_total: false,
        }
    }

    /// Attach a join.
    pub fn join(mut self, join: Join) -> Self {
        self.join = Some(join);
        self
    }

    /// Set the projected columns.
    pub fn select(mut self, columns: impl IntoIterator<Item = impl Into<FieldName>>) -> Self {
        self.projection = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the predicate, replacing any previous one.
    pub fn r#where(mut self, predicate: Filter) -> Self {
        self.predicate = predicate;
        self
    }

    /// Set the ordering.
    pub fn order_by(mut self, order: impl Into<OrderBy>) -> Self {
        self.order = order.into();
        self
    }

    /// Set the row offset.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the row limit.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Request the joined total count alongside the rows.
    pub fn with_total(mut self) -> Self {
        self.with_total = true;
        self
    }
}

/// An independent count query: predicate only, no window or projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountQuery {
    /// Name of the source relation.
    pub source: FieldName,
    /// Optional join, needed when the predicate references join columns.
    pub join: Option<Join>,
    /// The composed predicate.
    pub predicate: Filter,
    /// Count distinct values of this source key instead of joined rows;
    /// this is what keeps a duplicating join from inflating the total.
    pub distinct_key: Option<FieldName>,
}

impl CountQuery {
    /// Start a count over the named source relation.
    pub fn from(source: impl Into<FieldName>) -> Self {
        Self {
            source: source.into(),
            join: None,
            predicate: Filter::None,
            distinct_key: None,
        }
    }

    /// Attach a join.
    pub fn join(mut self, join: Join) -> Self {
        self.join = Some(join);
        self
    }

    /// Set the predicate.
    pub fn r#where(mut self, predicate: Filter) -> Self {
        self.predicate = predicate;
        self
    }

    /// Count distinct values of the given source key column.
    pub fn distinct(mut self, key: impl Into<FieldName>) -> Self {
        self.distinct_key = Some(key.into());
        self
    }
}

/// Rows returned by a fetch, plus optional total and the join fetch mode.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    /// The projected rows, post ordering and windowing.
    pub rows: Vec<Row>,
    /// Pre-window joined row count, present iff `with_total` was set.
    pub total: Option<u64>,
    /// The fetch mode the engine actually used.
    pub fetch_mode: FetchMode,
}

/// The retrieval contract a data store engine implements.
///
/// Implementations are read-only here: the search core never starts,
/// commits or rolls back a transaction, and never retries a failed call.
pub trait DataStore {
    /// Execute a relation query and materialize the matching rows.
    fn fetch(&self, query: &RelationQuery) -> QueryResult<FetchResult>;

    /// Execute an independent count for the query's predicate.
    fn count(&self, query: &CountQuery) -> QueryResult<u64>;
}

impl<S: DataStore + ?Sized> DataStore for &S {
    fn fetch(&self, query: &RelationQuery) -> QueryResult<FetchResult> {
        (**self).fetch(query)
    }

    fn count(&self, query: &CountQuery) -> QueryResult<u64> {
        (**self).count(query)
    }
}
