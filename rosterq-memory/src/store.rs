//! The in-memory table store and its `DataStore` implementation.

use indexmap::IndexMap;
use tracing::debug;

use rosterq_query::{
    CountQuery, DataStore, FetchMode, FetchResult, FieldName, FilterValue, Join, JoinKind,
    QueryError, QueryResult, RelationQuery, Row,
};

use crate::eval;
use crate::sort;

/// An in-memory collection of named relations.
///
/// Rows are stored with plain column names (`id`, `username`); query
/// results namespace every column with its relation name
/// (`member.username`, `team.name`), which is the vocabulary predicates
/// and projections use.
///
/// ```rust
/// use rosterq_memory::MemoryStore;
/// use rosterq_query::{DataStore, Filter, RelationQuery, Row};
///
/// let mut store = MemoryStore::new();
/// store.insert("member", Row::new().with("id", 1i64).with("age", 10i64));
/// store.insert("member", Row::new().with("id", 2i64).with("age", 20i64));
///
/// let result = store
///     .fetch(&RelationQuery::from("member").r#where(Filter::gte("member.age", 15)))
///     .unwrap();
/// assert_eq!(result.rows.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: IndexMap<FieldName, Vec<Row>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one row into the named relation, creating it on first use.
    pub fn insert(&mut self, table: impl Into<FieldName>, row: Row) {
        self.tables.entry(table.into()).or_default().push(row);
    }

    /// Insert many rows into the named relation.
    pub fn insert_all(&mut self, table: impl Into<FieldName>, rows: impl IntoIterator<Item = Row>) {
        self.tables.entry(table.into()).or_default().extend(rows);
    }

    fn table(&self, name: &str) -> QueryResult<&[Row]> {
        self.tables
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| QueryError::store_failure(format!("unknown relation '{}'", name)))
    }

    /// Materialize the (optionally joined) relation with namespaced
    /// column names. A join key matching several target rows emits one
    /// joined row per match.
    fn joined_rows(&self, source: &str, join: Option<&Join>) -> QueryResult<Vec<Row>> {
        let source_rows = self.table(source)?;
        let Some(join) = join else {
            return Ok(source_rows.iter().map(|r| namespaced(source, r)).collect());
        };

        let target_rows: Vec<Row> = self
            .table(&join.target)?
            .iter()
            .map(|r| namespaced(&join.target, r))
            .collect();

        let mut rows = Vec::new();
        for row in source_rows {
            let row = namespaced(source, row);
            let key = row.get(&join.source_key).cloned().unwrap_or(FilterValue::Null);

            let mut matched = false;
            if !key.is_null() {
                for target in &target_rows {
                    let target_key = target.get(&join.target_key);
                    if target_key.is_some_and(|v| values_equal(v, &key)) {
                        rows.push(merge(&row, target));
                        matched = true;
                    }
                }
            }
            if !matched && join.kind == JoinKind::Left {
                rows.push(row);
            }
        }
        Ok(rows)
    }
}

impl DataStore for MemoryStore {
    fn fetch(&self, query: &RelationQuery) -> QueryResult<FetchResult> {
        let mut rows = self.joined_rows(&query.source, query.join.as_ref())?;
        rows.retain(|row| eval::matches(&query.predicate, row));

        // Joined row count before the window is applied.
        let total = query.with_total.then_some(rows.len() as u64);

        sort::sort_rows(&mut rows, &query.order);

        let offset = query.offset.unwrap_or(0) as usize;
        let mut rows: Vec<Row> = if offset >= rows.len() {
            Vec::new()
        } else {
            rows.split_off(offset)
        };
        if let Some(limit) = query.limit {
            rows.truncate(limit as usize);
        }

        if !query.projection.is_empty() {
            rows = rows.iter().map(|r| r.project(&query.projection)).collect();
        }

        let fetch_mode = query
            .join
            .as_ref()
            .map_or(FetchMode::Eager, |join| join.fetch);

        debug!(
            source = %query.source,
            rows = rows.len(),
            total = ?total,
            "memory fetch"
        );
        Ok(FetchResult {
            rows,
            total,
            fetch_mode,
        })
    }

    fn count(&self, query: &CountQuery) -> QueryResult<u64> {
        let mut rows = self.joined_rows(&query.source, query.join.as_ref())?;
        rows.retain(|row| eval::matches(&query.predicate, row));

        let count = match &query.distinct_key {
            Some(key) => {
                // COUNT(DISTINCT key): null keys are not counted.
                let mut seen: Vec<FilterValue> = Vec::new();
                for row in &rows {
                    let Some(value) = row.get(key) else { continue };
                    if value.is_null() {
                        continue;
                    }
                    if !seen.iter().any(|v| values_equal(v, value)) {
                        seen.push(value.clone());
                    }
                }
                seen.len() as u64
            }
            None => rows.len() as u64,
        };

        debug!(source = %query.source, count, distinct = query.distinct_key.is_some(), "memory count");
        Ok(count)
    }
}

fn namespaced(table: &str, row: &Row) -> Row {
    let mut out = Row::new();
    for (column, value) in row.iter() {
        out.insert(format!("{}.{}", table, column), value.clone());
    }
    out
}

fn merge(left: &Row, right: &Row) -> Row {
    let mut out = left.clone();
    for (column, value) in right.iter() {
        out.insert(column.clone(), value.clone());
    }
    out
}

fn values_equal(a: &FilterValue, b: &FilterValue) -> bool {
    eval::cmp(a, b) == Some(std::cmp::Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rosterq_query::{Filter, OrderByField};

    fn member(id: i64, name: &str, age: i64, team_id: Option<i64>) -> Row {
        Row::new()
            .with("id", id)
            .with("username", name)
            .with("age", age)
            .with("team_id", team_id)
    }

    fn team(id: i64, name: &str) -> Row {
        Row::new().with("id", id).with("name", name)
    }

    /// Two teams, four members: the roster fixture used throughout.
    fn roster() -> MemoryStore {
        let mut store = MemoryStore::new();
        store.insert_all("team", [team(1, "teamA"), team(2, "teamB")]);
        store.insert_all(
            "member",
            [
                member(1, "member1", 10, Some(1)),
                member(2, "member2", 20, Some(1)),
                member(3, "member3", 10, Some(2)),
                member(4, "member4", 20, Some(2)),
            ],
        );
        store
    }

    fn member_join() -> Join {
        Join::inner("team", "member.team_id", "team.id")
    }

    #[test]
    fn test_unjoined_fetch_namespaces_columns() {
        let store = roster();
        let result = store.fetch(&RelationQuery::from("member")).unwrap();
        assert_eq!(result.rows.len(), 4);
        assert_eq!(result.rows[0].get_i64("member.id").unwrap(), 1);
    }

    #[test]
    fn test_inner_join_drops_unmatched_members() {
        let mut store = roster();
        store.insert("member", member(5, "member5", 30, None));

        let query = RelationQuery::from("member").join(member_join());
        let result = store.fetch(&query).unwrap();
        assert_eq!(result.rows.len(), 4);
    }

    #[test]
    fn test_left_join_keeps_unmatched_with_null_team() {
        let mut store = roster();
        store.insert("member", member(5, "member5", 30, None));

        let query = RelationQuery::from("member")
            .join(Join::left("team", "member.team_id", "team.id"))
            .select([
                "member.id",
                "member.username",
                "team.id",
                "team.name",
            ]);
        let result = store.fetch(&query).unwrap();
        assert_eq!(result.rows.len(), 5);

        let orphan = result
            .rows
            .iter()
            .find(|r| r.get_i64("member.id").unwrap() == 5)
            .unwrap();
        assert_eq!(orphan.get_opt_str("team.name").unwrap(), None);
        assert_eq!(orphan.get_opt_i64("team.id").unwrap(), None);
    }

    #[test]
    fn test_duplicate_join_key_emits_one_row_per_match() {
        let mut store = roster();
        // Second target row with the same key: the join can now multiply.
        store.insert("team", team(1, "teamA-duplicate"));

        let query = RelationQuery::from("member")
            .join(Join::left("team", "member.team_id", "team.id"))
            .with_total();
        let result = store.fetch(&query).unwrap();

        // member1/member2 each match two team rows.
        assert_eq!(result.rows.len(), 6);
        assert_eq!(result.total, Some(6));

        let count = store
            .count(
                &CountQuery::from("member")
                    .join(Join::left("team", "member.team_id", "team.id"))
                    .distinct("member.id"),
            )
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_inner_join_count_drops_unmatched_members() {
        let mut store = roster();
        store.insert("member", member(5, "member5", 30, None));

        let count = store
            .count(
                &CountQuery::from("member")
                    .join(member_join())
                    .distinct("member.id"),
            )
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_predicate_filters_joined_rows() {
        let store = roster();
        let query = RelationQuery::from("member")
            .join(member_join())
            .r#where(Filter::all([
                Some(Filter::gte("member.age", 15)),
                Some(Filter::contains("team.name", "team")),
            ]));
        let result = store.fetch(&query).unwrap();
        assert_eq!(result.rows.len(), 2);
        for row in &result.rows {
            assert!(row.get_i64("member.age").unwrap() >= 15);
        }
    }

    #[test]
    fn test_window_is_applied_after_total() {
        let store = roster();
        let query = RelationQuery::from("member")
            .order_by(OrderByField::asc("member.id"))
            .offset(1)
            .limit(2)
            .with_total();
        let result = store.fetch(&query).unwrap();

        assert_eq!(result.total, Some(4));
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].get_i64("member.id").unwrap(), 2);
    }

    #[test]
    fn test_offset_past_end_returns_empty() {
        let store = roster();
        let query = RelationQuery::from("member").offset(10).limit(2);
        assert!(store.fetch(&query).unwrap().rows.is_empty());
    }

    #[test]
    fn test_fetch_mode_is_echoed() {
        let store = roster();
        let plain = RelationQuery::from("member").join(member_join());
        assert_eq!(store.fetch(&plain).unwrap().fetch_mode, FetchMode::Lazy);

        let fetched = RelationQuery::from("member").join(member_join().fetch_join());
        assert_eq!(store.fetch(&fetched).unwrap().fetch_mode, FetchMode::Eager);
    }

    #[test]
    fn test_unknown_relation_is_a_store_failure() {
        let store = MemoryStore::new();
        let err = store.fetch(&RelationQuery::from("nowhere")).unwrap_err();
        assert_eq!(err.code, rosterq_query::ErrorCode::StoreFailure);
    }
}
