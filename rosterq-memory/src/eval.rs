//! In-memory evaluation of filter trees against rows.
//!
//! Comparison semantics mirror SQL: any comparison against NULL is not
//! satisfied, except an explicit equality against NULL, which behaves
//! like `IS NULL`.

use std::cmp::Ordering;

use rosterq_query::{Filter, FilterValue, Row};

/// Compare two values. `None` when either side is null or the types are
/// not comparable.
pub(crate) fn cmp(a: &FilterValue, b: &FilterValue) -> Option<Ordering> {
    match (a, b) {
        (FilterValue::Null, _) | (_, FilterValue::Null) => None,
        (FilterValue::Bool(a), FilterValue::Bool(b)) => Some(a.cmp(b)),
        (FilterValue::Int(a), FilterValue::Int(b)) => Some(a.cmp(b)),
        (FilterValue::String(a), FilterValue::String(b)) => Some(a.cmp(b)),
        (FilterValue::Float(a), FilterValue::Float(b)) => a.partial_cmp(b),
        (FilterValue::Int(a), FilterValue::Float(b)) => (*a as f64).partial_cmp(b),
        (FilterValue::Float(a), FilterValue::Int(b)) => a.partial_cmp(&(*b as f64)),
        _ => None,
    }
}

fn column<'a>(row: &'a Row, name: &str) -> &'a FilterValue {
    row.get(name).unwrap_or(&FilterValue::Null)
}

/// Check whether a row satisfies the filter.
pub(crate) fn matches(filter: &Filter, row: &Row) -> bool {
    match filter {
        Filter::None => true,
        Filter::False => false,

        Filter::Equals(col, val) => {
            let actual = column(row, col);
            if val.is_null() {
                actual.is_null()
            } else {
                cmp(actual, val) == Some(Ordering::Equal)
            }
        }
        Filter::Contains(col, val) => match (column(row, col), val) {
            (FilterValue::String(haystack), FilterValue::String(needle)) => {
                haystack.contains(needle.as_str())
            }
            _ => false,
        },
        Filter::Gte(col, val) => {
            matches!(cmp(column(row, col), val), Some(Ordering::Greater | Ordering::Equal))
        }
        Filter::Lte(col, val) => {
            matches!(cmp(column(row, col), val), Some(Ordering::Less | Ordering::Equal))
        }
        Filter::Between(col, low, high) => {
            let actual = column(row, col);
            matches!(cmp(actual, low), Some(Ordering::Greater | Ordering::Equal))
                && matches!(cmp(actual, high), Some(Ordering::Less | Ordering::Equal))
        }

        Filter::And(filters) => filters.iter().all(|f| matches(f, row)),
        Filter::Or(filters) => filters.iter().any(|f| matches(f, row)),
    }
}
