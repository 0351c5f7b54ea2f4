//! Ordering of in-memory rows.

use std::cmp::Ordering;

use rosterq_query::{FilterValue, NullsOrder, OrderBy, Row, SortOrder};

use crate::eval;

/// Sort rows by the given ordering. The sort is stable, so rows that
/// compare equal keep engine order.
///
/// Null placement follows each field's `NullsOrder` (default `Last`) and
/// is applied before the direction, so `DESC NULLS LAST` still puts null
/// keys after every non-null key.
pub(crate) fn sort_rows(rows: &mut [Row], order: &OrderBy) {
    if order.is_empty() {
        return;
    }
    rows.sort_by(|a, b| compare(a, b, order));
}

fn compare(a: &Row, b: &Row, order: &OrderBy) -> Ordering {
    for field in order.fields() {
        let left = a.get(&field.column).unwrap_or(&FilterValue::Null);
        let right = b.get(&field.column).unwrap_or(&FilterValue::Null);

        let nulls = field.nulls.unwrap_or(NullsOrder::Last);
        let ordering = match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => match nulls {
                NullsOrder::First => Ordering::Less,
                NullsOrder::Last => Ordering::Greater,
            },
            (false, true) => match nulls {
                NullsOrder::First => Ordering::Greater,
                NullsOrder::Last => Ordering::Less,
            },
            (false, false) => {
                let cmp = eval::cmp(left, right).unwrap_or(Ordering::Equal);
                match field.order {
                    SortOrder::Asc => cmp,
                    SortOrder::Desc => cmp.reverse(),
                }
            }
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
