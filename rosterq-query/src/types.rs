//! Ordering types used by relation queries.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::filter::FieldName;

/// Sort order for query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9, oldest first).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

impl SortOrder {
    /// Get the SQL keyword for this sort order.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_sql())
    }
}

/// Null handling in sorting.
///
/// Null placement is independent of [`SortOrder`]: `NULLS LAST` puts
/// null-keyed rows after every non-null row whether the key sorts
/// ascending or descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NullsOrder {
    /// Nulls appear first in the results.
    First,
    /// Nulls appear last in the results.
    Last,
}

impl NullsOrder {
    /// Get the SQL clause for this null order.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// Order by specification for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderByField {
    /// The column name to order by.
    pub column: FieldName,
    /// The sort order.
    pub order: SortOrder,
    /// Null handling; engines treat `None` as `NULLS LAST`.
    pub nulls: Option<NullsOrder>,
}

impl OrderByField {
    /// Create a new order by field.
    pub fn new(column: impl Into<FieldName>, order: SortOrder) -> Self {
        Self {
            column: column.into(),
            order,
            nulls: None,
        }
    }

    /// Create an ascending order.
    pub fn asc(column: impl Into<FieldName>) -> Self {
        Self::new(column, SortOrder::Asc)
    }

    /// Create a descending order.
    pub fn desc(column: impl Into<FieldName>) -> Self {
        Self::new(column, SortOrder::Desc)
    }

    /// Set null handling.
    pub fn nulls(mut self, nulls: NullsOrder) -> Self {
        self.nulls = Some(nulls);
        self
    }

    /// Generate the SQL for this order by field.
    pub fn to_sql(&self) -> String {
        let mut sql = String::with_capacity(self.column.len() + 17);
        sql.push_str(&self.column);
        sql.push(' ');
        sql.push_str(self.order.as_sql());
        if let Some(nulls) = self.nulls {
            sql.push(' ');
            sql.push_str(nulls.as_sql());
        }
        sql
    }
}

/// Order by specification that can be a single field or multiple fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderBy {
    /// Order by a single field.
    Field(OrderByField),
    /// Order by multiple fields.
    Fields(Vec<OrderByField>),
}

impl OrderBy {
    /// Create an empty order by (no ordering).
    pub fn none() -> Self {
        Self::Fields(Vec::new())
    }

    /// Check if the order by is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Field(_) => false,
            Self::Fields(fields) => fields.is_empty(),
        }
    }

    /// Add a field to the order by.
    pub fn then(self, field: OrderByField) -> Self {
        match self {
            Self::Field(existing) => Self::Fields(vec![existing, field]),
            Self::Fields(mut fields) => {
                fields.push(field);
                Self::Fields(fields)
            }
        }
    }

    /// The ordered fields as a slice.
    pub fn fields(&self) -> &[OrderByField] {
        match self {
            Self::Field(field) => std::slice::from_ref(field),
            Self::Fields(fields) => fields,
        }
    }

    /// Generate the SQL ORDER BY clause (without the keyword).
    pub fn to_sql(&self) -> String {
        self.fields()
            .iter()
            .map(OrderByField::to_sql)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for OrderBy {
    fn default() -> Self {
        Self::none()
    }
}

impl From<OrderByField> for OrderBy {
    fn from(field: OrderByField) -> Self {
        Self::Field(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_by_field_sql() {
        assert_eq!(OrderByField::desc("member.age").to_sql(), "member.age DESC");
        assert_eq!(
            OrderByField::asc("member.username")
                .nulls(NullsOrder::Last)
                .to_sql(),
            "member.username ASC NULLS LAST"
        );
    }

    #[test]
    fn test_order_by_then_chains_fields() {
        let order = OrderBy::from(OrderByField::desc("member.age"))
            .then(OrderByField::asc("member.username").nulls(NullsOrder::Last));

        assert_eq!(order.fields().len(), 2);
        assert_eq!(
            order.to_sql(),
            "member.age DESC, member.username ASC NULLS LAST"
        );
    }

    #[test]
    fn test_order_by_none_is_empty() {
        assert!(OrderBy::none().is_empty());
        assert_eq!(OrderBy::none().to_sql(), "");
    }
}
