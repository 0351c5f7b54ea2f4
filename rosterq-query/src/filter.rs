//! Predicate fragments and their composition into a single WHERE filter.
//!
//! A [`Filter`] is an immutable boolean expression tree over named relation
//! columns. Dynamic search code produces one *optional* fragment per
//! criterion and folds the present ones into a single conjunction; both
//! folding shapes funnel through [`Filter::and_then`], so an accumulator
//! loop and a fixed-arity [`Filter::all`] call always build the same tree.
//!
//! ```rust
//! use rosterq_query::{Filter, FilterValue};
//!
//! let username = Some(Filter::equals("member.username", "member1"));
//! let age_goe: Option<Filter> = None;
//!
//! // Shape (a): conditional accumulator.
//! let mut acc = Filter::None;
//! if let Some(f) = username.clone() {
//!     acc = acc.and_then(f);
//! }
//! if let Some(f) = age_goe.clone() {
//!     acc = acc.and_then(f);
//! }
//!
//! // Shape (b): pass everything, absent fragments are dropped inside.
//! let all = Filter::all([username, age_goe]);
//!
//! assert_eq!(acc, all);
//! ```

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A column or field name inside a relation (e.g. `member.age`).
pub type FieldName = SmolStr;

/// A scalar value that a filter compares a column against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// SQL NULL / absent value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
}

impl FilterValue {
    /// Check if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the integer payload, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

/// An immutable boolean expression over relation columns.
///
/// `Filter::None` is the always-true predicate: it matches every row and
/// is the identity of [`and_then`](Self::and_then). An absent criterion
/// therefore composes to "no constraint", never to an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// No filter (always true).
    None,
    /// Constant false (matches no row).
    False,

    /// Equality comparison.
    Equals(FieldName, FilterValue),
    /// Substring containment (LIKE %value%).
    Contains(FieldName, FilterValue),
    /// Greater than or equal comparison.
    Gte(FieldName, FilterValue),
    /// Less than or equal comparison.
    Lte(FieldName, FilterValue),
    /// Inclusive range comparison.
    Between(FieldName, FilterValue, FilterValue),

    /// Logical AND of multiple filters.
    And(Vec<Filter>),
    /// Logical OR of multiple filters.
    Or(Vec<Filter>),
}

impl Filter {
    /// Create an empty filter (matches everything).
    pub fn none() -> Self {
        Self::None
    }

    /// Check if this filter is empty.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Equality fragment for a column.
    pub fn equals(column: impl Into<FieldName>, value: impl Into<FilterValue>) -> Self {
        Self::Equals(column.into(), value.into())
    }

    /// Substring-containment fragment for a column.
    pub fn contains(column: impl Into<FieldName>, value: impl Into<FilterValue>) -> Self {
        Self::Contains(column.into(), value.into())
    }

    /// `column >= value` fragment.
    pub fn gte(column: impl Into<FieldName>, value: impl Into<FilterValue>) -> Self {
        Self::Gte(column.into(), value.into())
    }

    /// `column <= value` fragment.
    pub fn lte(column: impl Into<FieldName>, value: impl Into<FilterValue>) -> Self {
        Self::Lte(column.into(), value.into())
    }

    /// Inclusive `column BETWEEN low AND high` fragment.
    pub fn between(
        column: impl Into<FieldName>,
        low: impl Into<FilterValue>,
        high: impl Into<FilterValue>,
    ) -> Self {
        Self::Between(column.into(), low.into(), high.into())
    }

    /// Combine with another filter using AND.
    ///
    /// `Filter::None` is the identity on either side, so folding a mix of
    /// present and absent fragments never needs a null check at the call
    /// site.
    pub fn and_then(self, other: Filter) -> Self {
        if self.is_none() {
            return other;
        }
        if other.is_none() {
            return self;
        }
        match self {
            Self::And(mut filters) => {
                filters.push(other);
                Self::And(filters)
            }
            _ => Self::And(vec![self, other]),
        }
    }

    /// Combine with an optional fragment using AND; absent fragments are
    /// dropped.
    pub fn and_opt(self, other: Option<Filter>) -> Self {
        match other {
            Some(f) => self.and_then(f),
            None => self,
        }
    }

    /// Conjunction of an arbitrary set of *optional* fragments.
    ///
    /// Absent fragments are dropped; zero present fragments compose to
    /// `Filter::None`. This is the single shared composer behind both
    /// call shapes, so it is fold-order equivalent to an `and_then`
    /// accumulator by construction.
    pub fn all(fragments: impl IntoIterator<Item = Option<Filter>>) -> Self {
        fragments
            .into_iter()
            .flatten()
            .fold(Self::None, Self::and_then)
    }

    /// Create an AND filter from present fragments.
    pub fn and(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self::all(filters.into_iter().map(Some))
    }

    /// Create an OR filter, dropping empty operands.
    pub fn or(filters: impl IntoIterator<Item = Filter>) -> Self {
        let filters: Vec<_> = filters.into_iter().filter(|f| !f.is_none()).collect();
        match filters.len() {
            0 => Self::None,
            1 => filters.into_iter().next().unwrap_or(Self::None),
            _ => Self::Or(filters),
        }
    }

    /// Generate SQL for this filter with parameter placeholders.
    ///
    /// Returns `(sql, params)` where params are the values to bind. The
    /// rendering exists for engines and structured logs; the in-memory
    /// engine evaluates the tree directly.
    pub fn to_sql(&self) -> (String, Vec<FilterValue>) {
        let mut params = Vec::new();
        let sql = self.render(&mut params);
        (sql, params)
    }

    fn render(&self, params: &mut Vec<FilterValue>) -> String {
        match self {
            Self::None => "TRUE".to_string(),
            Self::False => "FALSE".to_string(),

            Self::Equals(col, val) => {
                if val.is_null() {
                    format!("{} IS NULL", col)
                } else {
                    params.push(val.clone());
                    format!("{} = ${}", col, params.len())
                }
            }
            Self::Contains(col, val) => {
                match val {
                    FilterValue::String(s) => params.push(FilterValue::String(format!("%{}%", s))),
                    other => params.push(other.clone()),
                }
                format!("{} LIKE ${}", col, params.len())
            }
            Self::Gte(col, val) => {
                params.push(val.clone());
                format!("{} >= ${}", col, params.len())
            }
            Self::Lte(col, val) => {
                params.push(val.clone());
                format!("{} <= ${}", col, params.len())
            }
            Self::Between(col, low, high) => {
                params.push(low.clone());
                let lo = params.len();
                params.push(high.clone());
                format!("{} BETWEEN ${} AND ${}", col, lo, params.len())
            }

            Self::And(filters) => {
                if filters.is_empty() {
                    return "TRUE".to_string();
                }
                let parts: Vec<_> = filters.iter().map(|f| f.render(params)).collect();
                format!("({})", parts.join(" AND "))
            }
            Self::Or(filters) => {
                if filters.is_empty() {
                    return "FALSE".to_string();
                }
                let parts: Vec<_> = filters.iter().map(|f| f.render(params)).collect();
                format!("({})", parts.join(" OR "))
            }
        }
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filter_value_from() {
        assert_eq!(FilterValue::from(42i32), FilterValue::Int(42));
        assert_eq!(
            FilterValue::from("hello"),
            FilterValue::String("hello".to_string())
        );
        assert_eq!(FilterValue::from(true), FilterValue::Bool(true));
        assert_eq!(FilterValue::from(None::<i64>), FilterValue::Null);
    }

    #[test]
    fn test_all_drops_absent_fragments() {
        let filter = Filter::all([
            Some(Filter::equals("member.username", "member1")),
            None,
            Some(Filter::gte("member.age", 10)),
            None,
        ]);

        assert_eq!(
            filter,
            Filter::And(vec![
                Filter::equals("member.username", "member1"),
                Filter::gte("member.age", 10),
            ])
        );
    }

    #[test]
    fn test_all_absent_composes_to_none() {
        let filter = Filter::all([None, None, None, None]);
        assert!(filter.is_none());
        assert_eq!(filter.to_sql().0, "TRUE");
    }

    #[test]
    fn test_single_present_fragment_is_not_wrapped() {
        let filter = Filter::all([None, Some(Filter::lte("member.age", 30)), None]);
        assert_eq!(filter, Filter::lte("member.age", 30));
    }

    #[test]
    fn test_accumulator_and_fixed_arity_agree() {
        let fragments = [
            Some(Filter::equals("member.username", "member1")),
            None,
            Some(Filter::contains("team.name", "team")),
            Some(Filter::lte("member.age", 40)),
        ];

        let mut acc = Filter::None;
        for fragment in fragments.clone() {
            acc = acc.and_opt(fragment);
        }
        let all = Filter::all(fragments);

        assert_eq!(acc, all);
        assert_eq!(acc.to_sql(), all.to_sql());
    }

    #[test]
    fn test_and_then_with_one_absent_side() {
        let present = Filter::gte("member.age", 20);
        assert_eq!(Filter::None.and_then(present.clone()), present);
        assert_eq!(present.clone().and_then(Filter::None), present);
    }

    #[test]
    fn test_to_sql_parameter_numbering() {
        let filter = Filter::and([
            Filter::equals("member.username", "member1"),
            Filter::between("member.age", 10, 30),
        ]);

        let (sql, params) = filter.to_sql();
        assert_eq!(
            sql,
            "(member.username = $1 AND member.age BETWEEN $2 AND $3)"
        );
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_contains_renders_like_pattern() {
        let (sql, params) = Filter::contains("team.name", "team").to_sql();
        assert_eq!(sql, "team.name LIKE $1");
        assert_eq!(params, vec![FilterValue::String("%team%".into())]);
    }

    #[test]
    fn test_or_drops_empty_operands() {
        let filter = Filter::or([Filter::None, Filter::equals("member.age", 10)]);
        assert_eq!(filter, Filter::equals("member.age", 10));
    }
}
