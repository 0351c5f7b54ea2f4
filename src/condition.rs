//! The caller-supplied search condition and its predicate fragments.
//!
//! Each criterion maps to *zero or one* fragment: an absent value — and
//! for text criteria an empty or whitespace-only value — contributes no
//! constraint at all. Both composition entry points
//! ([`MemberSearchCondition::to_filter`] and
//! [`MemberSearchCondition::to_filter_folded`]) go through the same
//! fragment functions and the same AND merge, so they are identical for
//! every input, not merely tested to be.

use rosterq_query::Filter;
use serde::{Deserialize, Serialize};

use crate::entity::{member, team};

/// Optional search criteria for the member/team search.
///
/// Any field may be absent; absence means "no constraint", never "match
/// nothing". The condition is immutable once built.
///
/// ```rust
/// use rosterq::MemberSearchCondition;
///
/// let condition = MemberSearchCondition::new()
///     .age_goe(20)
///     .age_loe(30)
///     .team_name("team");
/// assert_eq!(condition.username, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSearchCondition {
    /// Exact username match.
    pub username: Option<String>,
    /// Team-name substring match.
    pub team_name: Option<String>,
    /// Minimum age, inclusive.
    pub age_goe: Option<i64>,
    /// Maximum age, inclusive.
    pub age_loe: Option<i64>,
}

impl MemberSearchCondition {
    /// An empty condition: matches every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exact-username criterion.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the team-name-contains criterion.
    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    /// Set the minimum-age criterion.
    pub fn age_goe(mut self, age: i64) -> Self {
        self.age_goe = Some(age);
        self
    }

    /// Set the maximum-age criterion.
    pub fn age_loe(mut self, age: i64) -> Self {
        self.age_loe = Some(age);
        self
    }

    /// Compose the condition by passing all fragments at once; absent
    /// ones are filtered inside the combinator.
    pub fn to_filter(&self) -> Filter {
        Filter::all([
            username_eq(self.username.as_deref()),
            team_name_contains(self.team_name.as_deref()),
            age_goe(self.age_goe),
            age_loe(self.age_loe),
        ])
    }

    /// Compose the condition with a conditional accumulator fold.
    ///
    /// Observably identical to [`to_filter`](Self::to_filter); kept as a
    /// separate entry point because callers historically used both
    /// shapes.
    pub fn to_filter_folded(&self) -> Filter {
        let mut filter = Filter::None;
        if let Some(fragment) = username_eq(self.username.as_deref()) {
            filter = filter.and_then(fragment);
        }
        if let Some(fragment) = team_name_contains(self.team_name.as_deref()) {
            filter = filter.and_then(fragment);
        }
        if let Some(fragment) = age_goe(self.age_goe) {
            filter = filter.and_then(fragment);
        }
        if let Some(fragment) = age_loe(self.age_loe) {
            filter = filter.and_then(fragment);
        }
        filter
    }
}

/// Equality fragment for the username, when the value has text.
pub fn username_eq(username: Option<&str>) -> Option<Filter> {
    text(username).map(|name| Filter::equals(member::USERNAME, name))
}

/// Containment fragment for the team name, when the value has text.
pub fn team_name_contains(team_name: Option<&str>) -> Option<Filter> {
    text(team_name).map(|name| Filter::contains(team::NAME, name))
}

/// `age >= value` fragment, when a value is present.
pub fn age_goe(age: Option<i64>) -> Option<Filter> {
    age.map(|age| Filter::gte(member::AGE, age))
}

/// `age <= value` fragment, when a value is present.
pub fn age_loe(age: Option<i64>) -> Option<Filter> {
    age.map(|age| Filter::lte(member::AGE, age))
}

/// "Has text" rule: present and non-empty after trimming blanks. An
/// empty or whitespace-only string behaves exactly like an absent value.
fn text(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
