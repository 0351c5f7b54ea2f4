//! # rosterq-query
//!
//! Query algebra for the rosterq search layer.
//!
//! This crate provides the pieces a dynamic-filter search API is built
//! from, independent of any concrete data store:
//! - Predicate fragments and their conjunction ([`Filter`], [`FilterValue`])
//! - Ordering with explicit null placement ([`OrderBy`], [`NullsOrder`])
//! - Offset pagination ([`PageRequest`], [`Page`])
//! - The retrieval contract an engine implements ([`DataStore`],
//!   [`RelationQuery`], [`CountQuery`])
//! - Error types ([`QueryError`], [`ErrorCode`])
//!
//! ## Composing optional fragments
//!
//! ```rust
//! use rosterq_query::Filter;
//!
//! let filter = Filter::all([
//!     Some(Filter::equals("member.username", "member1")),
//!     None, // absent criterion, dropped
//!     Some(Filter::gte("member.age", 20)),
//! ]);
//!
//! let (sql, params) = filter.to_sql();
//! assert_eq!(sql, "(member.username = $1 AND member.age >= $2)");
//! assert_eq!(params.len(), 2);
//! ```
//!
//! ## Describing a retrieval
//!
//! ```rust
//! use rosterq_query::{Filter, Join, RelationQuery};
//!
//! let query = RelationQuery::from("member")
//!     .join(Join::left("team", "member.team_id", "team.id"))
//!     .select(["member.id", "member.username", "team.name"])
//!     .r#where(Filter::contains("team.name", "team"))
//!     .limit(10);
//! assert_eq!(query.source, "member");
//! ```

pub mod error;
pub mod filter;
pub mod logging;
pub mod pagination;
pub mod store;
pub mod types;

pub use error::{ErrorCode, QueryError, QueryResult};
pub use filter::{FieldName, Filter, FilterValue};
pub use pagination::{Page, PageRequest};
pub use store::{CountQuery, DataStore, FetchMode, FetchResult, Join, JoinKind, RelationQuery, Row};
pub use types::{NullsOrder, OrderBy, OrderByField, SortOrder};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ErrorCode, QueryError, QueryResult};
    pub use crate::filter::{FieldName, Filter, FilterValue};
    pub use crate::pagination::{Page, PageRequest};
    pub use crate::store::{
        CountQuery, DataStore, FetchMode, FetchResult, Join, JoinKind, RelationQuery, Row,
    };
    pub use crate::types::{NullsOrder, OrderBy, OrderByField, SortOrder};
}
