//! # rosterq
//!
//! A dynamic-filter search layer for member/team rosters over a
//! pluggable relational store.
//!
//! Callers describe what they want with a [`MemberSearchCondition`]
//! whose fields are all optional; present criteria become predicate
//! fragments, absent ones contribute nothing, and the fold of whatever
//! is left runs as a single filter against `member` joined to `team`.
//! Paged calls pick a [`CountStrategy`] that decides how the total row
//! count is obtained — including skipping the count query entirely when
//! the fetched page proves it is the last one.
//!
//! ## Quick start
//!
//! ```rust
//! use rosterq::{
//!     CountStrategy, Member, MemberSearchCondition, MemberSearchRepository, Team,
//! };
//! use rosterq_memory::MemoryStore;
//! use rosterq_query::PageRequest;
//!
//! let mut store = MemoryStore::new();
//! store.insert("team", Team::new(1, "teamA").into_row());
//! store.insert("team", Team::new(2, "teamB").into_row());
//! for (id, age, team) in [(1, 10, 1), (2, 20, 1), (3, 10, 2), (4, 20, 2)] {
//!     let member = Member::new(id, format!("member{id}"), age, Some(team));
//!     store.insert("member", member.into_row());
//! }
//!
//! let repository = MemberSearchRepository::new(store);
//!
//! // Only the present criteria constrain the result.
//! let condition = MemberSearchCondition::new().age_goe(15).team_name("team");
//! let rows = repository.search(&condition).unwrap();
//! assert_eq!(rows.len(), 2);
//!
//! // Four matching rows fit one ten-row page, so the total is inferred
//! // and no count query runs.
//! let page = repository
//!     .search_page(
//!         &MemberSearchCondition::new(),
//!         &PageRequest::first(10),
//!         CountStrategy::ShortCircuit,
//!     )
//!     .unwrap();
//! assert_eq!(page.total, 4);
//! ```

pub mod condition;
pub mod dto;
pub mod entity;
pub mod executor;
pub mod page;
pub mod repository;

pub use condition::MemberSearchCondition;
pub use dto::MemberTeamDto;
pub use entity::{Member, Team};
pub use executor::RelationExecutor;
pub use page::CountStrategy;
pub use repository::MemberSearchRepository;

// Re-export the algebra crate so callers need only one dependency.
pub use rosterq_query as query;
pub use rosterq_query::{
    ErrorCode, Filter, FilterValue, Page, PageRequest, QueryError, QueryResult,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::condition::MemberSearchCondition;
    pub use crate::dto::MemberTeamDto;
    pub use crate::entity::{Member, Team};
    pub use crate::executor::RelationExecutor;
    pub use crate::page::CountStrategy;
    pub use crate::repository::MemberSearchRepository;
    pub use rosterq_query::prelude::*;
}
