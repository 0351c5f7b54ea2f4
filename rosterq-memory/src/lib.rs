//! # rosterq-memory
//!
//! An in-memory [`DataStore`](rosterq_query::DataStore) engine for the
//! rosterq search layer.
//!
//! The engine holds named relations as plain row vectors and executes
//! the full retrieval contract against them: inner/left joins (with the
//! fetch mode echoed back), filter evaluation with SQL-like null
//! semantics, multi-key ordering with `NULLS FIRST/LAST`, offset/limit
//! windows, joined totals and distinct counts.
//!
//! It exists for tests and examples; production callers plug a real
//! database engine into the same trait.

mod eval;
mod sort;
mod store;

pub use store::MemoryStore;
