//! The authorization engine.
//!
//! [`engine::decide`] is the single decision point: given a principal, an
//! action, and a resource descriptor it walks an ordered rule table and
//! returns Allow or Deny with a reason. [`scope::ScopeFilter`] is the
//! companion visibility predicate for list operations.
//!
//! The engine is pure computation over already-fetched data; the entity
//! guards in [`crate::guards`] are responsible for building descriptors out
//! of payloads and persisted rows.

pub mod engine;
pub mod scope;

pub use engine::{Action, Decision, EntityKind, Resource, decide, visibility};
pub use scope::ScopeFilter;
