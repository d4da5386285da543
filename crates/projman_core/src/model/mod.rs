//! Domain model for users, projects and tasks.
//!
//! # Responsibility
//! - Define the entity records persisted in the JSON document.
//! - Own the in-memory `Store` that keeps entity links consistent.
//!
//! # Invariants
//! - Every entity is identified by a UUID generated once at creation.
//! - IDs are private fields with read-only accessors.

pub mod project;
pub mod store;
pub mod task;
pub mod user;
