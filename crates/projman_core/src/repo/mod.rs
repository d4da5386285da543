//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-store load/save contract.
//! - Isolate JSON file details from service orchestration.
//!
//! # Invariants
//! - Load degrades to an empty store instead of failing.
//! - Save errors are returned to the caller, never swallowed.

pub mod store_repo;
