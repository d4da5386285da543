//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, store mutations and persistence.
//! - Keep the CLI layer decoupled from storage details.

pub mod tracker_service;
