//! Domain model for the document collection.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every document is identified by a stable `DocumentId`.
//! - Deletion is a hard removal; there are no tombstones in the in-memory
//!   collection.

pub mod document;
