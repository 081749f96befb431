//! Repository layer abstractions and storage implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate storage details from store/controller orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `DocumentRecord::validate()`.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`).

pub mod document_repo;
