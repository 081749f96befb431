//! Derived read views over the document store.
//!
//! # Responsibility
//! - Project store snapshots into the rows the landing page renders.
//! - Track checkbox selection over those rows.
//!
//! # Invariants
//! - Views never mutate the store.

pub mod projection;
pub mod selection;
