//! Flutter-facing bindings for DocDesk core.

pub mod api;
