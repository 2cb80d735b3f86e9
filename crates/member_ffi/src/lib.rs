//! Flutter-facing bindings for the member record store.

pub mod api;
