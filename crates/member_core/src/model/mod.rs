//! Domain model for the member record store.
//!
//! # Responsibility
//! - Define the canonical member record and its write shape.
//!
//! # Invariants
//! - Every persisted member is identified by a store-assigned `MemberId`.
//! - Deletion is a hard delete; ids are never handed out twice.

pub mod member;
