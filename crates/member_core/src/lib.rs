//! Core domain logic for the member record store.
//! This crate is the single source of truth for member persistence rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::member::{Member, MemberDraft, MemberId};
pub use repo::member_repo::{
    MemberListQuery, MemberRepository, RepoError, RepoResult, SqliteMemberRepository,
};
pub use service::member_service::{MemberService, MemberServiceError, MemberServiceResult};
pub use store::MemberStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
