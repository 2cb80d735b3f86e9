//! Explicitly constructed member store handle.
//!
//! # Responsibility
//! - Own one migrated SQLite connection for its whole lifetime.
//! - Expose the member use-cases to callers that share the handle.
//! - Provide explicit open/close lifecycle instead of a process global.
//!
//! # Invariants
//! - Every public operation runs as its own unit of work under the
//!   connection lock; no transaction spans two calls.
//! - The handle is `Send + Sync` and may be shared through `Arc`.

use crate::config::StoreConfig;
use crate::db::{open_db, open_db_in_memory};
use crate::model::member::{Member, MemberDraft, MemberId};
use crate::repo::member_repo::{MemberListQuery, RepoResult, SqliteMemberRepository};
use crate::service::member_service::{MemberService, MemberServiceError, MemberServiceResult};
use log::{info, warn};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Shared handle over one member store container.
pub struct MemberStore {
    conn: Mutex<Connection>,
}

impl MemberStore {
    /// Opens (or creates) the store file at `path`.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::from_connection(open_db(path)?)
    }

    /// Opens a private in-memory store, mostly useful for tests.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::from_connection(open_db_in_memory()?)
    }

    /// Opens the store described by `config`.
    pub fn open_with_config(config: &StoreConfig) -> RepoResult<Self> {
        Self::open(&config.db_path)
    }

    /// Wraps an already migrated connection after verifying its schema.
    pub fn from_connection(conn: Connection) -> RepoResult<Self> {
        SqliteMemberRepository::try_new(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Closes the underlying connection, surfacing any close error.
    pub fn close(self) -> RepoResult<()> {
        let conn = self
            .conn
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        match conn.close() {
            Ok(()) => {
                info!("event=store_close module=store status=ok");
                Ok(())
            }
            Err((_, err)) => {
                warn!("event=store_close module=store status=error error={err}");
                Err(err.into())
            }
        }
    }

    pub fn list_all(&self) -> MemberServiceResult<Vec<Member>> {
        self.with_service(|service| service.list_all())
    }

    pub fn list(&self, query: &MemberListQuery) -> MemberServiceResult<Vec<Member>> {
        self.with_service(|service| service.list(query))
    }

    pub fn get_by_id(&self, id: MemberId) -> MemberServiceResult<Option<Member>> {
        self.with_service(|service| service.get_by_id(id))
    }

    pub fn save(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        profession: impl Into<String>,
        about: impl Into<String>,
        image: impl Into<Vec<u8>>,
    ) -> MemberServiceResult<Member> {
        let draft = MemberDraft::new(name, email, profession, about, image);
        self.save_draft(&draft)
    }

    pub fn save_draft(&self, draft: &MemberDraft) -> MemberServiceResult<Member> {
        self.with_service(|service| service.save_draft(draft))
    }

    pub fn update(
        &self,
        id: MemberId,
        name: impl Into<String>,
        email: impl Into<String>,
        profession: impl Into<String>,
        about: impl Into<String>,
        image: impl Into<Vec<u8>>,
    ) -> MemberServiceResult<Member> {
        let draft = MemberDraft::new(name, email, profession, about, image);
        self.update_draft(id, &draft)
    }

    pub fn update_draft(&self, id: MemberId, draft: &MemberDraft) -> MemberServiceResult<Member> {
        self.with_service(|service| service.update_draft(id, draft))
    }

    pub fn max_id(&self) -> MemberServiceResult<MemberId> {
        self.with_service(|service| service.max_id())
    }

    pub fn count(&self) -> MemberServiceResult<usize> {
        self.with_service(|service| service.count())
    }

    pub fn delete_all(&self) -> MemberServiceResult<usize> {
        self.with_service(|service| service.delete_all())
    }

    pub fn delete_by_id(&self, id: MemberId) -> MemberServiceResult<usize> {
        self.with_service(|service| service.delete_by_id(id))
    }

    fn with_service<T>(
        &self,
        f: impl FnOnce(&MemberService<SqliteMemberRepository<'_>>) -> MemberServiceResult<T>,
    ) -> MemberServiceResult<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| MemberServiceError::InconsistentState("member store lock poisoned"))?;
        let repo = SqliteMemberRepository::try_new(&conn)?;
        f(&MemberService::new(repo))
    }
}
