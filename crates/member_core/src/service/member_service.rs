//! Member use-case service.
//!
//! # Responsibility
//! - Provide the public member surface: list, get, save, update, max id,
//!   delete one, delete all.
//! - Report every outcome to the caller as a typed result.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - `save` and `update` return the persisted read-back, not the input.
//! - Log lines carry ids and counts only, never member field contents.

use crate::model::member::{Member, MemberDraft, MemberId};
use crate::repo::member_repo::{MemberListQuery, MemberRepository, RepoError};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MemberServiceResult<T> = Result<T, MemberServiceError>;

/// Service error for member use-cases.
#[derive(Debug)]
pub enum MemberServiceError {
    /// Target member does not exist.
    MemberNotFound(MemberId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for MemberServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemberNotFound(id) => write!(f, "member not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent member state: {details}"),
        }
    }
}

impl Error for MemberServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for MemberServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::MemberNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Member service facade over repository implementations.
pub struct MemberService<R: MemberRepository> {
    repo: R,
}

impl<R: MemberRepository> MemberService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every member ordered by id.
    pub fn list_all(&self) -> MemberServiceResult<Vec<Member>> {
        self.list(&MemberListQuery::default())
    }

    /// Lists members using pagination options.
    pub fn list(&self, query: &MemberListQuery) -> MemberServiceResult<Vec<Member>> {
        let members = self.repo.list_members(query)?;
        debug!(
            "event=member_list module=service status=ok count={}",
            members.len()
        );
        Ok(members)
    }

    /// Gets one member by id. `Ok(None)` means no such member.
    pub fn get_by_id(&self, id: MemberId) -> MemberServiceResult<Option<Member>> {
        Ok(self.repo.get_member(id)?)
    }

    /// Creates a member with a store-assigned id.
    pub fn save(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        profession: impl Into<String>,
        about: impl Into<String>,
        image: impl Into<Vec<u8>>,
    ) -> MemberServiceResult<Member> {
        self.save_draft(&MemberDraft::new(name, email, profession, about, image))
    }

    /// Creates a member from a prepared draft.
    pub fn save_draft(&self, draft: &MemberDraft) -> MemberServiceResult<Member> {
        let id = self.repo.create_member(draft)?;
        debug!("event=member_save module=service status=ok member_id={id}");
        self.repo
            .get_member(id)?
            .ok_or(MemberServiceError::InconsistentState(
                "created member not found in read-back",
            ))
    }

    /// Overwrites every field of an existing member.
    ///
    /// # Errors
    /// - `MemberNotFound` when no member has `id`.
    pub fn update(
        &self,
        id: MemberId,
        name: impl Into<String>,
        email: impl Into<String>,
        profession: impl Into<String>,
        about: impl Into<String>,
        image: impl Into<Vec<u8>>,
    ) -> MemberServiceResult<Member> {
        self.update_draft(id, &MemberDraft::new(name, email, profession, about, image))
    }

    /// Overwrites every field of an existing member from a prepared draft.
    pub fn update_draft(&self, id: MemberId, draft: &MemberDraft) -> MemberServiceResult<Member> {
        self.repo.update_member(id, draft)?;
        debug!("event=member_update module=service status=ok member_id={id}");
        self.repo
            .get_member(id)?
            .ok_or(MemberServiceError::InconsistentState(
                "updated member not found in read-back",
            ))
    }

    /// Returns the highest existing id, or `0` for an empty store.
    pub fn max_id(&self) -> MemberServiceResult<MemberId> {
        Ok(self.repo.max_member_id()?)
    }

    /// Returns the number of stored members.
    pub fn count(&self) -> MemberServiceResult<usize> {
        Ok(self.repo.count_members()?)
    }

    /// Removes every member and returns the removed count.
    pub fn delete_all(&self) -> MemberServiceResult<usize> {
        let removed = self.repo.delete_all_members()?;
        debug!("event=member_delete_all module=service status=ok removed={removed}");
        Ok(removed)
    }

    /// Removes one member and returns the removed count (`0` or `1`).
    ///
    /// An unknown id removes nothing and still succeeds, like `delete_all`
    /// on an empty store.
    pub fn delete_by_id(&self, id: MemberId) -> MemberServiceResult<usize> {
        let removed = self.repo.delete_member(id)?;
        debug!(
            "event=member_delete module=service status=ok member_id={id} removed={removed}"
        );
        Ok(removed)
    }
}
