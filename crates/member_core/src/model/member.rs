//! Member domain model.
//!
//! # Responsibility
//! - Define the canonical profile record persisted by the store.
//! - Separate the store-assigned identity from caller-provided fields.
//!
//! # Invariants
//! - `id` is assigned by the store on insert, is strictly positive and is
//!   never reused for another member.
//! - Updates overwrite every field of `MemberDraft`; there is no partial update.

use serde::{Deserialize, Serialize};

/// Store-assigned integer identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type MemberId = i64;

/// Caller-provided member fields, used by both insert and full update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDraft {
    pub name: String,
    pub email: String,
    pub profession: String,
    /// Free-form biography text.
    pub about: String,
    /// Opaque image bytes (typically an encoded PNG/JPEG avatar).
    pub image: Vec<u8>,
}

impl MemberDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        profession: impl Into<String>,
        about: impl Into<String>,
        image: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            profession: profession.into(),
            about: about.into(),
            image: image.into(),
        }
    }

    /// Attaches a store-assigned id, producing the persisted shape.
    pub fn into_member(self, id: MemberId) -> Member {
        Member {
            id,
            name: self.name,
            email: self.email,
            profession: self.profession,
            about: self.about,
            image: self.image,
        }
    }
}

/// Canonical persisted member record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Store-assigned id. Strictly positive for persisted rows.
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub profession: String,
    pub about: String,
    pub image: Vec<u8>,
}

impl Member {
    /// Returns the writable fields of this member.
    pub fn draft(&self) -> MemberDraft {
        MemberDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            profession: self.profession.clone(),
            about: self.about.clone(),
            image: self.image.clone(),
        }
    }

    /// Returns whether `id` is a valid store-assigned identifier.
    pub fn is_valid_id(id: MemberId) -> bool {
        id > 0
    }
}

#[cfg(test)]
mod tests {
    use super::{Member, MemberDraft};

    #[test]
    fn draft_roundtrips_through_into_member() {
        let draft = MemberDraft::new("Ada", "ada@example.com", "engineer", "bio", vec![1u8, 2, 3]);
        let member = draft.clone().into_member(7);

        assert_eq!(member.id, 7);
        assert_eq!(member.draft(), draft);
    }

    #[test]
    fn only_positive_ids_are_valid() {
        assert!(Member::is_valid_id(1));
        assert!(!Member::is_valid_id(0));
        assert!(!Member::is_valid_id(-3));
    }
}
