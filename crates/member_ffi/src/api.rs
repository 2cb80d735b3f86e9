//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the member store operations to Dart via FRB.
//! - Translate typed core errors into simple response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens the store, runs one operation and closes it again.
//! - Failures are always reported with `ok=false`; nothing is swallowed.

use log::warn;
use member_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Member, MemberDraft, MemberId, MemberServiceResult, MemberStore, StoreConfig,
};
use std::sync::OnceLock;

static STORE_CONFIG: OnceLock<StoreConfig> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Member projection returned to Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberItem {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub profession: String,
    pub about: String,
    /// Raw image bytes as stored.
    pub image: Vec<u8>,
}

impl From<Member> for MemberItem {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            name: member.name,
            email: member.email,
            profession: member.profession,
            about: member.about,
            image: member.image,
        }
    }
}

/// Response envelope for list calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberListResponse {
    pub ok: bool,
    /// Members ordered by id (empty on failure).
    pub items: Vec<MemberItem>,
    pub message: String,
}

/// Response envelope for single-member lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberGetResponse {
    pub ok: bool,
    /// `None` with `ok=true` means the id does not exist.
    pub item: Option<MemberItem>,
    pub message: String,
}

/// Generic action response envelope for write calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected or created member id, when the action targets one member.
    pub member_id: Option<i64>,
    /// Number of removed rows for delete calls.
    pub affected: u32,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl MemberActionResponse {
    fn success(message: impl Into<String>, member_id: Option<MemberId>, affected: u32) -> Self {
        Self {
            ok: true,
            member_id,
            affected,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            member_id: None,
            affected: 0,
            message: message.into(),
        }
    }
}

/// Lists every stored member.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn member_list_all() -> MemberListResponse {
    list_all_in(store_config())
}

/// Loads one member by id.
#[flutter_rust_bridge::frb(sync)]
pub fn member_get(id: i64) -> MemberGetResponse {
    get_in(store_config(), id)
}

/// Saves a new member; the id is assigned by the store.
///
/// # FFI contract
/// - Text inputs are trimmed before persistence.
/// - Returns the created id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn member_save(
    name: String,
    email: String,
    profession: String,
    about: String,
    image: Vec<u8>,
) -> MemberActionResponse {
    save_in(
        store_config(),
        trimmed_draft(name, email, profession, about, image),
    )
}

/// Overwrites every field of an existing member.
#[flutter_rust_bridge::frb(sync)]
pub fn member_update(
    id: i64,
    name: String,
    email: String,
    profession: String,
    about: String,
    image: Vec<u8>,
) -> MemberActionResponse {
    update_in(
        store_config(),
        id,
        trimmed_draft(name, email, profession, about, image),
    )
}

/// Returns the highest stored id in `member_id` (`0` for an empty store).
#[flutter_rust_bridge::frb(sync)]
pub fn member_max_id() -> MemberActionResponse {
    max_id_in(store_config())
}

/// Removes every member.
#[flutter_rust_bridge::frb(sync)]
pub fn member_delete_all() -> MemberActionResponse {
    delete_all_in(store_config())
}

/// Removes one member by id.
#[flutter_rust_bridge::frb(sync)]
pub fn member_delete(id: i64) -> MemberActionResponse {
    delete_in(store_config(), id)
}

fn store_config() -> &'static StoreConfig {
    STORE_CONFIG.get_or_init(StoreConfig::from_env)
}

fn trimmed_draft(
    name: String,
    email: String,
    profession: String,
    about: String,
    image: Vec<u8>,
) -> MemberDraft {
    MemberDraft::new(
        name.trim(),
        email.trim(),
        profession.trim(),
        about.trim(),
        image,
    )
}

fn list_all_in(config: &StoreConfig) -> MemberListResponse {
    match with_store(config, MemberStore::list_all) {
        Ok(members) => {
            let items = members.into_iter().map(MemberItem::from).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No members.".to_string()
            } else {
                format!("Found {} member(s).", items.len())
            };
            MemberListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => MemberListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("member_list_all failed: {err}"),
        },
    }
}

fn get_in(config: &StoreConfig, id: MemberId) -> MemberGetResponse {
    match with_store(config, |store| store.get_by_id(id)) {
        Ok(Some(member)) => MemberGetResponse {
            ok: true,
            item: Some(member.into()),
            message: "Member found.".to_string(),
        },
        Ok(None) => MemberGetResponse {
            ok: true,
            item: None,
            message: format!("Member {id} not found."),
        },
        Err(err) => MemberGetResponse {
            ok: false,
            item: None,
            message: format!("member_get failed: {err}"),
        },
    }
}

fn save_in(config: &StoreConfig, draft: MemberDraft) -> MemberActionResponse {
    match with_store(config, |store| store.save_draft(&draft)) {
        Ok(member) => MemberActionResponse::success("Member saved.", Some(member.id), 1),
        Err(err) => MemberActionResponse::failure(format!("member_save failed: {err}")),
    }
}

fn update_in(config: &StoreConfig, id: MemberId, draft: MemberDraft) -> MemberActionResponse {
    match with_store(config, |store| store.update_draft(id, &draft)) {
        Ok(member) => MemberActionResponse::success("Member updated.", Some(member.id), 1),
        Err(err) => MemberActionResponse::failure(format!("member_update failed: {err}")),
    }
}

fn max_id_in(config: &StoreConfig) -> MemberActionResponse {
    match with_store(config, MemberStore::max_id) {
        Ok(max_id) => MemberActionResponse::success("Max id loaded.", Some(max_id), 0),
        Err(err) => MemberActionResponse::failure(format!("member_max_id failed: {err}")),
    }
}

fn delete_all_in(config: &StoreConfig) -> MemberActionResponse {
    match with_store(config, MemberStore::delete_all) {
        Ok(removed) => MemberActionResponse::success(
            format!("Removed {removed} member(s)."),
            None,
            u32::try_from(removed).unwrap_or(u32::MAX),
        ),
        Err(err) => MemberActionResponse::failure(format!("member_delete_all failed: {err}")),
    }
}

fn delete_in(config: &StoreConfig, id: MemberId) -> MemberActionResponse {
    match with_store(config, |store| store.delete_by_id(id)) {
        Ok(0) => MemberActionResponse::success(format!("Member {id} not found."), Some(id), 0),
        Ok(removed) => MemberActionResponse::success(
            "Member deleted.",
            Some(id),
            u32::try_from(removed).unwrap_or(u32::MAX),
        ),
        Err(err) => MemberActionResponse::failure(format!("member_delete failed: {err}")),
    }
}

fn with_store<T>(
    config: &StoreConfig,
    f: impl FnOnce(&MemberStore) -> MemberServiceResult<T>,
) -> Result<T, String> {
    let store = MemberStore::open_with_config(config)
        .map_err(|err| format!("member store open failed: {err}"))?;
    let result = f(&store).map_err(|err| err.to_string());
    if let Err(err) = store.close() {
        warn!("event=store_close module=ffi status=error error={err}");
    }
    result
}
