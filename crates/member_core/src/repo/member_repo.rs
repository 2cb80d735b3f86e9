//! Member repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `members` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Ids are allocated by SQLite inside the insert statement itself
//!   (`AUTOINCREMENT` + `RETURNING`), so concurrent inserts never share an id
//!   and deleted ids are never handed out again.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Updates report `NotFound` instead of silently no-oping.
//! - Deletes report the removed row count; removing nothing is not an error.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::member::{Member, MemberDraft, MemberId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MEMBER_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    profession,
    about,
    image
FROM members";

const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "name",
    "email",
    "profession",
    "about",
    "image",
    "created_at",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for member persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// No member with the given id exists.
    NotFound(MemberId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid member.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "member not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "member repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "member repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "member repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted member data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing members.
///
/// Results are always ordered by `id ASC`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for member CRUD operations.
pub trait MemberRepository {
    /// Inserts one member and returns its store-assigned id.
    fn create_member(&self, draft: &MemberDraft) -> RepoResult<MemberId>;
    /// Overwrites every field of an existing member.
    fn update_member(&self, id: MemberId, draft: &MemberDraft) -> RepoResult<()>;
    /// Loads one member by id.
    fn get_member(&self, id: MemberId) -> RepoResult<Option<Member>>;
    /// Lists members ordered by id.
    fn list_members(&self, query: &MemberListQuery) -> RepoResult<Vec<Member>>;
    /// Returns the highest existing id, or `0` for an empty store.
    fn max_member_id(&self) -> RepoResult<MemberId>;
    /// Returns the number of stored members.
    fn count_members(&self) -> RepoResult<usize>;
    /// Removes at most one member by id and returns the removed count.
    fn delete_member(&self, id: MemberId) -> RepoResult<usize>;
    /// Removes every member in one statement and returns the removed count.
    fn delete_all_members(&self) -> RepoResult<usize>;
}

/// SQLite-backed member repository.
pub struct SqliteMemberRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemberRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_member_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl MemberRepository for SqliteMemberRepository<'_> {
    fn create_member(&self, draft: &MemberDraft) -> RepoResult<MemberId> {
        let id = self.conn.query_row(
            "INSERT INTO members (
                name,
                email,
                profession,
                about,
                image,
                created_at,
                updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                CAST(unixepoch('subsec') * 1000 AS INTEGER),
                CAST(unixepoch('subsec') * 1000 AS INTEGER)
            )
            RETURNING id;",
            params![
                draft.name.as_str(),
                draft.email.as_str(),
                draft.profession.as_str(),
                draft.about.as_str(),
                draft.image.as_slice(),
            ],
            |row| row.get::<_, MemberId>(0),
        )?;

        Ok(id)
    }

    fn update_member(&self, id: MemberId, draft: &MemberDraft) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE members
             SET
                name = ?1,
                email = ?2,
                profession = ?3,
                about = ?4,
                image = ?5,
                updated_at = CAST(unixepoch('subsec') * 1000 AS INTEGER)
             WHERE id = ?6;",
            params![
                draft.name.as_str(),
                draft.email.as_str(),
                draft.profession.as_str(),
                draft.about.as_str(),
                draft.image.as_slice(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_member(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MEMBER_SELECT_SQL} WHERE id = ?1 LIMIT 1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_member_row(row)?));
        }

        Ok(None)
    }

    fn list_members(&self, query: &MemberListQuery) -> RepoResult<Vec<Member>> {
        let mut sql = format!("{MEMBER_SELECT_SQL} ORDER BY id ASC");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut members = Vec::new();

        while let Some(row) = rows.next()? {
            members.push(parse_member_row(row)?);
        }

        Ok(members)
    }

    fn max_member_id(&self) -> RepoResult<MemberId> {
        let max_id = self
            .conn
            .query_row(
                "SELECT id FROM members ORDER BY id DESC LIMIT 1;",
                [],
                |row| row.get::<_, MemberId>(0),
            )
            .optional()?;

        Ok(max_id.unwrap_or(0))
    }

    fn count_members(&self) -> RepoResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM members;", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("invalid member count `{count}`")))
    }

    fn delete_member(&self, id: MemberId) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM members WHERE id = ?1;", [id])?;
        Ok(removed)
    }

    fn delete_all_members(&self) -> RepoResult<usize> {
        let removed = self.conn.execute("DELETE FROM members;", [])?;
        Ok(removed)
    }
}

fn parse_member_row(row: &Row<'_>) -> RepoResult<Member> {
    let id: MemberId = row.get("id")?;
    if !Member::is_valid_id(id) {
        return Err(RepoError::InvalidData(format!(
            "invalid id value `{id}` in members.id"
        )));
    }

    Ok(Member {
        id,
        name: row.get("name")?,
        email: row.get("email")?,
        profession: row.get("profession")?,
        about: row.get("about")?,
        image: row.get("image")?,
    })
}

fn ensure_member_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "members")? {
        return Err(RepoError::MissingRequiredTable("members"));
    }

    for column in REQUIRED_COLUMNS.iter().copied() {
        if !table_has_column(conn, "members", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "members",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
