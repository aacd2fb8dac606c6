use super::PersistenceResult;
use crate::member::Role;
use crate::membership::{MembershipError, MembershipRecord, MembershipResult, MembershipService};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, params};

/// Team-membership table backed by SQLite.
pub struct SqliteMembershipStore {
    connection: Mutex<Connection>,
}

impl SqliteMembershipStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> PersistenceResult<Self> {
        let connection = Connection::open_in_memory()?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS team_members (
                project_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                role TEXT NOT NULL,
                is_team_lead INTEGER NOT NULL DEFAULT 0,
                joined_at TEXT NOT NULL,
                PRIMARY KEY (project_id, user_id)
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    pub fn members(&self, project_id: &str) -> PersistenceResult<Vec<MembershipRecord>> {
        let conn = self.connection.lock();
        let mut stmt = conn.prepare(
            "SELECT user_id, role, is_team_lead, joined_at FROM team_members
             WHERE project_id = ?1 ORDER BY joined_at ASC, user_id ASC",
        )?;
        let rows = stmt.query_map(params![project_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, bool>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (user_id, role, is_team_lead, joined_at) = row?;
            let role = role
                .parse::<Role>()
                .map_err(super::PersistenceError::InvalidData)?;
            let joined_at = DateTime::parse_from_rfc3339(&joined_at)
                .map_err(|err| {
                    super::PersistenceError::InvalidData(format!(
                        "invalid joined_at '{joined_at}': {err}"
                    ))
                })?
                .with_timezone(&Utc);
            records.push(MembershipRecord {
                project_id: project_id.to_string(),
                user_id,
                role,
                is_team_lead,
                joined_at,
            });
        }
        Ok(records)
    }
}

fn storage_error(err: rusqlite::Error) -> MembershipError {
    MembershipError::Storage(err.to_string())
}

#[async_trait]
impl MembershipService for SqliteMembershipStore {
    async fn add_member(
        &self,
        project_id: &str,
        user_id: &str,
        role: Role,
        is_team_lead: bool,
    ) -> MembershipResult<()> {
        let conn = self.connection.lock();
        conn.execute(
            "INSERT INTO team_members (project_id, user_id, role, is_team_lead, joined_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (project_id, user_id)
             DO UPDATE SET role = excluded.role, is_team_lead = excluded.is_team_lead",
            params![
                project_id,
                user_id,
                role.as_str(),
                is_team_lead,
                Utc::now().to_rfc3339()
            ],
        )
        .map_err(storage_error)?;
        Ok(())
    }

    async fn remove_member(&self, project_id: &str, user_id: &str) -> MembershipResult<()> {
        let conn = self.connection.lock();
        let removed = conn
            .execute(
                "DELETE FROM team_members WHERE project_id = ?1 AND user_id = ?2",
                params![project_id, user_id],
            )
            .map_err(storage_error)?;
        if removed == 0 {
            return Err(MembershipError::NotMember {
                project_id: project_id.to_string(),
                user_id: user_id.to_string(),
            });
        }
        Ok(())
    }
}
