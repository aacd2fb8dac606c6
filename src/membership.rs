//! Remote team-membership mutations that follow local selection changes.
//!
//! Selection changes are applied locally first. Propagating them here may
//! fail; failures are logged and handed back to the caller, and the local
//! selection is never rolled back.

use crate::member::Role;
use crate::selection::SelectionChange;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MembershipError {
    #[error("membership service rejected the request: {0}")]
    Rejected(String),
    #[error("membership service unavailable: {0}")]
    Unavailable(String),
    #[error("user {user_id} is not a member of project {project_id}")]
    NotMember { project_id: String, user_id: String },
    #[error("membership storage error: {0}")]
    Storage(String),
}

pub type MembershipResult<T> = Result<T, MembershipError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipRecord {
    pub project_id: String,
    pub user_id: String,
    pub role: Role,
    pub is_team_lead: bool,
    pub joined_at: DateTime<Utc>,
}

#[async_trait]
pub trait MembershipService: Send + Sync {
    async fn add_member(
        &self,
        project_id: &str,
        user_id: &str,
        role: Role,
        is_team_lead: bool,
    ) -> MembershipResult<()>;

    async fn remove_member(&self, project_id: &str, user_id: &str) -> MembershipResult<()>;
}

/// Pushes one local change to the membership service. No-op changes succeed
/// without a remote call.
pub async fn sync_change<S>(
    service: &S,
    project_id: &str,
    change: &SelectionChange,
) -> MembershipResult<()>
where
    S: MembershipService + ?Sized,
{
    let result = match change {
        SelectionChange::Added(member) => {
            service
                .add_member(project_id, &member.id, member.role, member.team_lead())
                .await
        }
        SelectionChange::Removed(member) => service.remove_member(project_id, &member.id).await,
        SelectionChange::AlreadyPresent | SelectionChange::NotPresent => return Ok(()),
    };
    match &result {
        Ok(()) => tracing::info!(project_id, "membership change confirmed"),
        Err(err) => tracing::warn!(
            project_id,
            error = %err,
            "membership change rejected; local selection kept"
        ),
    }
    result
}

/// Process-local membership table. Can be switched into a rejecting mode to
/// exercise failure handling.
#[derive(Debug, Default)]
pub struct InMemoryMembershipService {
    records: Mutex<Vec<MembershipRecord>>,
    reject_with: Mutex<Option<String>>,
}

impl InMemoryMembershipService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_all(&self, reason: impl Into<String>) {
        *self.reject_with.lock() = Some(reason.into());
    }

    pub fn accept_all(&self) {
        *self.reject_with.lock() = None;
    }

    pub fn members(&self, project_id: &str) -> Vec<MembershipRecord> {
        self.records
            .lock()
            .iter()
            .filter(|record| record.project_id == project_id)
            .cloned()
            .collect()
    }

    fn check_rejection(&self) -> MembershipResult<()> {
        match self.reject_with.lock().as_ref() {
            Some(reason) => Err(MembershipError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl MembershipService for InMemoryMembershipService {
    async fn add_member(
        &self,
        project_id: &str,
        user_id: &str,
        role: Role,
        is_team_lead: bool,
    ) -> MembershipResult<()> {
        self.check_rejection()?;
        let mut records = self.records.lock();
        records.retain(|record| !(record.project_id == project_id && record.user_id == user_id));
        records.push(MembershipRecord {
            project_id: project_id.to_string(),
            user_id: user_id.to_string(),
            role,
            is_team_lead,
            joined_at: Utc::now(),
        });
        Ok(())
    }

    async fn remove_member(&self, project_id: &str, user_id: &str) -> MembershipResult<()> {
        self.check_rejection()?;
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|record| !(record.project_id == project_id && record.user_id == user_id));
        if records.len() == before {
            return Err(MembershipError::NotMember {
                project_id: project_id.to_string(),
                user_id: user_id.to_string(),
            });
        }
        Ok(())
    }
}
