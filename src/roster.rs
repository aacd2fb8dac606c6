use crate::member::{CandidateMember, ExperienceTier, Role};
use crate::persistence::{self, PersistenceError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("roster transport error: {0}")]
    Transport(String),
    #[error(transparent)]
    Source(#[from] PersistenceError),
}

/// Optional narrowing applied by roster providers. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_experience: Option<ExperienceTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_availability_percent: Option<f64>,
}

impl RosterFilter {
    pub fn matches(&self, member: &CandidateMember) -> bool {
        if self.role.is_some_and(|role| member.role != role) {
            return false;
        }
        if let Some(ref department) = self.department {
            if !member.department.eq_ignore_ascii_case(department) {
                return false;
            }
        }
        if self
            .min_experience
            .is_some_and(|tier| member.experience_tier < tier)
        {
            return false;
        }
        if let Some(ref skill) = self.skill {
            if !member.has_skill(skill) {
                return false;
            }
        }
        if self
            .min_availability_percent
            .is_some_and(|min| member.availability_percent < min)
        {
            return false;
        }
        true
    }

    pub fn apply(&self, members: &[CandidateMember]) -> Vec<CandidateMember> {
        members
            .iter()
            .filter(|member| self.matches(member))
            .cloned()
            .collect()
    }
}

#[async_trait]
pub trait RosterProvider: Send + Sync {
    async fn fetch_candidates(
        &self,
        filter: Option<&RosterFilter>,
    ) -> Result<Vec<CandidateMember>, RosterError>;
}

fn filtered(members: &[CandidateMember], filter: Option<&RosterFilter>) -> Vec<CandidateMember> {
    match filter {
        Some(filter) => filter.apply(members),
        None => members.to_vec(),
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryRoster {
    members: Vec<CandidateMember>,
}

impl InMemoryRoster {
    pub fn new(members: Vec<CandidateMember>) -> Self {
        Self { members }
    }
}

#[async_trait]
impl RosterProvider for InMemoryRoster {
    async fn fetch_candidates(
        &self,
        filter: Option<&RosterFilter>,
    ) -> Result<Vec<CandidateMember>, RosterError> {
        Ok(filtered(&self.members, filter))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    Json,
    Csv,
}

/// Roster read from disk on every fetch, so edits to the file act as a refresh.
#[derive(Debug, Clone)]
pub struct FileRoster {
    path: PathBuf,
    format: RosterFormat,
}

impl FileRoster {
    pub fn new(path: impl Into<PathBuf>, format: RosterFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Picks the format from the file extension, defaulting to JSON.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        let format = if is_csv {
            RosterFormat::Csv
        } else {
            RosterFormat::Json
        };
        Self { path, format }
    }

    pub fn load(&self) -> Result<Vec<CandidateMember>, RosterError> {
        let members = match self.format {
            RosterFormat::Json => persistence::load_roster_from_json(&self.path)?,
            RosterFormat::Csv => persistence::load_roster_from_csv(&self.path)?,
        };
        Ok(members)
    }
}

#[async_trait]
impl RosterProvider for FileRoster {
    async fn fetch_candidates(
        &self,
        filter: Option<&RosterFilter>,
    ) -> Result<Vec<CandidateMember>, RosterError> {
        let members = self.load()?;
        Ok(filtered(&members, filter))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum RosterStatus {
    Loaded,
    Unavailable(String),
}

/// Roster contents as seen by the planner, including whether loading failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterSnapshot {
    pub members: Vec<CandidateMember>,
    pub status: RosterStatus,
}

impl RosterSnapshot {
    pub fn loaded(members: Vec<CandidateMember>) -> Self {
        Self {
            members,
            status: RosterStatus::Loaded,
        }
    }

    /// True when the snapshot should render the "no data" indicator.
    pub fn no_data(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_available(&self) -> bool {
        self.status == RosterStatus::Loaded
    }

    pub fn find(&self, id: &str) -> Option<&CandidateMember> {
        self.members.iter().find(|member| member.id == id)
    }
}

/// Fetches the roster, degrading to an empty snapshot when the provider fails.
pub async fn fetch_or_empty<P>(provider: &P, filter: Option<&RosterFilter>) -> RosterSnapshot
where
    P: RosterProvider + ?Sized,
{
    match provider.fetch_candidates(filter).await {
        Ok(members) => {
            tracing::debug!(count = members.len(), "roster loaded");
            RosterSnapshot::loaded(members)
        }
        Err(err) => {
            tracing::warn!(error = %err, "roster unavailable; showing empty roster");
            RosterSnapshot {
                members: Vec::new(),
                status: RosterStatus::Unavailable(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<CandidateMember> {
        let mut a = CandidateMember::new("a", "Ana", Role::Developer, ExperienceTier::Senior, 90.0)
            .with_skills(["rust"]);
        a.department = "Platform".into();
        a.availability_percent = 50.0;
        let mut b = CandidateMember::new("b", "Ben", Role::Tester, ExperienceTier::Junior, 40.0);
        b.department = "QA".into();
        vec![a, b]
    }

    #[test]
    fn filter_fields_combine() {
        let members = roster();
        let by_role = RosterFilter {
            role: Some(Role::Tester),
            ..RosterFilter::default()
        };
        assert_eq!(by_role.apply(&members).len(), 1);

        let senior_platform = RosterFilter {
            department: Some("platform".into()),
            min_experience: Some(ExperienceTier::Mid),
            skill: Some("RUST".into()),
            ..RosterFilter::default()
        };
        assert_eq!(senior_platform.apply(&members)[0].id, "a");

        let available = RosterFilter {
            min_availability_percent: Some(75.0),
            ..RosterFilter::default()
        };
        assert_eq!(available.apply(&members)[0].id, "b");
    }

    struct FailingRoster;

    #[async_trait]
    impl RosterProvider for FailingRoster {
        async fn fetch_candidates(
            &self,
            _filter: Option<&RosterFilter>,
        ) -> Result<Vec<CandidateMember>, RosterError> {
            Err(RosterError::Transport("connection reset".into()))
        }
    }

    #[tokio::test]
    async fn failing_provider_degrades_to_empty_roster() {
        let snapshot = fetch_or_empty(&FailingRoster, None).await;
        assert!(snapshot.no_data());
        assert!(!snapshot.is_available());
        assert_eq!(
            snapshot.status,
            RosterStatus::Unavailable("roster transport error: connection reset".into())
        );
    }

    #[tokio::test]
    async fn missing_roster_file_degrades_to_empty_roster() {
        let provider = FileRoster::from_path("/nonexistent/roster.json");
        let snapshot = fetch_or_empty(&provider, None).await;
        assert!(snapshot.no_data());
        assert!(matches!(snapshot.status, RosterStatus::Unavailable(_)));
    }

    #[tokio::test]
    async fn in_memory_roster_applies_filter() {
        let provider = InMemoryRoster::new(roster());
        let filter = RosterFilter {
            role: Some(Role::Developer),
            ..RosterFilter::default()
        };
        let snapshot = fetch_or_empty(&provider, Some(&filter)).await;
        assert!(snapshot.is_available());
        assert_eq!(snapshot.members.len(), 1);
        assert!(snapshot.find("a").is_some());
    }
}
