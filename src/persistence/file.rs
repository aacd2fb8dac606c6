use super::{PersistenceError, PersistenceResult};
use crate::member::{CandidateMember, ExperienceTier, Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct RosterSnapshot {
    members: Vec<CandidateMember>,
}

pub fn save_roster_to_json<P: AsRef<Path>>(
    members: &[CandidateMember],
    path: P,
) -> PersistenceResult<()> {
    super::validate_members(members)?;
    let snapshot = RosterSnapshot {
        members: members.to_vec(),
    };
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_roster_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<CandidateMember>> {
    let file = File::open(path)?;
    let snapshot: RosterSnapshot = serde_json::from_reader(file)?;
    super::validate_members(&snapshot.members)?;
    Ok(snapshot.members)
}

#[derive(Default, Serialize, Deserialize)]
struct MemberCsvRecord {
    id: String,
    name: String,
    role: String,
    skills: String,
    availability_percent: f64,
    department: String,
    experience_tier: String,
    hourly_rate: f64,
    #[serde(default)]
    performance_score: String,
    #[serde(default)]
    is_team_lead: String,
}

impl From<&CandidateMember> for MemberCsvRecord {
    fn from(member: &CandidateMember) -> Self {
        MemberCsvRecord {
            id: member.id.clone(),
            name: member.name.clone(),
            role: member.role.as_str().to_string(),
            skills: join_skills(&member.skills),
            availability_percent: member.availability_percent,
            department: member.department.clone(),
            experience_tier: member.experience_tier.as_str().to_string(),
            hourly_rate: member.hourly_rate,
            performance_score: member
                .performance_score
                .map(|v| v.to_string())
                .unwrap_or_default(),
            is_team_lead: member
                .is_team_lead
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }
}

impl MemberCsvRecord {
    fn into_member(self) -> PersistenceResult<CandidateMember> {
        let role = self
            .role
            .parse::<Role>()
            .map_err(|err| PersistenceError::InvalidData(format!("member {}: {err}", self.id)))?;
        let experience_tier = self
            .experience_tier
            .parse::<ExperienceTier>()
            .map_err(|err| PersistenceError::InvalidData(format!("member {}: {err}", self.id)))?;
        let performance_score = parse_f64(&self.performance_score)?;
        let is_team_lead = parse_bool(&self.is_team_lead)?;

        let mut member =
            CandidateMember::new(self.id, self.name, role, experience_tier, self.hourly_rate);
        member.skills = split_skills(&self.skills);
        member.availability_percent = self.availability_percent;
        member.department = self.department;
        member.performance_score = performance_score;
        member.is_team_lead = is_team_lead;
        Ok(member)
    }
}

pub fn save_roster_to_csv<P: AsRef<Path>>(
    members: &[CandidateMember],
    path: P,
) -> PersistenceResult<()> {
    super::validate_members(members)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    for member in members {
        writer.serialize(MemberCsvRecord::from(member))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn load_roster_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<CandidateMember>> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let mut members = Vec::new();
    for record in reader.deserialize::<MemberCsvRecord>() {
        members.push(record?.into_member()?);
    }
    super::validate_members(&members)?;
    Ok(members)
}

fn join_skills(skills: &BTreeSet<String>) -> String {
    skills.iter().cloned().collect::<Vec<_>>().join(";")
}

fn split_skills(input: &str) -> BTreeSet<String> {
    input
        .split(';')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_f64(input: &str) -> PersistenceResult<Option<f64>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    input
        .trim()
        .parse::<f64>()
        .map(Some)
        .map_err(|e| PersistenceError::InvalidData(format!("invalid number '{input}': {e}")))
}

fn parse_bool(input: &str) -> PersistenceResult<Option<bool>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    input
        .trim()
        .to_ascii_lowercase()
        .parse::<bool>()
        .map(Some)
        .map_err(|e| PersistenceError::InvalidData(format!("invalid bool '{input}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_split_trims_and_drops_blanks() {
        let skills = split_skills(" rust ;; sql;");
        assert_eq!(
            skills.into_iter().collect::<Vec<_>>(),
            vec!["rust".to_string(), "sql".to_string()]
        );
    }

    #[test]
    fn blank_optional_cells_parse_as_none() {
        assert_eq!(parse_f64("  ").unwrap(), None);
        assert_eq!(parse_bool("TRUE").unwrap(), Some(true));
        assert!(parse_bool("maybe").is_err());
    }
}
