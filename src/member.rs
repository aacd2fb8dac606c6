use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Roles a candidate can hold on a project team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Manager,
    Developer,
    Designer,
    Analyst,
    Tester,
    Devops,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Manager,
        Role::Developer,
        Role::Designer,
        Role::Analyst,
        Role::Tester,
        Role::Devops,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Manager => "manager",
            Role::Developer => "developer",
            Role::Designer => "designer",
            Role::Analyst => "analyst",
            Role::Tester => "tester",
            Role::Devops => "devops",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manager" => Ok(Role::Manager),
            "developer" => Ok(Role::Developer),
            "designer" => Ok(Role::Designer),
            "analyst" => Ok(Role::Analyst),
            "tester" => Ok(Role::Tester),
            "devops" => Ok(Role::Devops),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Ordinal seniority classification. Declaration order is the ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceTier {
    Junior,
    Mid,
    Senior,
    Lead,
}

impl ExperienceTier {
    /// Numeric score used for averaging: junior=1, mid=2, senior=3, lead=4.
    pub fn score(&self) -> f64 {
        match self {
            ExperienceTier::Junior => 1.0,
            ExperienceTier::Mid => 2.0,
            ExperienceTier::Senior => 3.0,
            ExperienceTier::Lead => 4.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceTier::Junior => "junior",
            ExperienceTier::Mid => "mid",
            ExperienceTier::Senior => "senior",
            ExperienceTier::Lead => "lead",
        }
    }
}

impl fmt::Display for ExperienceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "junior" => Ok(ExperienceTier::Junior),
            "mid" => Ok(ExperienceTier::Mid),
            "senior" => Ok(ExperienceTier::Senior),
            "lead" => Ok(ExperienceTier::Lead),
            other => Err(format!("unknown experience tier '{other}'")),
        }
    }
}

/// A person available for assignment, as supplied by the roster source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMember {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    /// Share of working time the person can commit, 0-100.
    pub availability_percent: f64,
    #[serde(default)]
    pub department: String,
    pub experience_tier: ExperienceTier,
    /// Non-negative currency amount per hour.
    pub hourly_rate: f64,
    /// Measured performance, 0-100. Unscored members fall back to the policy default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_team_lead: Option<bool>,
}

impl CandidateMember {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        experience_tier: ExperienceTier,
        hourly_rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            skills: BTreeSet::new(),
            availability_percent: 100.0,
            department: String::new(),
            experience_tier,
            hourly_rate,
            performance_score: None,
            is_team_lead: None,
        }
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn team_lead(&self) -> bool {
        self.is_team_lead.unwrap_or(false)
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(skill))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experience_tiers_are_ordered_and_scored() {
        assert!(ExperienceTier::Junior < ExperienceTier::Mid);
        assert!(ExperienceTier::Senior < ExperienceTier::Lead);
        let scores: Vec<f64> = [
            ExperienceTier::Junior,
            ExperienceTier::Mid,
            ExperienceTier::Senior,
            ExperienceTier::Lead,
        ]
        .iter()
        .map(ExperienceTier::score)
        .collect();
        assert_eq!(scores, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Tester".parse::<Role>(), Ok(Role::Tester));
        assert_eq!(" devops ".parse::<Role>(), Ok(Role::Devops));
        assert!("pilot".parse::<Role>().is_err());
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn candidate_deserializes_with_optional_fields_missing() {
        let json = r#"{
            "id": "u-1",
            "name": "Ada",
            "role": "developer",
            "availability_percent": 80,
            "experience_tier": "senior",
            "hourly_rate": 95.0
        }"#;
        let member: CandidateMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.role, Role::Developer);
        assert!(member.skills.is_empty());
        assert_eq!(member.performance_score, None);
        assert!(!member.team_lead());
    }

    #[test]
    fn skill_lookup_ignores_case() {
        let member = CandidateMember::new("u-2", "Grace", Role::Analyst, ExperienceTier::Mid, 60.0)
            .with_skills(["SQL", "Reporting"]);
        assert!(member.has_skill("sql"));
        assert!(!member.has_skill("rust"));
    }
}
