use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Inclusive team-size window considered healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSizeTarget {
    pub min: usize,
    pub max: usize,
}

impl TeamSizeTarget {
    pub fn contains(&self, size: usize) -> bool {
        size >= self.min && size <= self.max
    }
}

impl Default for TeamSizeTarget {
    fn default() -> Self {
        Self { min: 7, max: 8 }
    }
}

/// Tunable business constants used by the analyzer and the rule engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisPolicy {
    /// Used when the project does not state a duration.
    pub default_duration_days: u32,
    pub hours_per_day: f64,
    /// Assumed score for members without a measured performance score.
    pub default_performance_score: f64,
    pub target_team_size: TeamSizeTarget,
    pub min_average_experience: f64,
    pub max_budget_utilization_percent: f64,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self {
            default_duration_days: 40,
            hours_per_day: 8.0,
            default_performance_score: 80.0,
            target_team_size: TeamSizeTarget::default(),
            min_average_experience: 2.0,
            max_budget_utilization_percent: 90.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json policy: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid toml policy: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid policy: {0}")]
    Invalid(String),
}

impl AnalysisPolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.default_duration_days == 0 {
            return Err(PolicyError::Invalid(
                "default_duration_days must be positive".into(),
            ));
        }
        if !self.hours_per_day.is_finite() || self.hours_per_day <= 0.0 {
            return Err(PolicyError::Invalid(format!(
                "hours_per_day must be positive (got {})",
                self.hours_per_day
            )));
        }
        if !(0.0..=100.0).contains(&self.default_performance_score) {
            return Err(PolicyError::Invalid(format!(
                "default_performance_score must be between 0 and 100 (got {})",
                self.default_performance_score
            )));
        }
        if self.target_team_size.min > self.target_team_size.max {
            return Err(PolicyError::Invalid(format!(
                "target_team_size min {} exceeds max {}",
                self.target_team_size.min, self.target_team_size.max
            )));
        }
        if !self.min_average_experience.is_finite()
            || !self.max_budget_utilization_percent.is_finite()
        {
            return Err(PolicyError::Invalid(
                "experience and budget thresholds must be finite".into(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> Result<Self, PolicyError> {
        let policy: AnalysisPolicy = serde_json::from_str(input)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn from_toml_str(input: &str) -> Result<Self, PolicyError> {
        let policy: AnalysisPolicy = toml::from_str(input)?;
        policy.validate()?;
        Ok(policy)
    }
}

/// Loads a policy file, choosing TOML for `.toml` paths and JSON otherwise.
pub fn load_policy<P: AsRef<Path>>(path: P) -> Result<AnalysisPolicy, PolicyError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        AnalysisPolicy::from_toml_str(&contents)
    } else {
        AnalysisPolicy::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let policy = AnalysisPolicy::from_toml_str(
            r#"
default_performance_score = 70.0

[target_team_size]
min = 5
max = 9
"#,
        )
        .unwrap();
        assert_eq!(policy.default_performance_score, 70.0);
        assert_eq!(policy.target_team_size, TeamSizeTarget { min: 5, max: 9 });
        assert_eq!(policy.default_duration_days, 40);
        assert_eq!(policy.max_budget_utilization_percent, 90.0);
    }

    #[test]
    fn inverted_team_size_is_rejected() {
        let err = AnalysisPolicy::from_json_str(r#"{"target_team_size": {"min": 9, "max": 3}}"#)
            .unwrap_err();
        assert!(matches!(err, PolicyError::Invalid(_)));
    }

    #[test]
    fn load_policy_picks_format_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("policy.toml");
        fs::write(&toml_path, "hours_per_day = 6.0\n").unwrap();
        assert_eq!(load_policy(&toml_path).unwrap().hours_per_day, 6.0);

        let json_path = dir.path().join("policy.json");
        fs::write(&json_path, r#"{"default_duration_days": 20}"#).unwrap();
        assert_eq!(load_policy(&json_path).unwrap().default_duration_days, 20);
    }
}
