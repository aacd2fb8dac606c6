use crate::member::CandidateMember;
use std::collections::HashSet;
use thiserror::Error;

const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct MemberValidationError {
    message: String,
}

impl MemberValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn within_percent_range(value: f64) -> bool {
    value.is_finite() && value >= -EPSILON && value <= 100.0 + EPSILON
}

pub fn validate_member(member: &CandidateMember) -> Result<(), MemberValidationError> {
    if member.id.trim().is_empty() {
        return Err(MemberValidationError::new(format!(
            "member '{}' requires a non-empty id",
            member.name
        )));
    }

    if !member.hourly_rate.is_finite() || member.hourly_rate < -EPSILON {
        return Err(MemberValidationError::new(format!(
            "member {} has invalid hourly_rate {}",
            member.id, member.hourly_rate
        )));
    }

    if !within_percent_range(member.availability_percent) {
        return Err(MemberValidationError::new(format!(
            "member {} has invalid availability_percent {} (must be between 0 and 100)",
            member.id, member.availability_percent
        )));
    }

    if let Some(score) = member.performance_score {
        if !within_percent_range(score) {
            return Err(MemberValidationError::new(format!(
                "member {} has invalid performance_score {} (must be between 0 and 100)",
                member.id, score
            )));
        }
    }

    for skill in &member.skills {
        if skill.trim().is_empty() {
            return Err(MemberValidationError::new(format!(
                "member {} lists an empty skill",
                member.id
            )));
        }
    }

    Ok(())
}

pub fn validate_roster(members: &[CandidateMember]) -> Result<(), MemberValidationError> {
    let mut seen_ids = HashSet::with_capacity(members.len());
    for member in members {
        if !seen_ids.insert(member.id.as_str()) {
            return Err(MemberValidationError::new(format!(
                "duplicate member id {}",
                member.id
            )));
        }
        validate_member(member)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::{ExperienceTier, Role};

    fn member(id: &str) -> CandidateMember {
        CandidateMember::new(id, "Sam", Role::Developer, ExperienceTier::Mid, 70.0)
    }

    #[test]
    fn accepts_well_formed_roster() {
        let roster = vec![member("a"), member("b")];
        assert!(validate_roster(&roster).is_ok());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let roster = vec![member("a"), member("a")];
        let err = validate_roster(&roster).unwrap_err();
        assert_eq!(err.to_string(), "duplicate member id a");
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut negative_rate = member("a");
        negative_rate.hourly_rate = -5.0;
        assert!(validate_member(&negative_rate).is_err());

        let mut over_available = member("b");
        over_available.availability_percent = 120.0;
        assert!(
            validate_member(&over_available)
                .unwrap_err()
                .to_string()
                .contains("availability_percent")
        );

        let mut bad_score = member("c");
        bad_score.performance_score = Some(f64::NAN);
        assert!(validate_member(&bad_score).is_err());

        let blank = member("  ");
        assert!(validate_member(&blank).is_err());
    }
}
