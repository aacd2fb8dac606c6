use crate::analysis::AllocationAnalysis;
use crate::member::{CandidateMember, Role};
use crate::policy::AnalysisPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-blocking advice about the current team composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    Understaffed { team_size: usize, target_min: usize },
    Oversized { team_size: usize, target_max: usize },
    MissingManager,
    MissingTester,
    LowExperience { average: f64, minimum: f64 },
    OverBudget { utilization_percent: f64, threshold_percent: f64 },
    Optimal,
}

impl Advisory {
    pub fn kind(&self) -> &'static str {
        match self {
            Advisory::Understaffed { .. } => "understaffed",
            Advisory::Oversized { .. } => "oversized",
            Advisory::MissingManager => "missing_manager",
            Advisory::MissingTester => "missing_tester",
            Advisory::LowExperience { .. } => "low_experience",
            Advisory::OverBudget { .. } => "over_budget",
            Advisory::Optimal => "optimal",
        }
    }

    pub fn is_warning(&self) -> bool {
        !matches!(self, Advisory::Optimal)
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::Understaffed {
                team_size,
                target_min,
            } => write!(
                f,
                "Team is understaffed ({team_size} members); aim for at least {target_min}."
            ),
            Advisory::Oversized {
                team_size,
                target_max,
            } => write!(
                f,
                "Team is oversized ({team_size} members); aim for at most {target_max}."
            ),
            Advisory::MissingManager => write!(f, "Add a project manager to the team."),
            Advisory::MissingTester => write!(f, "Add a tester to the team."),
            Advisory::LowExperience { average, .. } => write!(
                f,
                "Average experience is low ({average:.2}); add senior members for mentoring."
            ),
            Advisory::OverBudget {
                utilization_percent,
                ..
            } => write!(
                f,
                "Projected cost uses {utilization_percent:.1}% of the budget; optimize the composition to reduce cost."
            ),
            Advisory::Optimal => write!(f, "Team composition looks optimal."),
        }
    }
}

/// Evaluates every rule in fixed order; all matching rules contribute.
/// `Optimal` appears alone and only when no other rule fired.
pub fn recommend(
    members: &[CandidateMember],
    analysis: &AllocationAnalysis,
    policy: &AnalysisPolicy,
) -> Vec<Advisory> {
    let mut advisories = Vec::new();
    let team_size = members.len();
    let target = policy.target_team_size;

    if team_size < target.min {
        advisories.push(Advisory::Understaffed {
            team_size,
            target_min: target.min,
        });
    } else if team_size > target.max {
        advisories.push(Advisory::Oversized {
            team_size,
            target_max: target.max,
        });
    }

    if !members.iter().any(|member| member.role == Role::Manager) {
        advisories.push(Advisory::MissingManager);
    }

    if !members.iter().any(|member| member.role == Role::Tester) {
        advisories.push(Advisory::MissingTester);
    }

    if analysis.average_experience_score < policy.min_average_experience {
        advisories.push(Advisory::LowExperience {
            average: analysis.average_experience_score,
            minimum: policy.min_average_experience,
        });
    }

    if analysis.budget_utilization_percent > policy.max_budget_utilization_percent {
        advisories.push(Advisory::OverBudget {
            utilization_percent: analysis.budget_utilization_percent,
            threshold_percent: policy.max_budget_utilization_percent,
        });
    }

    if advisories.is_empty() {
        advisories.push(Advisory::Optimal);
    }
    advisories
}

pub fn recommend_messages(
    members: &[CandidateMember],
    analysis: &AllocationAnalysis,
    policy: &AnalysisPolicy,
) -> Vec<String> {
    recommend(members, analysis, policy)
        .iter()
        .map(Advisory::message)
        .collect()
}
