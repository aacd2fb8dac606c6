use crate::constraints::ProjectConstraints;
use crate::member::{CandidateMember, Role};
use crate::policy::AnalysisPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Staffing metrics derived from a selection. Recomputed on demand, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationAnalysis {
    pub team_size: usize,
    pub total_cost: f64,
    pub total_hours: f64,
    pub role_distribution: BTreeMap<Role, usize>,
    pub average_experience_score: f64,
    pub average_performance_score: f64,
    pub average_availability_percent: f64,
    pub budget_utilization_percent: f64,
    pub team_lead_count: usize,
    pub skill_coverage: BTreeMap<String, usize>,
}

impl AllocationAnalysis {
    pub fn role_count(&self, role: Role) -> usize {
        self.role_distribution.get(&role).copied().unwrap_or(0)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role_count(role) > 0
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = vec![
            format!("members={}", self.team_size),
            format!("cost={:.2}", self.total_cost),
            format!("budget={:.1}%", self.budget_utilization_percent),
            format!("experience={:.2}", self.average_experience_score),
            format!("performance={:.1}", self.average_performance_score),
        ];
        if !self.role_distribution.is_empty() {
            let roles = self
                .role_distribution
                .iter()
                .map(|(role, count)| format!("{role}:{count}"))
                .collect::<Vec<_>>()
                .join(",");
            parts.push(format!("roles={roles}"));
        }
        parts.join(", ")
    }
}

fn mean<I>(values: I, count: usize) -> f64
where
    I: Iterator<Item = f64>,
{
    if count == 0 {
        return 0.0;
    }
    values.sum::<f64>() / count as f64
}

/// Computes staffing metrics for `members` under the given constraints.
///
/// An empty team yields the all-zero analysis. Cost is
/// `hourly_rate * duration_days * hours_per_day` summed over the team, and
/// utilization is reported only against a positive budget.
pub fn analyze(
    members: &[CandidateMember],
    constraints: &ProjectConstraints,
    policy: &AnalysisPolicy,
) -> AllocationAnalysis {
    if members.is_empty() {
        return AllocationAnalysis::default();
    }

    let team_size = members.len();
    let duration_days = constraints.effective_duration_days(policy) as f64;
    let hours_per_member = duration_days * policy.hours_per_day;

    let total_cost = members
        .iter()
        .map(|member| member.hourly_rate * hours_per_member)
        .sum::<f64>();

    let mut role_distribution = BTreeMap::new();
    let mut skill_coverage: BTreeMap<String, usize> = BTreeMap::new();
    for member in members {
        *role_distribution.entry(member.role).or_insert(0) += 1;
        for skill in &member.skills {
            *skill_coverage.entry(skill.clone()).or_insert(0) += 1;
        }
    }

    let average_experience_score = mean(
        members.iter().map(|member| member.experience_tier.score()),
        team_size,
    );
    let average_performance_score = mean(
        members.iter().map(|member| {
            member
                .performance_score
                .unwrap_or(policy.default_performance_score)
        }),
        team_size,
    );
    let average_availability_percent = mean(
        members.iter().map(|member| member.availability_percent),
        team_size,
    );

    let budget_utilization_percent = constraints
        .positive_budget()
        .map(|budget| total_cost / budget * 100.0)
        .unwrap_or(0.0);

    AllocationAnalysis {
        team_size,
        total_cost,
        total_hours: hours_per_member * team_size as f64,
        role_distribution,
        average_experience_score,
        average_performance_score,
        average_availability_percent,
        budget_utilization_percent,
        team_lead_count: members.iter().filter(|member| member.team_lead()).count(),
        skill_coverage,
    }
}
