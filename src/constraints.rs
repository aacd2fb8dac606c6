use crate::policy::AnalysisPolicy;
use serde::{Deserialize, Serialize};

/// Per-project inputs to one analysis pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConstraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
}

impl ProjectConstraints {
    pub fn new(budget: Option<f64>, duration_days: Option<u32>) -> Self {
        Self {
            budget,
            duration_days,
        }
    }

    /// Duration to plan with; zero is treated as absent.
    pub fn effective_duration_days(&self, policy: &AnalysisPolicy) -> u32 {
        match self.duration_days {
            Some(days) if days > 0 => days,
            _ => policy.default_duration_days,
        }
    }

    /// Budget usable as a divisor, if any.
    pub fn positive_budget(&self) -> Option<f64> {
        self.budget.filter(|budget| budget.is_finite() && *budget > 0.0)
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(budget) = self.budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err(format!("budget must be a non-negative amount (got {budget})"));
            }
        }
        if self.duration_days == Some(0) {
            return Err("duration_days must be positive".to_string());
        }
        Ok(())
    }
}
