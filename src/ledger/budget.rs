use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ValidationError;

use super::ledger::Ledger;

/// Running budget for the session. Submissions accumulate; nothing lowers it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetState {
    cumulative_budget: f64,
}

impl BudgetState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a persisted budget. Negative or non-finite values become 0.
    pub fn with_budget(cumulative_budget: f64) -> Self {
        let cumulative_budget = if cumulative_budget.is_finite() && cumulative_budget > 0.0 {
            cumulative_budget
        } else {
            0.0
        };
        Self { cumulative_budget }
    }

    pub fn cumulative_budget(&self) -> f64 {
        self.cumulative_budget
    }

    pub fn add_to_budget(&mut self, delta: f64) -> Result<f64, ValidationError> {
        if !delta.is_finite() || delta <= 0.0 {
            return Err(ValidationError::InvalidBudget(delta.to_string()));
        }
        let total = self.cumulative_budget + delta;
        if !total.is_finite() {
            return Err(ValidationError::InvalidBudget(delta.to_string()));
        }
        self.cumulative_budget = total;
        debug!(delta, total = self.cumulative_budget, "budget increased");
        Ok(self.cumulative_budget)
    }

    pub fn compute_balance(&self, ledger: &Ledger) -> f64 {
        self.cumulative_budget - ledger.total_expenses()
    }
}
