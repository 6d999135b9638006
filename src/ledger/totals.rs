use std::fmt;

use serde::Serialize;

use super::{budget::BudgetState, ledger::Ledger};

/// Derived figures for the three summary cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub budget: f64,
    pub expenses: f64,
    pub balance: f64,
}

impl Totals {
    pub fn compute(budget: &BudgetState, ledger: &Ledger) -> Self {
        let expenses = ledger.total_expenses();
        Self {
            budget: budget.cumulative_budget(),
            expenses,
            balance: budget.cumulative_budget() - expenses,
        }
    }

    /// Card label and formatted value, in display order.
    pub fn cards(&self) -> [(&'static str, String); 3] {
        [
            ("Budget", format_amount(self.budget)),
            ("Expenses", format_amount(self.expenses)),
            ("Balance", format_amount(self.balance)),
        ]
    }
}

impl fmt::Display for Totals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Budget {} | Expenses {} | Balance {}",
            format_amount(self.budget),
            format_amount(self.expenses),
            format_amount(self.balance)
        )
    }
}

/// Formats a money value as `$25`, `$12.50` or `-$5`.
pub fn format_amount(value: f64) -> String {
    let cents = (value.abs() * 100.0).round();
    let sign = if value < 0.0 && cents > 0.0 { "-" } else { "" };
    if cents % 100.0 == 0.0 {
        format!("{sign}${:.0}", cents / 100.0)
    } else {
        format!("{sign}${:.2}", cents / 100.0)
    }
}

/// Storage form of a number: no currency sign, no trailing `.0`.
pub fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_and_fractional_amounts() {
        assert_eq!(format_amount(25.0), "$25");
        assert_eq!(format_amount(12.5), "$12.50");
        assert_eq!(format_amount(-5.0), "-$5");
        assert_eq!(format_amount(0.0), "$0");
        assert_eq!(format_amount(-0.0), "$0");
        assert_eq!(format_amount(0.999), "$1");
    }

    #[test]
    fn plain_format_drops_trailing_zero() {
        assert_eq!(format_plain(150.0), "150");
        assert_eq!(format_plain(-20.0), "-20");
        assert_eq!(format_plain(2.25), "2.25");
    }

    #[test]
    fn computes_from_budget_and_ledger() {
        let mut ledger = Ledger::new();
        ledger.add_expense("Rent", 80.0, 1).unwrap();
        let totals = Totals::compute(&BudgetState::with_budget(200.0), &ledger);
        assert_eq!(
            totals,
            Totals {
                budget: 200.0,
                expenses: 80.0,
                balance: 120.0
            }
        );
        assert_eq!(totals.cards()[2], ("Balance", "$120".to_string()));
        assert_eq!(
            totals.to_string(),
            "Budget $200 | Expenses $80 | Balance $120"
        );
    }
}
