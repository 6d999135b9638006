//! Expense ledger, budget state, and derived totals.

pub mod budget;
pub mod expense;
pub mod input;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod totals;

pub use budget::BudgetState;
pub use expense::{ExpenseDraft, ExpenseRecord};
pub use input::{parse_budget, parse_expense};
pub use ledger::Ledger;
pub use totals::{format_amount, Totals};
