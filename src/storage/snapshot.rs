//! Encoding of session state into the three persisted keys.

use tracing::{info, warn};

use crate::{
    errors::Result,
    ledger::{totals::format_plain, BudgetState, ExpenseDraft, ExpenseRecord, Ledger},
};

use super::KeyValueStore;

pub const ITEM_LIST_KEY: &str = "itemList";
pub const BUDGET_KEY: &str = "budget";
pub const BALANCE_KEY: &str = "balance";

const BALANCE_TOLERANCE: f64 = 1e-6;

/// State recovered from a store, plus anything that had to be repaired.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub ledger: Ledger,
    pub budget: BudgetState,
    pub warnings: Vec<String>,
}

/// Reads the snapshot. Absent keys mean a fresh session; a malformed item
/// list is an error, while a bad budget or balance value is repaired.
pub fn load_snapshot(store: &dyn KeyValueStore) -> Result<LoadReport> {
    let mut warnings = Vec::new();

    let records: Vec<ExpenseRecord> = match store.get(ITEM_LIST_KEY)? {
        Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)?,
        _ => Vec::new(),
    };
    let id_floor = records
        .iter()
        .map(|record| record.id.saturating_add(1))
        .max()
        .unwrap_or(0);
    let records = records
        .into_iter()
        .filter(|record| {
            let valid = ExpenseDraft::new(record.title.as_str(), record.amount, 0).is_ok();
            if !valid {
                warnings.push(format!("dropped invalid stored expense #{}", record.id));
            }
            valid
        })
        .collect();
    let mut ledger = Ledger::from_records(records);
    ledger.reserve_ids_below(id_floor);
    if ledger.ids_exhausted() {
        warnings
            .push("stored expense ids reach the maximum; new expenses will be refused".into());
    }

    let budget = match store.get(BUDGET_KEY)? {
        None => BudgetState::new(),
        Some(raw) => match parse_stored_number(&raw) {
            Some(value) if value >= 0.0 => BudgetState::with_budget(value),
            Some(value) => {
                warnings.push(format!("stored budget {value} is negative; using 0"));
                BudgetState::new()
            }
            None => {
                warnings.push(format!("stored budget `{raw}` is not a number; using 0"));
                BudgetState::new()
            }
        },
    };

    let balance = budget.compute_balance(&ledger);
    if let Some(raw) = store.get(BALANCE_KEY)? {
        match parse_stored_number(&raw) {
            Some(stored) if (stored - balance).abs() <= BALANCE_TOLERANCE => {}
            _ => warnings.push(format!(
                "stored balance `{raw}` does not match recomputed balance {}",
                format_plain(balance)
            )),
        }
    }

    for warning in &warnings {
        warn!("{warning}");
    }
    info!(
        expenses = ledger.len(),
        budget = budget.cumulative_budget(),
        "snapshot loaded"
    );

    Ok(LoadReport {
        ledger,
        budget,
        warnings,
    })
}

/// Writes all three keys for the given state.
pub fn save_snapshot(
    store: &mut dyn KeyValueStore,
    ledger: &Ledger,
    budget: &BudgetState,
) -> Result<()> {
    let items = serde_json::to_string(ledger)?;
    store.set(ITEM_LIST_KEY, &items)?;
    store.set(BUDGET_KEY, &format_plain(budget.cumulative_budget()))?;
    store.set(BALANCE_KEY, &format_plain(budget.compute_balance(ledger)))?;
    Ok(())
}

pub fn clear_snapshot(store: &mut dyn KeyValueStore) -> Result<()> {
    for key in [ITEM_LIST_KEY, BUDGET_KEY, BALANCE_KEY] {
        store.remove(key)?;
    }
    Ok(())
}

fn parse_stored_number(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
