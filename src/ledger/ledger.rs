use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{LedgerError, Result};

use super::expense::{ExpenseDraft, ExpenseRecord};

/// Ordered expense records plus the id counter for the session.
///
/// Insertion order is display order. Ids are never recycled: the counter
/// only moves forward, even after removals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ExpenseRecord>", into = "Vec<ExpenseRecord>")]
pub struct Ledger {
    records: Vec<ExpenseRecord>,
    next_id: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from persisted records, seeding the counter from
    /// the largest existing id. A record holding `u64::MAX` leaves the
    /// counter exhausted.
    pub fn from_records(records: Vec<ExpenseRecord>) -> Self {
        let next_id = records
            .iter()
            .map(|record| record.id)
            .max()
            .map_or(0, |max| max.saturating_add(1));
        Self { records, next_id }
    }

    pub fn add_expense(
        &mut self,
        title: impl Into<String>,
        amount: f64,
        quantity: i64,
    ) -> Result<ExpenseRecord> {
        let draft = ExpenseDraft::new(title, amount, quantity)?;
        self.push_draft(draft)
    }

    /// Appends an already validated draft under the next id.
    pub fn push_draft(&mut self, draft: ExpenseDraft) -> Result<ExpenseRecord> {
        let following = self
            .next_id
            .checked_add(1)
            .ok_or(LedgerError::IdsExhausted)?;
        let record = draft.into_record(self.next_id);
        self.next_id = following;
        debug!(id = record.id, title = %record.title, "expense added");
        self.records.push(record.clone());
        Ok(record)
    }

    /// True once `u64::MAX` is reached; further appends are refused.
    pub fn ids_exhausted(&self) -> bool {
        self.next_id == u64::MAX
    }

    /// Removes the record with `id`. Absent ids are ignored.
    pub fn remove_expense(&mut self, id: u64) -> Option<ExpenseRecord> {
        let index = self.records.iter().position(|record| record.id == id)?;
        let removed = self.records.remove(index);
        debug!(id, "expense removed");
        Some(removed)
    }

    pub fn find_expense(&self, id: u64) -> Option<&ExpenseRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Destructive edit: the record leaves the ledger and is handed back so
    /// the caller can resubmit it. The resubmitted record gets a fresh id.
    pub fn edit_expense(&mut self, id: u64) -> Option<ExpenseRecord> {
        self.remove_expense(id)
    }

    pub fn total_expenses(&self) -> f64 {
        self.records.iter().map(ExpenseRecord::line_total).sum()
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next appended record will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Moves the counter forward so no id below `floor` is handed out.
    pub fn reserve_ids_below(&mut self, floor: u64) {
        self.next_id = self.next_id.max(floor);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl From<Vec<ExpenseRecord>> for Ledger {
    fn from(records: Vec<ExpenseRecord>) -> Self {
        Self::from_records(records)
    }
}

impl From<Ledger> for Vec<ExpenseRecord> {
    fn from(ledger: Ledger) -> Self {
        ledger.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, amount: f64, quantity: u32) -> ExpenseRecord {
        ExpenseRecord {
            id,
            title: format!("item-{id}"),
            amount,
            quantity,
        }
    }

    #[test]
    fn empty_ledger_totals_zero() {
        let ledger = Ledger::new();
        assert_eq!(ledger.total_expenses(), 0.0);
        assert!(ledger.is_empty());
        assert_eq!(ledger.next_id(), 0);
    }

    #[test]
    fn add_assigns_sequential_ids() {
        let mut ledger = Ledger::new();
        let first = ledger.add_expense("Coffee", 3.0, 1).unwrap();
        let second = ledger.add_expense("Lunch", 12.0, 1).unwrap();
        assert_eq!(first.id, 0);
        assert_eq!(second.id, 1);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn counter_is_seeded_from_max_id() {
        let ledger = Ledger::from_records(vec![
            record(4, 1.0, 1),
            record(9, 1.0, 1),
            record(2, 1.0, 1),
        ]);
        assert_eq!(ledger.next_id(), 10);
    }

    #[test]
    fn clear_keeps_counter_moving_forward() {
        let mut ledger = Ledger::new();
        ledger.add_expense("Coffee", 3.0, 1).unwrap();
        ledger.clear();
        let next = ledger.add_expense("Tea", 2.0, 1).unwrap();
        assert_eq!(next.id, 1);
    }

    #[test]
    fn remove_returns_record_when_present() {
        let mut ledger = Ledger::from_records(vec![record(0, 5.0, 2)]);
        assert_eq!(ledger.remove_expense(0).map(|r| r.id), Some(0));
        assert!(ledger.remove_expense(0).is_none());
    }

    #[test]
    fn failed_add_does_not_advance_counter() {
        let mut ledger = Ledger::new();
        assert!(ledger.add_expense("", 1.0, 1).is_err());
        assert_eq!(ledger.next_id(), 0);
    }

    #[test]
    fn max_id_exhausts_counter_instead_of_wrapping() {
        let mut ledger = Ledger::from_records(vec![record(u64::MAX, 1.0, 1)]);
        assert!(ledger.ids_exhausted());
        assert!(matches!(
            ledger.add_expense("Tea", 1.0, 1),
            Err(LedgerError::IdsExhausted)
        ));
        assert_eq!(ledger.len(), 1);

        let mut ledger = Ledger::from_records(vec![record(u64::MAX - 2, 1.0, 1)]);
        assert_eq!(ledger.add_expense("Tea", 1.0, 1).unwrap().id, u64::MAX - 1);
        assert!(ledger.add_expense("Jam", 1.0, 1).is_err());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn serializes_as_plain_record_array() {
        let ledger = Ledger::from_records(vec![record(1, 2.0, 3)]);
        let json = serde_json::to_string(&ledger).unwrap();
        assert!(json.starts_with('['));
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back.records(), ledger.records());
        assert_eq!(back.next_id(), 2);
    }
}
