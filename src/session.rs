//! Session context tying the ledger, budget, notices and store together.
//!
//! Every user action runs the same pipeline: validate, mutate, recompute,
//! persist. A rejected input leaves state untouched and raises a notice. A
//! failed write rolls the in-memory state back to the last saved snapshot.

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::{
    config::Config,
    errors::{LedgerError, Result, ValidationError},
    ledger::{
        parse_budget, parse_expense, BudgetState, ExpenseDraft, ExpenseRecord, Ledger, Totals,
    },
    notify::{Notice, Notifier},
    storage::{clear_snapshot, load_snapshot, save_snapshot, KeyValueStore},
};

/// Raw text of the three expense input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputForm {
    pub title: String,
    pub amount: String,
    pub quantity: String,
}

impl InputForm {
    pub fn new(
        title: impl Into<String>,
        amount: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            amount: amount.into(),
            quantity: quantity.into(),
        }
    }

    pub fn from_record(record: &ExpenseRecord) -> Self {
        Self {
            title: record.title.clone(),
            amount: crate::ledger::totals::format_plain(record.amount),
            quantity: record.quantity.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.amount.is_empty() && self.quantity.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// State restored when a write fails.
struct Checkpoint {
    ledger: Ledger,
    budget: BudgetState,
    form: InputForm,
}

pub struct Session {
    ledger: Ledger,
    budget: BudgetState,
    notifier: Notifier,
    form: InputForm,
    store: Box<dyn KeyValueStore>,
}

impl Session {
    /// Restores the session from `store`. Returns repairs made while loading.
    pub fn open(store: Box<dyn KeyValueStore>, config: &Config) -> Result<(Self, Vec<String>)> {
        let report = load_snapshot(store.as_ref())?;
        let session = Self {
            ledger: report.ledger,
            budget: report.budget,
            notifier: Notifier::with_delay_secs(config.notice_delay_secs),
            form: InputForm::default(),
            store,
        };
        Ok((session, report.warnings))
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        self.ledger.records()
    }

    pub fn budget(&self) -> &BudgetState {
        &self.budget
    }

    pub fn totals(&self) -> Totals {
        Totals::compute(&self.budget, &self.ledger)
    }

    pub fn form(&self) -> &InputForm {
        &self.form
    }

    pub fn set_form(&mut self, form: InputForm) {
        self.form = form;
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    pub fn notice(&mut self) -> Option<&Notice> {
        self.notifier.current()
    }

    pub fn notice_at(&mut self, now: DateTime<Utc>) -> Option<&Notice> {
        self.notifier.current_at(now)
    }

    pub fn submit_budget(&mut self, raw: &str) -> Result<Totals> {
        let delta = parse_budget(raw).map_err(|err| self.reject(err))?;
        self.add_to_budget(delta)
    }

    pub fn add_to_budget(&mut self, delta: f64) -> Result<Totals> {
        let checkpoint = self.checkpoint();
        self.budget
            .add_to_budget(delta)
            .map_err(|err| self.reject(err))?;
        self.commit(checkpoint)?;
        Ok(self.totals())
    }

    /// Submits the three raw expense fields. The form is reset on success.
    pub fn submit_expense(
        &mut self,
        title: &str,
        amount: &str,
        quantity: &str,
    ) -> Result<ExpenseRecord> {
        let draft = parse_expense(title, amount, quantity).map_err(|err| self.reject(err))?;
        self.append(draft)
    }

    /// Submits whatever the input form currently holds.
    pub fn submit_form(&mut self) -> Result<ExpenseRecord> {
        let InputForm {
            title,
            amount,
            quantity,
        } = self.form.clone();
        self.submit_expense(&title, &amount, &quantity)
    }

    pub fn add_expense(
        &mut self,
        title: impl Into<String>,
        amount: f64,
        quantity: i64,
    ) -> Result<ExpenseRecord> {
        let draft = ExpenseDraft::new(title, amount, quantity).map_err(|err| self.reject(err))?;
        self.append(draft)
    }

    /// Removes `id` if present; deleting an unknown id is not an error.
    pub fn delete_expense(&mut self, id: u64) -> Result<Option<ExpenseRecord>> {
        let checkpoint = self.checkpoint();
        let removed = self.ledger.remove_expense(id);
        if removed.is_none() {
            warn!(id, "delete requested for unknown expense");
        }
        self.commit(checkpoint)?;
        Ok(removed)
    }

    /// Loads the record into the input form and removes it from the ledger.
    /// Resubmitting the form recreates it under a new id.
    pub fn edit_expense(&mut self, id: u64) -> Result<Option<ExpenseRecord>> {
        let Some(record) = self.ledger.find_expense(id) else {
            warn!(id, "edit requested for unknown expense");
            return Ok(None);
        };
        let form = InputForm::from_record(record);
        let checkpoint = self.checkpoint();
        self.form = form;
        let removed = self.ledger.edit_expense(id);
        self.commit(checkpoint)?;
        Ok(removed)
    }

    /// Clears ledger and budget and removes the stored keys.
    pub fn reset(&mut self) -> Result<()> {
        if let Err(err) = clear_snapshot(self.store.as_mut()) {
            self.restore_store();
            return Err(err);
        }
        self.ledger.clear();
        self.budget = BudgetState::new();
        self.form.clear();
        self.notifier.dismiss();
        info!("session reset");
        Ok(())
    }

    fn append(&mut self, draft: ExpenseDraft) -> Result<ExpenseRecord> {
        let checkpoint = self.checkpoint();
        let record = self.ledger.push_draft(draft)?;
        self.form.clear();
        self.commit(checkpoint)?;
        Ok(record)
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            ledger: self.ledger.clone(),
            budget: self.budget,
            form: self.form.clone(),
        }
    }

    /// Persists the current state, or puts `checkpoint` back if the write fails.
    fn commit(&mut self, checkpoint: Checkpoint) -> Result<()> {
        let Err(err) = self.persist() else {
            return Ok(());
        };
        warn!(%err, "write failed; rolling back");
        self.ledger = checkpoint.ledger;
        self.budget = checkpoint.budget;
        self.form = checkpoint.form;
        self.restore_store();
        Err(err)
    }

    /// Rewrites the in-memory state after a partial write.
    fn restore_store(&mut self) {
        if let Err(err) = self.persist() {
            error!(%err, "could not restore stored snapshot");
        }
    }

    fn persist(&mut self) -> Result<()> {
        save_snapshot(self.store.as_mut(), &self.ledger, &self.budget)
    }

    fn reject(&mut self, err: ValidationError) -> LedgerError {
        warn!(reason = %err, "input rejected");
        self.notifier.raise(err.notice());
        LedgerError::Validation(err)
    }
}
