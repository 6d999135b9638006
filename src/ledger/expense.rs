use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// One expense line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: u64,
    pub title: String,
    pub amount: f64,
    pub quantity: u32,
}

impl ExpenseRecord {
    /// `amount * quantity`; not stored.
    pub fn line_total(&self) -> f64 {
        self.amount * f64::from(self.quantity)
    }

    /// Splits the record back into the values a caller would resubmit.
    pub fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            title: self.title.clone(),
            amount: self.amount,
            quantity: self.quantity,
        }
    }
}

/// Validated expense values that have not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub title: String,
    pub amount: f64,
    pub quantity: u32,
}

impl ExpenseDraft {
    /// Validates typed values. Quantity is taken signed so negative counts
    /// can be rejected rather than being unrepresentable.
    pub fn new(
        title: impl Into<String>,
        amount: f64,
        quantity: i64,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if !amount.is_finite() || amount < 0.0 {
            return Err(ValidationError::InvalidAmount(amount.to_string()));
        }
        let quantity = u32::try_from(quantity)
            .map_err(|_| ValidationError::InvalidQuantity(quantity.to_string()))?;
        Ok(Self {
            title: title.to_string(),
            amount,
            quantity,
        })
    }

    pub(crate) fn into_record(self, id: u64) -> ExpenseRecord {
        ExpenseRecord {
            id,
            title: self.title,
            amount: self.amount,
            quantity: self.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_multiplies_amount_by_quantity() {
        let record = ExpenseRecord {
            id: 0,
            title: "Coffee".into(),
            amount: 2.5,
            quantity: 4,
        };
        assert_eq!(record.line_total(), 10.0);
    }

    #[test]
    fn draft_trims_title() {
        let draft = ExpenseDraft::new("  Rent ", 900.0, 1).unwrap();
        assert_eq!(draft.title, "Rent");
    }

    #[test]
    fn draft_rejects_bad_values() {
        assert_eq!(
            ExpenseDraft::new("   ", 1.0, 1),
            Err(ValidationError::EmptyTitle)
        );
        assert!(matches!(
            ExpenseDraft::new("Tea", f64::NAN, 1),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            ExpenseDraft::new("Tea", 1.0, i64::from(u32::MAX) + 1),
            Err(ValidationError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn zero_amount_and_quantity_are_allowed() {
        let draft = ExpenseDraft::new("Freebie", 0.0, 0).unwrap();
        assert_eq!(draft.into_record(7).line_total(), 0.0);
    }

    #[test]
    fn record_serializes_with_stored_field_names() {
        let record = ExpenseRecord {
            id: 3,
            title: "Bus".into(),
            amount: 2.0,
            quantity: 4,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 3, "title": "Bus", "amount": 2.0, "quantity": 4})
        );
    }
}
