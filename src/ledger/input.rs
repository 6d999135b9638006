//! Parsing of raw text submitted through the input surface.

use crate::errors::ValidationError;

use super::expense::ExpenseDraft;

/// Parses the three expense fields as typed by the user.
pub fn parse_expense(
    title: &str,
    amount: &str,
    quantity: &str,
) -> Result<ExpenseDraft, ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let amount = parse_non_negative(amount)
        .ok_or_else(|| ValidationError::InvalidAmount(amount.trim().to_string()))?;
    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidQuantity(quantity.trim().to_string()))?;
    ExpenseDraft::new(title, amount, quantity)
}

/// Parses a budget increment; it must be strictly positive.
pub fn parse_budget(raw: &str) -> Result<f64, ValidationError> {
    match parse_non_negative(raw) {
        Some(value) if value > 0.0 => Ok(value),
        _ => Err(ValidationError::InvalidBudget(raw.trim().to_string())),
    }
}

fn parse_non_negative(raw: &str) -> Option<f64> {
    let value = raw.trim().strip_prefix('$').unwrap_or(raw.trim());
    value
        .parse::<f64>()
        .ok()
        .filter(|parsed| parsed.is_finite() && *parsed >= 0.0)
}
