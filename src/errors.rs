use thiserror::Error;

const EXPENSE_NOTICE: &str = "Please Enter Valid Expense Details";
const BUDGET_NOTICE: &str = "Please Enter a Valid Budget";

/// Rejected user input. Never fatal: the session turns it into a notice.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("expense title must not be empty")]
    EmptyTitle,
    #[error("invalid expense amount `{0}`")]
    InvalidAmount(String),
    #[error("invalid expense quantity `{0}`")]
    InvalidQuantity(String),
    #[error("invalid budget `{0}`")]
    InvalidBudget(String),
}

impl ValidationError {
    /// Text shown to the user in the transient notice.
    pub fn notice(&self) -> &'static str {
        match self {
            ValidationError::InvalidBudget(_) => BUDGET_NOTICE,
            _ => EXPENSE_NOTICE,
        }
    }
}

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("no expense ids left to assign")]
    IdsExhausted,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_errors_use_budget_notice() {
        let err = ValidationError::InvalidBudget("-4".into());
        assert_eq!(err.notice(), "Please Enter a Valid Budget");
        assert_eq!(err.to_string(), "invalid budget `-4`");
    }

    #[test]
    fn expense_errors_share_expense_notice() {
        for err in [
            ValidationError::EmptyTitle,
            ValidationError::InvalidAmount("x".into()),
            ValidationError::InvalidQuantity("-1".into()),
        ] {
            assert_eq!(err.notice(), "Please Enter Valid Expense Details");
        }
    }
}
