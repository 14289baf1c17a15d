use thiserror::Error;

/// Domain validation errors for amounts and exchange rates.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FxError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),
}
