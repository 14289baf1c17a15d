use fx::FxError;
use thiserror::Error;

/// Errors surfaced by a payment form.
///
/// Validation variants are raised before any network call; `Api` carries
/// the message already shown in the form's alert.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Invalid amount.")]
    InvalidAmount,
    #[error("Invalid exchange rate.")]
    InvalidRate,
    #[error("The form is not ready to submit.")]
    NotReady,
    #[error("{0}")]
    Api(String),
}

impl From<FxError> for FormError {
    fn from(err: FxError) -> Self {
        match err {
            FxError::InvalidAmount(_) => Self::InvalidAmount,
            FxError::InvalidRate(_) => Self::InvalidRate,
        }
    }
}
