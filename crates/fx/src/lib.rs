//! Pure multi-currency math for payment reconciliation.
//!
//! Everything in this crate is synchronous and side-effect free: rounding
//! conventions, amount/rate parsing, cross-rate resolution from a cached
//! rate table, the auto/manual state of a rate field, and the sign
//! convention for payment direction.

pub use amount::{parse_loose, parse_positive_amount, parse_positive_rate};
pub use direction::Direction;
pub use error::FxError;
pub use rate_mode::{RateEvent, RateMode};
pub use rates::{convert, cross_rate, round2, round6};

mod amount;
mod direction;
mod error;
mod rate_mode;
mod rates;
