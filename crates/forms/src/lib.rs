//! Payment form controllers for the multi-currency reconciliation flow.
//!
//! The four historical call sites (customer/supplier × modal/page) share a
//! single [`PaymentForm`] parametrized by a [`FormSite`] strategy. The
//! controller owns field state, wires rate resolution and conversion to
//! field changes, and assembles the outbound payload on submit.

pub use builder::{SubmissionInput, build_submission};
pub use error::FormError;
pub use form::{FormContext, FormFields, LoadTicket, PaymentForm, Phase, message_for_error};
pub use site::{FormSite, Surface};

mod builder;
mod error;
mod form;
mod site;
