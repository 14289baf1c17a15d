//! HTTP access to the ledger API plus the shared currency catalog.

pub use crate::api::LedgerApi;
pub use crate::catalog::{CurrencyCatalog, DEFAULT_BASE_CURRENCY};
pub use crate::config::AppConfig;
pub use crate::error::ClientError;
pub use crate::ledger::LedgerClient;

mod api;
mod catalog;
mod config;
mod error;
mod ledger;
