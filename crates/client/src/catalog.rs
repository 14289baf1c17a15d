use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use crate::{api::LedgerApi, error::ClientError};

/// Base currency assumed before the organization settings have loaded.
pub const DEFAULT_BASE_CURRENCY: &str = "USD";

#[derive(Debug, Default)]
struct CatalogState {
    base: Option<String>,
    options: Vec<(String, String)>,
    rates: HashMap<String, f64>,
}

/// Session-wide cache of the base currency, the supported currency list,
/// and their exchange rates relative to base.
///
/// One instance is shared by every payment form. The host is a logically
/// single-threaded event loop, so the mutex exists for Rust aliasing
/// across `Arc` clones, not for contention; it is never held across an
/// await point.
#[derive(Debug, Default)]
pub struct CurrencyCatalog {
    state: Mutex<CatalogState>,
}

impl CurrencyCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Last-loaded base currency, or [`DEFAULT_BASE_CURRENCY`] before the
    /// first successful load.
    #[must_use]
    pub fn base_currency(&self) -> String {
        self.lock()
            .base
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_CURRENCY.to_string())
    }

    /// Fetches the organization base currency.
    ///
    /// Never fails to the caller: on error the previous (or default) value
    /// is kept and returned, and the failure is logged.
    pub async fn load_base_currency(&self, api: &impl LedgerApi) -> String {
        match api.settings().await {
            Ok(settings) => {
                self.lock().base = Some(settings.base_currency.clone());
                settings.base_currency
            }
            Err(err) => {
                tracing::warn!(?err, "failed to load base currency, keeping previous value");
                self.base_currency()
            }
        }
    }

    /// Cached `(code, label)` options; empty before the first load.
    #[must_use]
    pub fn currency_options(&self) -> Vec<(String, String)> {
        self.lock().options.clone()
    }

    /// Fetches the currency list and rebuilds both the option list and the
    /// rate cache. On error the prior cache is left untouched.
    pub async fn load_currency_options(
        &self,
        api: &impl LedgerApi,
    ) -> Result<Vec<(String, String)>, ClientError> {
        let currencies = api.currencies().await?;

        let options: Vec<(String, String)> = currencies
            .iter()
            .map(|c| (c.code.clone(), display_label(&c.name, &c.code)))
            .collect();

        let mut state = self.lock();
        state.options = options.clone();
        for currency in &currencies {
            state.rates.insert(currency.code.clone(), currency.exchange_rate);
        }
        Ok(options)
    }

    /// Synchronous read of the rate cache.
    #[must_use]
    pub fn rates(&self) -> HashMap<String, f64> {
        self.lock().rates.clone()
    }

    /// Returns the cached rates, fetching them at most once per session.
    ///
    /// A non-empty cache is returned as-is without touching the network;
    /// otherwise the currency list is fetched and both the rate cache and
    /// (if still empty) the option list are populated.
    pub async fn load_rates(&self, api: &impl LedgerApi) -> Result<HashMap<String, f64>, ClientError> {
        {
            let state = self.lock();
            if !state.rates.is_empty() {
                return Ok(state.rates.clone());
            }
        }

        let currencies = api.currencies().await?;

        let mut state = self.lock();
        for currency in &currencies {
            state.rates.insert(currency.code.clone(), currency.exchange_rate);
        }
        if state.options.is_empty() {
            state.options = currencies
                .iter()
                .map(|c| (c.code.clone(), display_label(&c.name, &c.code)))
                .collect();
        }
        Ok(state.rates.clone())
    }

    /// Drops cached options and rates. The base currency is kept.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.options.clear();
        state.rates.clear();
    }
}

/// Display label for a currency option.
///
/// Uses the plain name when it already mentions the code (e.g.
/// `"US Dollar (USD)"`), otherwise appends the code.
fn display_label(name: &str, code: &str) -> String {
    if name.contains(code) {
        name.to_string()
    } else {
        format!("{name} ({code})")
    }
}
