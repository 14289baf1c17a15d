use std::sync::Arc;

use api_types::{
    account::Account,
    counterparty::{Counterparty, CounterpartyDetails},
    payment::{PaymentMethod, PaymentUpsert, PaymentView},
};
use chrono::NaiveDate;
use client::{ClientError, CurrencyCatalog, LedgerApi};
use fx::{Direction, RateEvent, RateMode};

use crate::{
    builder::{SubmissionInput, build_submission},
    error::FormError,
    site::{FormSite, Surface},
};

/// Lifecycle phase of a payment form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Submitting,
    Closed,
}

/// Handle for an in-flight context load, captured at dispatch time.
///
/// The apply step compares it against the form's current generation and
/// discards results from a superseded dispatch.
#[derive(Clone, Copy, Debug)]
pub struct LoadTicket {
    generation: u64,
}

/// Everything a form open fetches, detached from the form itself so a
/// result can outlive a close and still be discarded at apply time.
#[derive(Debug)]
pub struct FormContext {
    pub counterparty: Counterparty,
    pub accounts: Vec<Account>,
    pub summary: Option<CounterpartyDetails>,
}

/// Editable field state of a payment form.
///
/// Amount and rate stay strings while editing: the UI must never throw
/// mid-edit, so parsing is permissive until submit time.
#[derive(Debug, Clone)]
pub struct FormFields {
    pub payment_date: NaiveDate,
    pub amount: String,
    pub payment_currency: String,
    pub account: Option<i64>,
    /// Settlement currency the rate field converts into: the selected
    /// account's currency, falling back to the counterparty currency when
    /// no account is selected.
    pub account_currency: String,
    pub rate: String,
    pub converted: String,
    pub direction: Direction,
    pub method: PaymentMethod,
    pub notes: String,
}

impl FormFields {
    fn blank(counterparty_currency: &str) -> Self {
        Self {
            payment_date: chrono::Local::now().date_naive(),
            amount: String::new(),
            payment_currency: counterparty_currency.to_string(),
            account: None,
            account_currency: counterparty_currency.to_string(),
            rate: "1".to_string(),
            converted: String::new(),
            direction: Direction::Settle,
            method: PaymentMethod::default(),
            notes: String::new(),
        }
    }
}

/// One payment/collection/refund entry form against a customer or
/// supplier ledger, optionally posting to a settlement account.
///
/// A single implementation serves every call site; the [`FormSite`]
/// strategy carries the per-site differences. The currency catalog is
/// injected so tests can substitute a pre-seeded one.
#[derive(Debug)]
pub struct PaymentForm {
    site: FormSite,
    catalog: Arc<CurrencyCatalog>,
    counterparty_id: i64,
    phase: Phase,
    /// Bumped whenever the subject changes or the form closes; in-flight
    /// loads compare against it before applying their result.
    generation: u64,
    counterparty: Option<Counterparty>,
    accounts: Vec<Account>,
    summary: Option<CounterpartyDetails>,
    payment_id: Option<i64>,
    fields: FormFields,
    rate_mode: RateMode,
    alert: Option<String>,
}

impl PaymentForm {
    #[must_use]
    pub fn new(site: FormSite, counterparty_id: i64, catalog: Arc<CurrencyCatalog>) -> Self {
        Self {
            site,
            catalog,
            counterparty_id,
            phase: Phase::Idle,
            generation: 0,
            counterparty: None,
            accounts: Vec::new(),
            summary: None,
            payment_id: None,
            fields: FormFields::blank(client::DEFAULT_BASE_CURRENCY),
            rate_mode: RateMode::Auto,
            alert: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn rate_mode(&self) -> RateMode {
        self.rate_mode
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn counterparty(&self) -> Option<&Counterparty> {
        self.counterparty.as_ref()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Balance summary of the counterparty, refreshed after each submit.
    pub fn summary(&self) -> Option<&CounterpartyDetails> {
        self.summary.as_ref()
    }

    /// `true` when the form edits a stored payment rather than creating
    /// one.
    pub fn is_editing(&self) -> bool {
        self.payment_id.is_some()
    }

    /// Opens the form for a new payment entry.
    pub async fn open_new(&mut self, api: &impl LedgerApi) -> Result<(), FormError> {
        let ticket = self.dispatch();
        let catalog = Arc::clone(&self.catalog);
        match Self::fetch_context(api, &catalog, self.site, self.counterparty_id).await {
            Ok(context) => {
                self.apply_new(ticket, context);
                Ok(())
            }
            Err(err) => Err(self.fail_load(err)),
        }
    }

    /// Opens the form seeded from a stored payment.
    ///
    /// The rate field starts from the stored `account_exchange_rate` when
    /// present (and is treated as a confirmed manual value that must not be
    /// silently recomputed), else from the stored ledger `exchange_rate`,
    /// else `1`.
    pub async fn open_edit(
        &mut self,
        api: &impl LedgerApi,
        existing: &PaymentView,
    ) -> Result<(), FormError> {
        let ticket = self.dispatch();
        let catalog = Arc::clone(&self.catalog);
        match Self::fetch_context(api, &catalog, self.site, self.counterparty_id).await {
            Ok(context) => {
                self.apply_edit(ticket, context, existing);
                Ok(())
            }
            Err(err) => Err(self.fail_load(err)),
        }
    }

    /// Marks a new load as the live one and returns its ticket. Any
    /// earlier ticket becomes stale from this point on.
    pub fn dispatch(&mut self) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        self.phase = Phase::Loading;
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Fetches counterparty, accounts and the currency catalog for a form
    /// open. Does not touch the form; pair with [`PaymentForm::apply_new`]
    /// or [`PaymentForm::apply_edit`].
    pub async fn fetch_context(
        api: &impl LedgerApi,
        catalog: &CurrencyCatalog,
        site: FormSite,
        counterparty_id: i64,
    ) -> Result<FormContext, ClientError> {
        let counterparty = api.counterparty(site.kind, counterparty_id).await?;

        let accounts = if site.supports_account {
            api.accounts().await?
        } else {
            Vec::new()
        };

        // A missing rate cache degrades to "no auto rate", not a hard
        // failure.
        if let Err(err) = catalog.load_rates(api).await {
            tracing::warn!(?err, "failed to load currency rates");
        }

        let summary = api.counterparty_details(site.kind, counterparty_id).await.ok();

        Ok(FormContext {
            counterparty,
            accounts,
            summary,
        })
    }

    /// Applies a fetched context for a new entry. Returns `false` when the
    /// ticket is stale (the subject changed or the form closed in the
    /// meantime) and the result was thrown away.
    pub fn apply_new(&mut self, ticket: LoadTicket, context: FormContext) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        let currency = context.counterparty.currency.clone();
        self.counterparty = Some(context.counterparty);
        self.accounts = context.accounts;
        self.summary = context.summary;
        self.fields = FormFields::blank(&currency);
        self.payment_id = None;
        self.rate_mode = RateMode::Auto;
        self.alert = None;
        self.phase = Phase::Ready;
        true
    }

    /// Applies a fetched context seeded from a stored payment. Stale
    /// tickets are discarded exactly as in [`PaymentForm::apply_new`].
    pub fn apply_edit(
        &mut self,
        ticket: LoadTicket,
        context: FormContext,
        existing: &PaymentView,
    ) -> bool {
        if ticket.generation != self.generation {
            return false;
        }

        let counterparty_currency = context.counterparty.currency.clone();
        self.counterparty = Some(context.counterparty);
        self.accounts = context.accounts;
        self.summary = context.summary;

        let account_currency = existing
            .account
            .and_then(|id| self.accounts.iter().find(|a| a.id == id))
            .map(|a| a.currency.clone())
            .unwrap_or_else(|| counterparty_currency.clone());

        let seeded_rate = existing
            .account_exchange_rate
            .or(existing.exchange_rate)
            .unwrap_or(1.0);

        self.fields = FormFields {
            payment_date: existing.payment_date,
            amount: fmt_amount(existing.original_amount.abs()),
            payment_currency: existing.original_currency.clone(),
            account: existing.account,
            account_currency,
            rate: fmt_rate(seeded_rate),
            converted: String::new(),
            direction: if existing.original_amount < 0.0 {
                Direction::Refund
            } else {
                Direction::Settle
            },
            method: existing.method,
            notes: existing.notes.clone(),
        };
        self.payment_id = Some(existing.id);
        self.rate_mode = if existing.account_exchange_rate.is_some() {
            RateMode::Manual
        } else {
            RateMode::Auto
        };
        self.recompute();
        self.alert = None;
        self.phase = Phase::Ready;
        true
    }

    /// Closes the form. A load dispatched before this point becomes stale
    /// and its result is discarded at apply time.
    pub fn close(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.phase = Phase::Closed;
    }

    pub fn set_amount(&mut self, raw: &str) {
        if !self.accepting_input() {
            return;
        }
        self.fields.amount = raw.to_string();
        self.rate_mode = self.rate_mode.apply(RateEvent::AmountChanged);
        self.recompute();
    }

    pub fn set_payment_currency(&mut self, code: &str) {
        if !self.accepting_input() {
            return;
        }
        self.fields.payment_currency = code.to_string();
        self.rate_mode = self.rate_mode.apply(RateEvent::CurrencyChanged);
        self.resolve_rate();
        self.recompute();
    }

    /// Selects or clears the settlement account. The settlement currency
    /// follows the account, falling back to the counterparty currency.
    pub fn set_account(&mut self, account: Option<i64>) {
        if !self.accepting_input() {
            return;
        }
        self.fields.account = account;
        self.fields.account_currency = account
            .and_then(|id| self.accounts.iter().find(|a| a.id == id))
            .map(|a| a.currency.clone())
            .unwrap_or_else(|| self.counterparty_currency());
        self.rate_mode = self.rate_mode.apply(RateEvent::AccountChanged);
        self.resolve_rate();
        self.recompute();
    }

    /// Direct edit of the rate field; the value is kept verbatim and the
    /// field enters manual mode.
    pub fn set_rate(&mut self, raw: &str) {
        if !self.accepting_input() {
            return;
        }
        self.fields.rate = raw.to_string();
        self.rate_mode = self.rate_mode.apply(RateEvent::RateEdited);
        self.recompute();
    }

    pub fn set_direction(&mut self, direction: Direction) {
        if !self.accepting_input() {
            return;
        }
        self.fields.direction = direction;
        self.recompute();
    }

    pub fn set_method(&mut self, method: PaymentMethod) {
        if !self.accepting_input() {
            return;
        }
        self.fields.method = method;
    }

    pub fn set_notes(&mut self, notes: &str) {
        if !self.accepting_input() {
            return;
        }
        self.fields.notes = notes.to_string();
    }

    pub fn set_payment_date(&mut self, date: NaiveDate) {
        if !self.accepting_input() {
            return;
        }
        self.fields.payment_date = date;
    }

    /// Validates and submits the entry, then refreshes the counterparty
    /// summary. Validation failures never reach the network; API failures
    /// leave the form populated for retry.
    pub async fn submit(&mut self, api: &impl LedgerApi) -> Result<(), FormError> {
        if self.phase != Phase::Ready {
            return Err(FormError::NotReady);
        }

        let payload = match self.validate() {
            Ok(payload) => payload,
            Err(err) => {
                self.alert = Some(err.to_string());
                return Err(err);
            }
        };

        self.phase = Phase::Submitting;
        let kind = self.site.kind;
        let counterparty_id = self.counterparty_id;

        let result = match self.payment_id {
            Some(payment_id) => {
                api.payment_update(kind, counterparty_id, payment_id, &payload)
                    .await
            }
            None => api
                .payment_create(kind, counterparty_id, &payload)
                .await
                .map(|_| ()),
        };

        match result {
            Ok(()) => {
                match api.counterparty_details(kind, counterparty_id).await {
                    Ok(details) => self.summary = Some(details),
                    Err(err) => {
                        tracing::warn!(?err, "failed to refresh counterparty summary");
                    }
                }

                self.alert = None;
                match self.site.surface {
                    Surface::Modal => self.phase = Phase::Closed,
                    Surface::Page => {
                        let currency = self.counterparty_currency();
                        self.fields = FormFields::blank(&currency);
                        self.payment_id = None;
                        self.rate_mode = RateMode::Auto;
                        self.phase = Phase::Ready;
                    }
                }
                Ok(())
            }
            Err(err) => {
                let message = message_for_error(err);
                self.alert = Some(message.clone());
                self.phase = Phase::Ready;
                Err(FormError::Api(message))
            }
        }
    }

    /// Synchronous submit-time validation producing the outbound payload.
    ///
    /// Both mismatch notions are checked independently: the visible rate
    /// covers the settlement pair, and when an account is selected the
    /// ledger-facing rate must additionally be resolvable from the
    /// catalog.
    fn validate(&self) -> Result<PaymentUpsert, FormError> {
        let counterparty = self.counterparty.as_ref().ok_or(FormError::NotReady)?;

        let amount = fx::parse_positive_amount(&self.fields.amount)?;
        let signed_amount = self.fields.direction.signed(amount);

        let payment_currency = self.fields.payment_currency.as_str();
        let account_currency = self.fields.account_currency.as_str();
        let counterparty_currency = counterparty.currency.as_str();

        let settlement_mismatch = match self.fields.account {
            Some(_) => payment_currency != account_currency,
            None => payment_currency != counterparty_currency,
        };
        let field_rate = if settlement_mismatch {
            fx::parse_positive_rate(&self.fields.rate)?
        } else {
            1.0
        };

        let ledger_rate = if self.fields.account.is_some()
            && payment_currency != counterparty_currency
        {
            let rate = fx::cross_rate(&self.catalog.rates(), payment_currency, counterparty_currency)
                .ok_or(FormError::InvalidRate)?;
            Some(rate)
        } else {
            None
        };

        Ok(build_submission(&SubmissionInput {
            payment_date: self.fields.payment_date,
            signed_amount,
            method: self.fields.method,
            notes: &self.fields.notes,
            payment_currency,
            counterparty_currency,
            supports_account: self.site.supports_account,
            account: self.fields.account,
            account_currency,
            field_rate,
            ledger_rate,
        }))
    }

    fn fail_load(&mut self, err: ClientError) -> FormError {
        let message = message_for_error(err);
        self.alert = Some(message.clone());
        self.phase = Phase::Idle;
        FormError::Api(message)
    }

    /// Gate for field setters. Any user action while `Ready` also
    /// dismisses a lingering error overlay.
    fn accepting_input(&mut self) -> bool {
        if self.phase != Phase::Ready {
            return false;
        }
        self.alert = None;
        true
    }

    fn counterparty_currency(&self) -> String {
        self.counterparty
            .as_ref()
            .map(|c| c.currency.clone())
            .unwrap_or_else(|| self.catalog.base_currency())
    }

    /// Re-resolves the visible rate from the catalog.
    ///
    /// The identity pair pins the field to `1` regardless of mode; a
    /// manual value is otherwise never overwritten, and a missing cached
    /// rate leaves the field as it was.
    fn resolve_rate(&mut self) {
        if self.fields.payment_currency == self.fields.account_currency {
            self.fields.rate = "1".to_string();
            return;
        }
        if !self.rate_mode.allows_auto_update() {
            return;
        }
        let rates = self.catalog.rates();
        let resolved = fx::cross_rate(
            &rates,
            &self.fields.payment_currency,
            &self.fields.account_currency,
        );
        if let Some(rate) = resolved {
            self.fields.rate = fmt_rate(rate);
        }
    }

    /// Recomputes the converted amount from the signed original amount.
    fn recompute(&mut self) {
        let amount = fx::parse_loose(&self.fields.amount);
        let signed = self.fields.direction.signed(amount);

        if self.fields.payment_currency == self.fields.account_currency {
            self.fields.rate = "1".to_string();
            self.fields.converted = fmt_amount(fx::round2(signed));
        } else {
            let rate = fx::parse_loose(&self.fields.rate);
            self.fields.converted = fmt_amount(fx::convert(signed, rate));
        }
    }
}

/// Human-readable message for an API failure, shown in the form alert.
pub fn message_for_error(err: ClientError) -> String {
    match err {
        ClientError::Unauthorized | ClientError::Forbidden => {
            "Not authorized for this ledger.".to_string()
        }
        ClientError::NotFound => "Record not found.".to_string(),
        ClientError::Conflict(message) => format!("Conflict: {message}"),
        ClientError::Validation(message) => format!("Validation error: {message}"),
        ClientError::Server(message) => format!("Server error: {message}"),
        ClientError::Transport(err) => format!("Server unreachable: {err}"),
    }
}

fn fmt_amount(value: f64) -> String {
    format!("{value:.2}")
}

fn fmt_rate(value: f64) -> String {
    fx::round6(value).to_string()
}
