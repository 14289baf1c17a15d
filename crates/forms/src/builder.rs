use api_types::payment::{PaymentMethod, PaymentUpsert};
use chrono::NaiveDate;

/// Resolved field set a [`PaymentUpsert`] is assembled from.
///
/// Everything here is already validated and numeric; the builder only
/// decides which fields apply. `signed_amount` carries the direction sign.
#[derive(Debug)]
pub struct SubmissionInput<'a> {
    pub payment_date: NaiveDate,
    pub signed_amount: f64,
    pub method: PaymentMethod,
    pub notes: &'a str,
    pub payment_currency: &'a str,
    pub counterparty_currency: &'a str,
    /// Whether the call site posts to accounts at all. When `false` the
    /// `account` field is omitted from the payload entirely.
    pub supports_account: bool,
    pub account: Option<i64>,
    /// Settlement currency: the selected account's currency, or the
    /// counterparty currency when no account is selected.
    pub account_currency: &'a str,
    /// The visible rate field. Payment→account when an account is
    /// selected, payment→counterparty otherwise.
    pub field_rate: f64,
    /// Auto-resolved payment→counterparty rate, used only when an account
    /// is selected and the ledger currencies differ.
    pub ledger_rate: Option<f64>,
}

/// Assembles the minimal create/update payload.
///
/// The two currency-mismatch notions are independent: a payment can be
/// account-converted without being counterparty-converted and vice versa,
/// so `account_exchange_rate`/`account_converted_amount` and
/// `exchange_rate` are decided separately.
#[must_use]
pub fn build_submission(input: &SubmissionInput<'_>) -> PaymentUpsert {
    let account_mismatch =
        input.account.is_some() && input.payment_currency != input.account_currency;
    let ledger_mismatch = input.payment_currency != input.counterparty_currency;

    let exchange_rate = if !ledger_mismatch {
        None
    } else if input.account.is_none() {
        Some(fx::round6(input.field_rate))
    } else {
        input.ledger_rate.map(fx::round6)
    };

    PaymentUpsert {
        payment_date: input.payment_date,
        original_amount: fx::round2(input.signed_amount),
        method: input.method,
        notes: input.notes.to_string(),
        account: input.supports_account.then_some(input.account),
        original_currency: (input.account.is_none() || ledger_mismatch)
            .then(|| input.payment_currency.to_string()),
        account_exchange_rate: account_mismatch.then(|| fx::round6(input.field_rate)),
        account_converted_amount: account_mismatch
            .then(|| fx::convert(input.signed_amount, input.field_rate)),
        exchange_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input<'a>() -> SubmissionInput<'a> {
        SubmissionInput {
            payment_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            signed_amount: 100.0,
            method: PaymentMethod::Cash,
            notes: "",
            payment_currency: "USD",
            counterparty_currency: "USD",
            supports_account: true,
            account: None,
            account_currency: "USD",
            field_rate: 1.0,
            ledger_rate: None,
        }
    }

    #[test]
    fn same_currency_no_account_has_no_rate_fields() {
        let payload = build_submission(&base_input());

        assert_eq!(payload.original_amount, 100.0);
        assert_eq!(payload.account, Some(None));
        assert_eq!(payload.original_currency.as_deref(), Some("USD"));
        assert_eq!(payload.account_exchange_rate, None);
        assert_eq!(payload.account_converted_amount, None);
        assert_eq!(payload.exchange_rate, None);
    }

    #[test]
    fn account_mismatch_without_ledger_mismatch() {
        // Payment and counterparty both in USD, account in EUR.
        let input = SubmissionInput {
            account: Some(7),
            account_currency: "EUR",
            field_rate: 0.9,
            ..base_input()
        };
        let payload = build_submission(&input);

        assert_eq!(payload.account, Some(Some(7)));
        assert_eq!(payload.account_exchange_rate, Some(0.9));
        assert_eq!(payload.account_converted_amount, Some(90.0));
        assert_eq!(payload.exchange_rate, None);
    }

    #[test]
    fn ledger_mismatch_without_account_mismatch() {
        // Payment and account both in EUR, counterparty in USD.
        let input = SubmissionInput {
            payment_currency: "EUR",
            account: Some(7),
            account_currency: "EUR",
            field_rate: 1.0,
            ledger_rate: Some(1.111111),
            ..base_input()
        };
        let payload = build_submission(&input);

        assert_eq!(payload.account_exchange_rate, None);
        assert_eq!(payload.account_converted_amount, None);
        assert_eq!(payload.exchange_rate, Some(1.111111));
        assert_eq!(payload.original_currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn no_account_mismatch_uses_the_field_rate_for_the_ledger() {
        let input = SubmissionInput {
            payment_currency: "EUR",
            account: None,
            account_currency: "USD",
            field_rate: 1.111111,
            ..base_input()
        };
        let payload = build_submission(&input);

        assert_eq!(payload.exchange_rate, Some(1.111111));
        assert_eq!(payload.account_exchange_rate, None);
    }

    #[test]
    fn ledger_only_sites_omit_the_account_field() {
        let input = SubmissionInput {
            supports_account: false,
            ..base_input()
        };
        let payload = build_submission(&input);
        assert_eq!(payload.account, None);

        let json = serde_json::to_value(&payload).unwrap();
        assert!(!json.as_object().unwrap().contains_key("account"));
    }

    #[test]
    fn refund_sign_flows_through_converted_amounts() {
        let input = SubmissionInput {
            signed_amount: -50.0,
            account: Some(3),
            account_currency: "EUR",
            field_rate: 0.9,
            ..base_input()
        };
        let payload = build_submission(&input);

        assert_eq!(payload.original_amount, -50.0);
        assert_eq!(payload.account_converted_amount, Some(-45.0));
    }
}
