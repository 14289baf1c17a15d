use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which side of the ledger a counterparty sits on.
///
/// Customers and suppliers share the same wire shape; only the endpoint
/// prefix differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterpartyKind {
    Customer,
    Supplier,
}

impl CounterpartyKind {
    /// URL path segment for this kind (`customers` / `suppliers`).
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Customer => "customers",
            Self::Supplier => "suppliers",
        }
    }
}

pub mod settings {
    use super::*;

    /// Organization settings, `GET settings/`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Settings {
        /// Organization-wide reporting currency code.
        pub base_currency: String,
    }
}

pub mod currency {
    use super::*;

    /// One supported currency, `GET currencies/`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CurrencyInfo {
        pub code: String,
        pub name: String,
        /// Rate of this currency relative to the base currency.
        pub exchange_rate: f64,
        #[serde(default)]
        pub is_base_currency: bool,
    }
}

pub mod account {
    use super::*;

    /// A bank/cash settlement account, `GET accounts/`.
    ///
    /// Read-only from the payment core's perspective.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Account {
        pub id: i64,
        pub name: String,
        /// Currency the account balance is kept in.
        pub currency: String,
        pub balance: f64,
    }
}

pub mod counterparty {
    use super::*;

    /// Customer or supplier header, `GET {kind}/{id}/`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Counterparty {
        pub id: i64,
        pub name: String,
        /// Currency the counterparty's running balance is expressed in.
        pub currency: String,
    }

    /// Balance summary, `GET {kind}/{id}/details/`.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CounterpartyDetails {
        pub open_balance: f64,
        #[serde(default)]
        pub check_balance: f64,
    }
}

pub mod payment {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PaymentMethod {
        #[default]
        Cash,
        Bank,
        Card,
    }

    impl PaymentMethod {
        /// Wire/display name of the method (`cash` / `bank` / `card`).
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Cash => "cash",
                Self::Bank => "bank",
                Self::Card => "card",
            }
        }
    }

    /// Request body for `POST {kind}/{id}/payments/` and
    /// `PUT {kind}/{id}/payments/{payment_id}/`.
    ///
    /// Optional fields are omitted from the JSON body entirely when `None`;
    /// the server treats absence as "does not apply". `account` is doubly
    /// optional: outer `None` = call site does not post to accounts (field
    /// absent), `Some(None)` = explicit `null` (no account selected).
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct PaymentUpsert {
        pub payment_date: NaiveDate,
        /// Signed amount in `original_currency`; the sign encodes the
        /// transaction direction.
        pub original_amount: f64,
        pub method: PaymentMethod,
        pub notes: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub account: Option<Option<i64>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub original_currency: Option<String>,
        /// Rate payment currency → account currency. Present iff an account
        /// is attached and the currencies differ.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub account_exchange_rate: Option<f64>,
        /// Signed amount in the account currency. Present together with
        /// `account_exchange_rate`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub account_converted_amount: Option<f64>,
        /// Rate payment currency → counterparty ledger currency. Present iff
        /// the two differ.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub exchange_rate: Option<f64>,
    }

    /// Response body for a successful payment create.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentCreated {
        pub id: i64,
    }

    /// A stored payment as returned by the server; seeds the edit flow.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct PaymentView {
        pub id: i64,
        pub payment_date: NaiveDate,
        pub original_amount: f64,
        pub original_currency: String,
        pub method: PaymentMethod,
        #[serde(default)]
        pub notes: String,
        #[serde(default)]
        pub account: Option<i64>,
        #[serde(default)]
        pub account_exchange_rate: Option<f64>,
        #[serde(default)]
        pub account_converted_amount: Option<f64>,
        #[serde(default)]
        pub exchange_rate: Option<f64>,
    }
}

#[cfg(test)]
mod tests {
    use super::payment::{PaymentMethod, PaymentUpsert};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn upsert_omits_unset_fields() {
        let payload = PaymentUpsert {
            payment_date: date(),
            original_amount: 100.0,
            method: PaymentMethod::Cash,
            notes: String::new(),
            account: None,
            original_currency: Some("USD".to_string()),
            account_exchange_rate: None,
            account_converted_amount: None,
            exchange_rate: None,
        };

        let json = serde_json::to_value(&payload).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("account"));
        assert!(!obj.contains_key("account_exchange_rate"));
        assert!(!obj.contains_key("account_converted_amount"));
        assert!(!obj.contains_key("exchange_rate"));
        assert_eq!(obj["original_currency"], "USD");
    }

    #[test]
    fn upsert_serializes_cleared_account_as_null() {
        let payload = PaymentUpsert {
            payment_date: date(),
            original_amount: -50.0,
            method: PaymentMethod::Bank,
            notes: "refund".to_string(),
            account: Some(None),
            original_currency: Some("USD".to_string()),
            account_exchange_rate: None,
            account_converted_amount: None,
            exchange_rate: None,
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.as_object().unwrap().contains_key("account"));
        assert!(json["account"].is_null());
        assert_eq!(json["original_amount"], -50.0);
    }

    #[test]
    fn method_uses_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Bank).unwrap(),
            "\"bank\""
        );
    }

    #[test]
    fn method_as_str_matches_the_wire_form() {
        for method in [PaymentMethod::Cash, PaymentMethod::Bank, PaymentMethod::Card] {
            let wire = serde_json::to_string(&method).unwrap();
            assert_eq!(wire, format!("\"{}\"", method.as_str()));
        }
    }
}
