use api_types::{
    CounterpartyKind,
    account::Account,
    counterparty::{Counterparty, CounterpartyDetails},
    currency::CurrencyInfo,
    payment::{PaymentCreated, PaymentUpsert},
    settings::Settings,
};

use crate::error::ClientError;

/// The slice of the ledger API the payment core consumes.
///
/// Controllers and the currency catalog are generic over this trait so
/// tests can drive them with an in-memory fake instead of a live server.
#[allow(async_fn_in_trait)]
pub trait LedgerApi {
    async fn settings(&self) -> Result<Settings, ClientError>;

    async fn currencies(&self) -> Result<Vec<CurrencyInfo>, ClientError>;

    async fn accounts(&self) -> Result<Vec<Account>, ClientError>;

    async fn counterparty(
        &self,
        kind: CounterpartyKind,
        id: i64,
    ) -> Result<Counterparty, ClientError>;

    async fn counterparty_details(
        &self,
        kind: CounterpartyKind,
        id: i64,
    ) -> Result<CounterpartyDetails, ClientError>;

    async fn payment_create(
        &self,
        kind: CounterpartyKind,
        counterparty_id: i64,
        payload: &PaymentUpsert,
    ) -> Result<PaymentCreated, ClientError>;

    async fn payment_update(
        &self,
        kind: CounterpartyKind,
        counterparty_id: i64,
        payment_id: i64,
        payload: &PaymentUpsert,
    ) -> Result<(), ClientError>;
}
