use api_types::{
    CounterpartyKind,
    account::Account,
    counterparty::{Counterparty, CounterpartyDetails},
    currency::CurrencyInfo,
    payment::{PaymentCreated, PaymentUpsert},
    settings::Settings,
};
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{api::LedgerApi, error::ClientError};

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Reqwest-backed implementation of [`LedgerApi`].
#[derive(Debug, Clone)]
pub struct LedgerClient {
    base_url: Url,
    http: reqwest::Client,
}

impl LedgerClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        // Url::join drops the last path segment unless the base ends in '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalized)
            .map_err(|err| ClientError::Server(format!("invalid base_url: {err}")))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Server(format!("invalid endpoint {path}: {err}")))
    }

    async fn error_for(res: reqwest::Response) -> ClientError {
        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());

        match status.as_u16() {
            401 => ClientError::Unauthorized,
            403 => ClientError::Forbidden,
            404 => ClientError::NotFound,
            409 => ClientError::Conflict(body),
            422 => ClientError::Validation(body),
            _ => ClientError::Server(body),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let endpoint = self.endpoint(path)?;
        let res = self
            .http
            .get(endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res.json::<T>().await.map_err(ClientError::Transport);
        }
        Err(Self::error_for(res).await)
    }
}

impl LedgerApi for LedgerClient {
    async fn settings(&self) -> Result<Settings, ClientError> {
        self.get_json("settings/").await
    }

    async fn currencies(&self) -> Result<Vec<CurrencyInfo>, ClientError> {
        self.get_json("currencies/").await
    }

    async fn accounts(&self) -> Result<Vec<Account>, ClientError> {
        self.get_json("accounts/").await
    }

    async fn counterparty(
        &self,
        kind: CounterpartyKind,
        id: i64,
    ) -> Result<Counterparty, ClientError> {
        self.get_json(&format!("{}/{id}/", kind.path_segment())).await
    }

    async fn counterparty_details(
        &self,
        kind: CounterpartyKind,
        id: i64,
    ) -> Result<CounterpartyDetails, ClientError> {
        self.get_json(&format!("{}/{id}/details/", kind.path_segment()))
            .await
    }

    async fn payment_create(
        &self,
        kind: CounterpartyKind,
        counterparty_id: i64,
        payload: &PaymentUpsert,
    ) -> Result<PaymentCreated, ClientError> {
        let endpoint =
            self.endpoint(&format!("{}/{counterparty_id}/payments/", kind.path_segment()))?;
        let res = self
            .http
            .post(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return res
                .json::<PaymentCreated>()
                .await
                .map_err(ClientError::Transport);
        }
        Err(Self::error_for(res).await)
    }

    async fn payment_update(
        &self,
        kind: CounterpartyKind,
        counterparty_id: i64,
        payment_id: i64,
        payload: &PaymentUpsert,
    ) -> Result<(), ClientError> {
        let endpoint = self.endpoint(&format!(
            "{}/{counterparty_id}/payments/{payment_id}/",
            kind.path_segment()
        ))?;
        let res = self
            .http
            .put(endpoint)
            .json(payload)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(Self::error_for(res).await)
    }
}
