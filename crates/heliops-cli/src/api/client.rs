//! HTTP API client for the HeliOps backend
//!
//! Every call attaches the bearer token when one is set, parses JSON, and
//! turns non-2xx statuses into an [`ApiError`] carrying the backend's message.
//! There is no retry, backoff or caching: callers refetch after mutations.

use crate::api::resource::Resource;
use crate::api::{endpoints, endpoints::ListQuery, types::*};
use crate::config::Config;
use crate::error::{ApiError, Result};
use heliops_common::models::{Client as FleetClient, Flight, Helicopter, User};
use heliops_common::FleetData;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// API client for the HeliOps backend
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>, timeout: Duration, token: Option<String>) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Create from CLI configuration
    pub fn from_config(config: &Config, token: Option<String>) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout_secs),
            token,
        )
    }

    /// Replace the bearer token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Exchange credentials for a bearer token and the user record
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let url = endpoints::login_url(&self.base_url);
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        self.send_json(self.client.post(&url).json(&request)).await
    }

    /// Fetch every record of `R`, optionally filtered server-side
    #[instrument(skip(self), fields(resource = R::LABEL))]
    pub async fn list<R: Resource>(&self, query: &ListQuery) -> Result<Vec<R>> {
        let url = endpoints::list_url(&self.base_url, R::PATH, query);
        let records: Vec<R> = self.send_json(self.client.get(&url)).await?;

        debug!(count = records.len(), "Fetched records");
        Ok(records)
    }

    #[instrument(skip(self), fields(resource = R::LABEL))]
    pub async fn get<R: Resource>(&self, id: &str) -> Result<R> {
        let url = endpoints::item_url(&self.base_url, R::PATH, id);
        self.send_json(self.client.get(&url)).await
    }

    #[instrument(skip(self, record), fields(resource = R::LABEL))]
    pub async fn create<R: Resource>(&self, record: &R) -> Result<R> {
        let url = endpoints::collection_url(&self.base_url, R::PATH);
        self.send_json(self.client.post(&url).json(record)).await
    }

    #[instrument(skip(self, record), fields(resource = R::LABEL))]
    pub async fn update<R: Resource>(&self, id: &str, record: &R) -> Result<R> {
        let url = endpoints::item_url(&self.base_url, R::PATH, id);
        self.send_json(self.client.put(&url).json(record)).await
    }

    #[instrument(skip(self), fields(resource = R::LABEL))]
    pub async fn delete<R: Resource>(&self, id: &str) -> Result<()> {
        let url = endpoints::item_url(&self.base_url, R::PATH, id);
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }

    /// Pilots, aircraft and clients, for showing names in place of ids
    pub async fn fleet_directory(&self) -> Result<FleetData> {
        let all = ListQuery::new();
        let (pilots, helicopters, clients) = tokio::try_join!(
            self.list::<User>(&all),
            self.list::<Helicopter>(&all),
            self.list::<FleetClient>(&all),
        )?;

        Ok(FleetData {
            pilots,
            helicopters,
            clients,
            ..FleetData::default()
        })
    }

    /// Pilots, aircraft, clients and flights in one snapshot for the fleet math
    pub async fn fleet_snapshot(&self) -> Result<FleetData> {
        let all = ListQuery::new();
        let (pilots, helicopters, clients, flights) = tokio::try_join!(
            self.list::<User>(&all),
            self.list::<Helicopter>(&all),
            self.list::<FleetClient>(&all),
            self.list::<Flight>(&all),
        )?;

        Ok(FleetData {
            pilots,
            helicopters,
            clients,
            locations: Vec::new(),
            flights,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let payload: Payload<T> = response.json().await.map_err(ApiError::from)?;
        Ok(payload.into_inner())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

        warn!(status = status.as_u16(), message = %message, "API request failed");
        Err(ApiError::from_status(status.as_u16(), message).into())
    }
}
