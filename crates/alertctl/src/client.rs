//! Alertmanager HTTP client.
//!
//! The client speaks either API version and hides the differences:
//!
//! | Operation        | Method   | Path                         | v1 body          | v2 body     |
//! |------------------|----------|------------------------------|------------------|-------------|
//! | `get_alerts`     | `GET`    | `/api/{v}/alerts`            | `{status, data}` | bare array  |
//! | `get_silences`   | `GET`    | `/api/{v}/silences`          | bare array       | bare array  |
//! | `create_silence` | `POST`   | `/api/{v}/silences`          | `{silenceID}`    | `{silenceID}` |
//! | `delete_silence` | `DELETE` | `/api/{v}/silence/{id}`      | ignored          | ignored     |
//!
//! # Example
//!
//! ```rust,no_run
//! use alertctl::client::AlertmanagerClient;
//! use alertctl::config::{ApiVersion, ClientConfig};
//!
//! # async fn example() -> Result<(), alertctl::CliError> {
//! let config = ClientConfig::new("http://localhost:9093", ApiVersion::V2)?;
//! let client = AlertmanagerClient::new(&config)?;
//! let alerts = client.get_alerts().await?;
//! println!("{} alert(s)", alerts.len());
//! # Ok(())
//! # }
//! ```

use chrono::Utc;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::config::{ApiVersion, ClientConfig};
use crate::error::CliError;
use crate::types::{Alert, Silence, SilenceCreated, V1AlertResponse};

/// Alertmanager API client.
#[derive(Debug, Clone)]
pub struct AlertmanagerClient {
    http: Client,
    config: ClientConfig,
}

impl AlertmanagerClient {
    /// Creates a client for the configured server.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, CliError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout)
            .user_agent(concat!("alertctl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// API version this client speaks.
    #[must_use]
    pub const fn api_version(&self) -> ApiVersion {
        self.config.api_version
    }

    /// Sends a request and returns the body of a successful response.
    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, CliError> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(CliError::Api {
                status: status.to_string(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        what: &'static str,
    ) -> Result<T, CliError> {
        let url = self.config.endpoint(resource);
        debug!(method = "GET", url = %url, "Sending request");

        let body = self.send(self.http.get(&url)).await?;
        serde_json::from_slice(&body).map_err(CliError::decode(what))
    }

    // ========================================================================
    // Alerts
    // ========================================================================

    /// Fetches all alerts.
    ///
    /// v1 responses are unwrapped from their envelope. v2 alerts without
    /// timestamps get `startsAt = now` and `endsAt = now + 24h`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, an error status, or a body
    /// that does not match the version's shape.
    pub async fn get_alerts(&self) -> Result<Vec<Alert>, CliError> {
        let alerts = match self.config.api_version {
            ApiVersion::V1 => {
                let envelope: V1AlertResponse = self.get("alerts", "v1").await?;
                debug!(status = %envelope.status, "Unwrapped v1 envelope");
                envelope.data
            }
            ApiVersion::V2 => {
                let mut alerts: Vec<Alert> = self.get("alerts", "v2").await?;
                let now = Utc::now();
                for alert in &mut alerts {
                    alert.fill_missing_times(now);
                }
                trace!(count = alerts.len(), "Filled missing v2 timestamps");
                alerts
            }
        };

        debug!(count = alerts.len(), "Fetched alerts");
        Ok(alerts)
    }

    // ========================================================================
    // Silences
    // ========================================================================

    /// Fetches all silences.
    ///
    /// Both versions are decoded as a bare array.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, an error status, or a body
    /// that is not an array of silences.
    pub async fn get_silences(&self) -> Result<Vec<Silence>, CliError> {
        let silences: Vec<Silence> = self.get("silences", "silences").await?;
        debug!(count = silences.len(), "Fetched silences");
        Ok(silences)
    }

    /// Creates a silence and returns its ID.
    ///
    /// Unset `startsAt`, `endsAt` and `createdBy` are filled before sending.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidArgument` without sending anything if the
    /// silence has no matchers or no comment, otherwise any request error.
    pub async fn create_silence(&self, silence: Silence) -> Result<String, CliError> {
        silence.validate()?;
        let silence = silence.with_defaults(Utc::now());

        let url = self.config.endpoint("silences");
        debug!(method = "POST", url = %url, matchers = silence.matchers.len(), "Sending request");

        let body = self.send(self.http.post(&url).json(&silence)).await?;
        let created: SilenceCreated =
            serde_json::from_slice(&body).map_err(CliError::decode("create silence"))?;

        debug!(id = %created.silence_id, "Created silence");
        Ok(created.silence_id)
    }

    /// Deletes a silence. The response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or an error status.
    pub async fn delete_silence(&self, id: &str) -> Result<(), CliError> {
        let url = self.config.endpoint(&format!("silence/{id}"));
        debug!(method = "DELETE", url = %url, "Sending request");

        self.send(self.http.delete(&url)).await?;
        Ok(())
    }
}
