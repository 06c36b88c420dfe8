//! Client configuration resolved from command-line flags.

use std::fmt;
use std::time::Duration;

use clap::ValueEnum;

use crate::error::CliError;

/// Alertmanager address used when none is given.
pub const DEFAULT_URL: &str = "http://localhost:9093";

/// Timeout applied to every request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Alertmanager HTTP API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ApiVersion {
    /// Legacy `/api/v1`, alerts wrapped in a `{status, data}` envelope.
    V1,
    /// `/api/v2`, bare JSON arrays.
    #[default]
    V2,
}

impl ApiVersion {
    /// Path segment for this version.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings shared by the API client and every command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// API version to speak.
    pub api_version: ApiVersion,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for the given server.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Config` if the URL is not `http://` or `https://`.
    pub fn new(url: &str, api_version: ApiVersion) -> Result<Self, CliError> {
        let url = url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CliError::Config(format!(
                "invalid Alertmanager URL: {url}, must start with http:// or https://"
            )));
        }

        Ok(Self {
            base_url: url.trim_end_matches('/').to_string(),
            api_version,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Full URL of an API resource, e.g. `alerts` or `silence/{id}`.
    #[must_use]
    pub fn endpoint(&self, resource: &str) -> String {
        format!("{}/api/{}/{resource}", self.base_url, self.api_version)
    }
}
