//! CLI error types.

use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid configuration (bad URL, unknown API version).
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid argument supplied on the command line.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A `--matcher` value could not be parsed.
    #[error("invalid matcher format '{input}': {reason}")]
    InvalidMatcher {
        /// The raw matcher text.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request never produced an HTTP response (connect failure, timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status of 400 or above.
    #[error("API error: {status}, response: {body}")]
    Api {
        /// Status line, e.g. `404 Not Found`.
        status: String,
        /// Response body, verbatim.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode {what} response: {source}")]
    Decode {
        /// What was being decoded.
        what: &'static str,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Builds a decode error for the given payload kind.
    pub(crate) fn decode(what: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::Decode { what, source }
    }
}
