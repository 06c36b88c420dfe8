//! Wire model shared by the v1 and v2 Alertmanager APIs.
//!
//! Both API versions describe the same alerts and silences but disagree on
//! the shape of the `status` field: v1 sends a bare string, v2 sends an
//! object with the suppression lists. [`StatusField`] absorbs either shape
//! so the rest of the crate sees a single model.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CliError;

/// Creator recorded on silences that do not name one.
pub const DEFAULT_CREATOR: &str = "alertctl";

/// Unix timestamp of Go's zero `time.Time` (`0001-01-01T00:00:00Z`).
const ZERO_TIME_UNIX: i64 = -62_135_596_800;

// ============================================================================
// Status field
// ============================================================================

/// A `status` value as sent by either API version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusField<T> {
    /// v2 object form.
    Structured(T),
    /// v1 bare string form.
    Scalar(String),
}

impl<T: DeserializeOwned> StatusField<T> {
    /// Classifies a raw JSON value.
    ///
    /// The structured form is tried first, then the bare string. A value
    /// matching neither yields `None` rather than an error.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        // Derived struct visitors also accept sequences; only objects count.
        if value.is_object() {
            if let Ok(structured) = T::deserialize(value) {
                return Some(Self::Structured(structured));
            }
        }
        value.as_str().map(|s| Self::Scalar(s.to_string()))
    }
}

impl<T> StatusField<T> {
    /// Returns the structured form, if that is what was decoded.
    #[must_use]
    pub const fn structured(&self) -> Option<&T> {
        match self {
            Self::Structured(inner) => Some(inner),
            Self::Scalar(_) => None,
        }
    }

    /// Returns the bare string form, if that is what was decoded.
    #[must_use]
    pub fn scalar(&self) -> Option<&str> {
        match self {
            Self::Structured(_) => None,
            Self::Scalar(s) => Some(s),
        }
    }
}

impl<T: Serialize> Serialize for StatusField<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Structured(inner) => inner.serialize(serializer),
            Self::Scalar(s) => serializer.serialize_str(s),
        }
    }
}

fn lenient_status<'de, D, T>(deserializer: D) -> Result<Option<StatusField<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(StatusField::from_value))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Missing, `null` and Go zero-value timestamps all decode as unset.
fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let ts = Option::<DateTime<Utc>>::deserialize(deserializer)?;
    Ok(ts.filter(|t| t.timestamp() != ZERO_TIME_UNIX))
}

// ============================================================================
// Alerts
// ============================================================================

/// Canonical alert state used by the list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertState {
    /// Neither silenced nor inhibited.
    Active,
    /// Suppressed by a silence (or muted).
    Silenced,
    /// Suppressed by an inhibition rule.
    Inhibited,
}

impl AlertState {
    /// Returns the state as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Silenced => "silenced",
            Self::Inhibited => "inhibited",
        }
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// v2 alert status object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertStatus {
    /// Server-reported state; may be empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    /// IDs of silences suppressing the alert.
    #[serde(default, deserialize_with = "null_as_default")]
    pub silenced_by: Vec<String>,
    /// Fingerprints of alerts inhibiting this one.
    #[serde(default, deserialize_with = "null_as_default")]
    pub inhibited_by: Vec<String>,
    /// Names of time intervals muting the alert.
    #[serde(default, deserialize_with = "null_as_default")]
    pub muted_by: Vec<String>,
}

/// An alert as returned by `GET /api/{version}/alerts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Identifying labels (`alertname`, `severity`, `instance`, ...).
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,
    /// Human-readable annotations (`summary`, `description`, ...).
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "HashMap::is_empty"
    )]
    pub annotations: HashMap<String, String>,
    /// When the alert started firing.
    #[serde(
        default,
        deserialize_with = "optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub starts_at: Option<DateTime<Utc>>,
    /// When the alert is expected to resolve.
    #[serde(
        default,
        deserialize_with = "optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub ends_at: Option<DateTime<Utc>>,
    /// Last time the server updated the alert.
    #[serde(
        default,
        deserialize_with = "optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Server-computed identity of the label set.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub fingerprint: String,
    /// Raw status in whichever shape the server sent.
    #[serde(
        default,
        deserialize_with = "lenient_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<StatusField<AlertStatus>>,
}

impl Alert {
    /// Returns a label value.
    #[must_use]
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    /// Returns the `summary` annotation, falling back to `description`.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        ["summary", "description"]
            .iter()
            .find_map(|key| self.annotations.get(*key))
            .map(String::as_str)
    }

    /// Returns the v2 status object if the server sent one.
    #[must_use]
    pub fn status_detail(&self) -> Option<&AlertStatus> {
        self.status.as_ref().and_then(StatusField::structured)
    }

    /// Silence IDs suppressing this alert (empty for v1 alerts).
    #[must_use]
    pub fn silenced_by(&self) -> &[String] {
        self.status_detail().map_or(&[], |s| s.silenced_by.as_slice())
    }

    /// Alerts inhibiting this alert (empty for v1 alerts).
    #[must_use]
    pub fn inhibited_by(&self) -> &[String] {
        self.status_detail().map_or(&[], |s| s.inhibited_by.as_slice())
    }

    /// State shown to the user.
    ///
    /// An explicit server state wins, then the suppression lists, then the
    /// v1 status string, then `active`.
    #[must_use]
    pub fn state(&self) -> &str {
        if let Some(detail) = self.status_detail() {
            if !detail.state.is_empty() {
                return &detail.state;
            }
            if !detail.silenced_by.is_empty() || !detail.muted_by.is_empty() {
                return AlertState::Silenced.as_str();
            }
            if !detail.inhibited_by.is_empty() {
                return AlertState::Inhibited.as_str();
            }
        }

        match self.status.as_ref().and_then(StatusField::scalar) {
            Some(s) if !s.is_empty() => s,
            _ => AlertState::Active.as_str(),
        }
    }

    /// State used by the list filter.
    ///
    /// Looks only at the suppression lists and ignores any explicit state
    /// string, so it can disagree with [`Alert::state`].
    #[must_use]
    pub fn filter_state(&self) -> AlertState {
        let Some(detail) = self.status_detail() else {
            return AlertState::Active;
        };

        if !detail.silenced_by.is_empty() || !detail.muted_by.is_empty() {
            AlertState::Silenced
        } else if !detail.inhibited_by.is_empty() {
            AlertState::Inhibited
        } else {
            AlertState::Active
        }
    }

    /// Fills unset timestamps with `now` and `now + 24h`.
    pub fn fill_missing_times(&mut self, now: DateTime<Utc>) {
        if self.starts_at.is_none() {
            self.starts_at = Some(now);
        }
        if self.ends_at.is_none() {
            self.ends_at = Some(now + Duration::hours(24));
        }
    }
}

/// v1 response envelope for `GET /api/v1/alerts`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V1AlertResponse {
    /// `success` or `error`.
    pub status: String,
    /// The alerts.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Alert>,
    /// Error class when `status` is `error`.
    #[serde(default)]
    pub error_type: Option<String>,
    /// Error message when `status` is `error`.
    #[serde(default)]
    pub error: Option<String>,
}

// ============================================================================
// Silences
// ============================================================================

/// Label matcher used to select alerts for a silence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matcher {
    /// Label name.
    pub name: String,
    /// Value or regular expression.
    pub value: String,
    /// Whether `value` is a regular expression.
    #[serde(default)]
    pub is_regex: bool,
}

impl Matcher {
    /// Creates an equality matcher.
    #[must_use]
    pub fn equal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_regex: false,
        }
    }
}

/// v2 silence status object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilenceStatus {
    /// `active`, `pending` or `expired`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
}

/// A silence, either fetched from the server or about to be created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Silence {
    /// Server-assigned ID, empty until created.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub id: String,
    /// Raw status in whichever shape the server sent.
    #[serde(
        default,
        deserialize_with = "lenient_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<StatusField<SilenceStatus>>,
    /// Matchers, all of which must match for an alert to be silenced.
    #[serde(default, deserialize_with = "null_as_default")]
    pub matchers: Vec<Matcher>,
    /// Start of the silence window.
    #[serde(
        default,
        deserialize_with = "optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub starts_at: Option<DateTime<Utc>>,
    /// End of the silence window.
    #[serde(
        default,
        deserialize_with = "optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub ends_at: Option<DateTime<Utc>>,
    /// Author of the silence.
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_by: String,
    /// Why the silence exists.
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
}

impl Silence {
    /// Creates a silence with no window or creator set.
    #[must_use]
    pub fn new(matchers: Vec<Matcher>, comment: impl Into<String>) -> Self {
        Self {
            matchers,
            comment: comment.into(),
            ..Self::default()
        }
    }

    /// Sets the silence window.
    #[must_use]
    pub fn with_window(mut self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        self.starts_at = Some(starts_at);
        self.ends_at = Some(ends_at);
        self
    }

    /// Sets the creator.
    #[must_use]
    pub fn with_creator(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    /// Fills only the unset fields: `now`, `now + 1h` and [`DEFAULT_CREATOR`].
    #[must_use]
    pub fn with_defaults(mut self, now: DateTime<Utc>) -> Self {
        if self.starts_at.is_none() {
            self.starts_at = Some(now);
        }
        if self.ends_at.is_none() {
            self.ends_at = Some(now + Duration::hours(1));
        }
        if self.created_by.is_empty() {
            self.created_by = DEFAULT_CREATOR.to_string();
        }
        self
    }

    /// Checks that the silence can be submitted.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidArgument` when there are no matchers or the
    /// comment is blank.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.matchers.is_empty() {
            return Err(CliError::InvalidArgument(
                "at least one matcher must be specified (use --matcher or --alertname/--instance)"
                    .into(),
            ));
        }
        if self.comment.trim().is_empty() {
            return Err(CliError::InvalidArgument(
                "silence comment is required".into(),
            ));
        }
        Ok(())
    }

    /// State shown to the user: server state, then v1 string, then `active`.
    #[must_use]
    pub fn state(&self) -> &str {
        match &self.status {
            Some(StatusField::Structured(s)) if !s.state.is_empty() => &s.state,
            Some(StatusField::Scalar(s)) if !s.is_empty() => s,
            _ => AlertState::Active.as_str(),
        }
    }
}

/// Response to `POST /api/{version}/silences`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SilenceCreated {
    /// ID of the new silence.
    #[serde(rename = "silenceID", default)]
    pub silence_id: String,
}
