//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::cli::Format;
use crate::error::CliError;
use crate::types::{Alert, Silence};

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Get the current format.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Check if JSON format is selected.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        matches!(self.format, Format::Json)
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Column-aligned text table.
///
/// Every column is as wide as its widest cell plus `padding` spaces; the
/// last column is never padded.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    padding: usize,
}

impl Table {
    /// Create a table with the given headers.
    #[must_use]
    pub fn new<I, S>(headers: I, padding: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            padding,
        }
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Write the header and all rows.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                let len = cell.chars().count();
                match widths.get_mut(i) {
                    Some(w) => *w = (*w).max(len),
                    None => widths.push(len),
                }
            }
        }

        for row in std::iter::once(&self.headers).chain(&self.rows) {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if i + 1 < row.len() {
                    let width = widths.get(i).copied().unwrap_or(0);
                    let pad = width.saturating_sub(cell.chars().count()) + self.padding;
                    line.push_str(&" ".repeat(pad));
                }
            }
            writeln!(writer, "{line}")?;
        }
        Ok(())
    }
}

/// Alerts for display.
///
/// Serializes as an array of alerts, each carrying its display `state`.
#[derive(Debug, Clone)]
pub struct AlertList {
    /// Alerts to show.
    pub alerts: Vec<Alert>,
    /// Add the `SILENCED BY` / `INHIBITED BY` columns.
    pub show_details: bool,
    /// Reference time for the `SINCE` column.
    pub now: DateTime<Utc>,
}

#[derive(Serialize)]
struct AlertEntry<'a> {
    #[serde(flatten)]
    alert: &'a Alert,
    state: &'a str,
}

impl Serialize for AlertList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.alerts.iter().map(|alert| AlertEntry {
            alert,
            state: alert.state(),
        }))
    }
}

impl AlertList {
    /// Create a list rendered relative to the current time.
    #[must_use]
    pub fn new(alerts: Vec<Alert>, show_details: bool) -> Self {
        Self {
            alerts,
            show_details,
            now: Utc::now(),
        }
    }
}

impl TableDisplay for AlertList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let mut headers = vec!["ALERT", "SEVERITY", "STATE", "SINCE", "INSTANCE", "SUMMARY"];
        if self.show_details {
            headers.extend(["SILENCED BY", "INHIBITED BY"]);
        }
        let mut table = Table::new(headers, 3);

        for alert in &self.alerts {
            let mut row = vec![
                alert.label("alertname").unwrap_or("-").to_string(),
                alert.label("severity").unwrap_or("-").to_string(),
                alert.state().to_string(),
                format_since(alert.starts_at, self.now),
                alert.label("instance").unwrap_or("-").to_string(),
                alert.summary().unwrap_or("-").to_string(),
            ];
            if self.show_details {
                row.push(join_or_dash(alert.silenced_by()));
                row.push(join_or_dash(alert.inhibited_by()));
            }
            table.push_row(row);
        }

        table.write_to(writer)
    }
}

/// Silences for display.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct SilenceList {
    /// Silences to show.
    pub silences: Vec<Silence>,
}

impl TableDisplay for SilenceList {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        if self.silences.is_empty() {
            writeln!(writer, "No active silences found")?;
            return Ok(());
        }

        let mut table = Table::new(
            ["ID", "STATUS", "START", "END", "CREATOR", "COMMENT", "MATCHERS"],
            2,
        );
        for silence in &self.silences {
            let matchers: Vec<String> = silence.matchers.iter().map(ToString::to_string).collect();
            table.push_row(vec![
                silence.id.clone(),
                silence.state().to_string(),
                format_time(silence.starts_at),
                format_time(silence.ends_at),
                silence.created_by.clone(),
                truncate(&silence.comment, 30),
                matchers.join(","),
            ]);
        }

        table.write_to(writer)
    }
}

/// Simple message output.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    /// Message text.
    pub message: String,
    /// Whether this is a success message.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub success: bool,
}

impl Message {
    /// Create a success message.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    /// Create an informational message.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl TableDisplay for Message {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{}", self.message)?;
        Ok(())
    }
}

/// Elapsed time since `start`: seconds below a minute, minutes below an
/// hour, hours otherwise.
fn format_since(start: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(start) = start else {
        return "-".to_string();
    };

    let elapsed = (now - start).to_std().unwrap_or_default();
    let secs = (elapsed.as_millis() + 500) / 1000;
    let rounded = if secs < 60 {
        secs
    } else if secs < 3600 {
        (secs + 30) / 60 * 60
    } else {
        (secs + 1800) / 3600 * 3600
    };

    humantime::format_duration(Duration::from_secs(rounded as u64)).to_string()
}

fn format_time(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(|| "-".to_string(), |t| t.format("%d %b %y %H:%M UTC").to_string())
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(",")
    }
}

/// Truncate a string to a maximum number of characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}
