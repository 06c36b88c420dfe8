//! Alert command implementation.
//!
//! Fetches alerts, applies the list filter and prints the result.

use std::io::Write;

use tracing::debug;

use crate::cli::{AlertsCommands, ListAlertsArgs};
use crate::client::AlertmanagerClient;
use crate::config::ClientConfig;
use crate::error::CliError;
use crate::filter::AlertFilter;
use crate::output::{AlertList, Message, OutputFormat};

/// Handler for alert subcommands.
pub struct AlertsCommand<'a> {
    config: &'a ClientConfig,
}

impl<'a> AlertsCommand<'a> {
    /// Creates a new alert command handler.
    #[must_use]
    pub const fn new(config: &'a ClientConfig) -> Self {
        Self { config }
    }

    /// Executes the alert subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &AlertsCommands,
    ) -> Result<(), CliError> {
        match command {
            AlertsCommands::List(args) => self.list(out, format, args).await,
        }
    }

    async fn list<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &ListAlertsArgs,
    ) -> Result<(), CliError> {
        let filter = AlertFilter::from(args);
        let client = AlertmanagerClient::new(self.config)?;

        let alerts = client.get_alerts().await?;
        let total = alerts.len();
        let alerts = filter.apply(alerts);
        debug!(total, shown = alerts.len(), "Filtered alerts");

        if alerts.is_empty() {
            format.write(out, &Message::info(filter.empty_message()))?;
            return Ok(());
        }

        format.write(out, &AlertList::new(alerts, filter.show_all))
    }
}
