//! Silence command implementation.
//!
//! Handles silence listing, creation and deletion.

use std::io::Write;

use chrono::{Duration, Utc};

use crate::cli::{CreateSilenceArgs, SilencesCommands};
use crate::client::AlertmanagerClient;
use crate::config::ClientConfig;
use crate::error::CliError;
use crate::output::{Message, OutputFormat, SilenceList};
use crate::types::{Matcher, Silence};

/// Handler for silence subcommands.
pub struct SilencesCommand<'a> {
    config: &'a ClientConfig,
}

impl<'a> SilencesCommand<'a> {
    /// Creates a new silence command handler.
    #[must_use]
    pub const fn new(config: &'a ClientConfig) -> Self {
        Self { config }
    }

    /// Executes the silence subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if the command fails.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &SilencesCommands,
    ) -> Result<(), CliError> {
        match command {
            SilencesCommands::List => self.list(out, format).await,
            SilencesCommands::Create(args) => self.create(out, format, args).await,
            SilencesCommands::Delete { id } => self.delete(out, format, id).await,
        }
    }

    async fn list<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let client = AlertmanagerClient::new(self.config)?;
        let silences = client.get_silences().await?;

        format.write(out, &SilenceList { silences })
    }

    async fn create<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &CreateSilenceArgs,
    ) -> Result<(), CliError> {
        // Validate before touching the network.
        let silence = build_silence(args)?;
        silence.validate()?;

        let client = AlertmanagerClient::new(self.config)?;
        let id = client.create_silence(silence).await?;

        format.write(
            out,
            &Message::success(format!("Successfully created silence with ID: {id}")),
        )
    }

    async fn delete<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        id: &str,
    ) -> Result<(), CliError> {
        let client = AlertmanagerClient::new(self.config)?;
        client.delete_silence(id).await?;

        format.write(
            out,
            &Message::success(format!("Successfully deleted silence {id}")),
        )
    }
}

/// Collects matchers in order: `--alertname`, `--instance`, then each
/// `--matcher`.
fn collect_matchers(args: &CreateSilenceArgs) -> Result<Vec<Matcher>, CliError> {
    let mut matchers = Vec::new();

    if let Some(name) = args.alertname.as_deref().filter(|s| !s.is_empty()) {
        matchers.push(Matcher::equal("alertname", name));
    }
    if let Some(instance) = args.instance.as_deref().filter(|s| !s.is_empty()) {
        matchers.push(Matcher::equal("instance", instance));
    }
    for raw in &args.matcher {
        matchers.push(raw.parse()?);
    }

    Ok(matchers)
}

/// Builds a silence starting now and lasting `--duration`.
fn build_silence(args: &CreateSilenceArgs) -> Result<Silence, CliError> {
    let matchers = collect_matchers(args)?;
    let duration = Duration::from_std(args.duration)
        .map_err(|e| CliError::InvalidArgument(format!("duration out of range: {e}")))?;

    let now = Utc::now();
    Ok(Silence::new(matchers, args.comment.clone())
        .with_window(now, now + duration)
        .with_creator(args.creator.clone()))
}
