//! Command-line argument parsing with clap.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::{ApiVersion, DEFAULT_URL};
use crate::types::DEFAULT_CREATOR;

/// alertctl - Alertmanager command-line client.
#[derive(Parser, Debug, Clone)]
#[command(name = "alertctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Alertmanager URL.
    #[arg(short, long, global = true, env = "ALERTCTL_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Alertmanager API version.
    #[arg(
        short = 'a',
        long,
        global = true,
        env = "ALERTCTL_API_VERSION",
        value_enum,
        default_value_t = ApiVersion::V2
    )]
    pub api_version: ApiVersion,

    /// Output format.
    #[arg(short, long, global = true, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[derive(Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Manage alerts.
    Alerts {
        /// Alerts subcommand to execute.
        #[command(subcommand)]
        command: AlertsCommands,
    },

    /// Manage silences.
    Silences {
        /// Silences subcommand to execute.
        #[command(subcommand)]
        command: SilencesCommands,
    },
}

/// Alerts subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum AlertsCommands {
    /// List alerts with filtering options.
    ///
    /// By default only active alerts are shown (silenced and inhibited
    /// alerts are hidden).
    List(ListAlertsArgs),
}

/// Arguments for `alerts list`.
#[derive(Args, Debug, Clone, Default)]
pub struct ListAlertsArgs {
    /// Show all alerts, including silenced and inhibited ones.
    #[arg(short = 'A', long)]
    pub all: bool,

    /// Show silenced alerts.
    #[arg(short, long)]
    pub silenced: bool,

    /// Show inhibited alerts.
    #[arg(short, long)]
    pub inhibited: bool,

    /// Show active alerts (the default).
    #[arg(long)]
    pub active: bool,

    /// Filter by severity label (e.g. `critical`).
    #[arg(short = 'l', long)]
    pub severity: Option<String>,

    /// Filter by instance label.
    #[arg(short = 'n', long)]
    pub instance: Option<String>,
}

/// Silences subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum SilencesCommands {
    /// List all silences.
    List,

    /// Create a new silence.
    Create(CreateSilenceArgs),

    /// Delete a silence by ID.
    Delete {
        /// Silence ID.
        id: String,
    },
}

/// Arguments for `silences create`.
#[derive(Args, Debug, Clone)]
pub struct CreateSilenceArgs {
    /// Why the silence exists (required).
    #[arg(long)]
    pub comment: String,

    /// Silence creator.
    #[arg(long, default_value = DEFAULT_CREATOR)]
    pub creator: String,

    /// How long the silence lasts (e.g. `30m`, `2h`, `1d`).
    #[arg(long, default_value = "2h", value_parser = humantime::parse_duration)]
    pub duration: Duration,

    /// Matchers as `name=value` or `name=~regex` (repeatable, comma-separated).
    #[arg(short, long, value_name = "MATCHER", value_delimiter = ',')]
    pub matcher: Vec<String>,

    /// Shortcut for `--matcher alertname=NAME`.
    #[arg(long)]
    pub alertname: Option<String>,

    /// Shortcut for `--matcher instance=NAME`.
    #[arg(long)]
    pub instance: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_help_does_not_panic() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["alertctl", "alerts", "list"]);
        assert_eq!(cli.url, "http://localhost:9093");
        assert_eq!(cli.api_version, ApiVersion::V2);
        assert_eq!(cli.format, Format::Table);
        match cli.command {
            Commands::Alerts {
                command: AlertsCommands::List(args),
            } => {
                assert!(!args.all && !args.silenced && !args.inhibited && !args.active);
                assert!(args.severity.is_none());
            }
            _ => panic!("expected alerts list command"),
        }
    }

    #[test]
    fn parse_alerts_list_short_flags() {
        let cli = Cli::parse_from([
            "alertctl", "alerts", "list", "-A", "-s", "-i", "-l", "critical", "-n", "h1",
        ]);
        match cli.command {
            Commands::Alerts {
                command: AlertsCommands::List(args),
            } => {
                assert!(args.all);
                assert!(args.silenced);
                assert!(args.inhibited);
                assert!(!args.active);
                assert_eq!(args.severity.as_deref(), Some("critical"));
                assert_eq!(args.instance.as_deref(), Some("h1"));
            }
            _ => panic!("expected alerts list command"),
        }
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "alertctl", "silences", "list", "--url", "http://am:9093", "-a", "v1", "-f", "json",
        ]);
        assert_eq!(cli.url, "http://am:9093");
        assert_eq!(cli.api_version, ApiVersion::V1);
        assert_eq!(cli.format, Format::Json);
        assert!(matches!(
            cli.command,
            Commands::Silences {
                command: SilencesCommands::List
            }
        ));
    }

    #[test]
    fn invalid_api_version_is_rejected() {
        let result = Cli::try_parse_from(["alertctl", "--api-version", "v3", "alerts", "list"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_silences_create() {
        let cli = Cli::parse_from([
            "alertctl",
            "silences",
            "create",
            "--comment",
            "maintenance",
            "--duration",
            "90m",
            "--matcher",
            "env=prod,job=~node.*",
            "--matcher",
            "team=sre",
            "--alertname",
            "Disk",
        ]);
        match cli.command {
            Commands::Silences {
                command: SilencesCommands::Create(args),
            } => {
                assert_eq!(args.comment, "maintenance");
                assert_eq!(args.creator, "alertctl");
                assert_eq!(args.duration, Duration::from_secs(90 * 60));
                assert_eq!(args.matcher, vec!["env=prod", "job=~node.*", "team=sre"]);
                assert_eq!(args.alertname.as_deref(), Some("Disk"));
                assert!(args.instance.is_none());
            }
            _ => panic!("expected silences create command"),
        }
    }

    #[test]
    fn silences_create_defaults_duration() {
        let cli = Cli::parse_from(["alertctl", "silences", "create", "--comment", "x"]);
        match cli.command {
            Commands::Silences {
                command: SilencesCommands::Create(args),
            } => assert_eq!(args.duration, Duration::from_secs(2 * 3600)),
            _ => panic!("expected silences create command"),
        }
    }

    #[test]
    fn silences_create_requires_comment() {
        let result = Cli::try_parse_from(["alertctl", "silences", "create", "--alertname", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_silences_delete() {
        let cli = Cli::parse_from(["alertctl", "silences", "delete", "abc123"]);
        match cli.command {
            Commands::Silences {
                command: SilencesCommands::Delete { id },
            } => assert_eq!(id, "abc123"),
            _ => panic!("expected silences delete command"),
        }
    }

    #[test]
    fn format_default_is_table() {
        assert_eq!(Format::default(), Format::Table);
    }
}
