//! alertctl binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use alertctl::cli::{Cli, Commands};
use alertctl::commands::{AlertsCommand, SilencesCommand};
use alertctl::config::ClientConfig;
use alertctl::output::OutputFormat;

fn main() -> ExitCode {
    // Logs go to stderr so tables on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), alertctl::CliError> {
    let config = ClientConfig::new(&cli.url, cli.api_version)?;
    let format = OutputFormat::new(cli.format);
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Alerts { command } => {
            let cmd = AlertsCommand::new(&config);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
        Commands::Silences { command } => {
            let cmd = SilencesCommand::new(&config);
            cmd.execute(&mut stdout, &format, &command).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_with_invalid_url_fails() {
        let cli = Cli::parse_from(["alertctl", "--url", "localhost:9093", "alerts", "list"]);
        let result = run(cli).await;
        assert!(matches!(result, Err(alertctl::CliError::Config(_))));
    }

    #[tokio::test]
    async fn run_alerts_list_without_server_fails() {
        // Bind then drop to get a port nobody listens on
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|l| l.local_addr())
            .expect("ephemeral port");
        let url = format!("http://{addr}");
        let cli = Cli::parse_from(["alertctl", "--url", url.as_str(), "alerts", "list"]);
        let result = run(cli).await;
        assert!(matches!(result, Err(alertctl::CliError::Transport(_))));
    }
}
