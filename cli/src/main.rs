//! Debate Coach binary: argument parsing, config, and layer wiring.

use anyhow::{Context, Result};
use clap::Parser;
use coach_application::CoachController;
use coach_domain::Mode;
use coach_infrastructure::{ConfigLoader, HttpCoachGateway};
use coach_presentation::{ChatRepl, Cli, ConsoleFormatter};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!(e))
            .context("failed to load configuration")?
    };
    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
    }
    for issue in config.validate() {
        warn!("config: {issue}");
    }

    let mode: Mode = match &cli.mode {
        Some(mode) => mode.parse()?,
        None => config.default_mode(),
    };

    info!(base_url = %config.backend.base_url, %mode, "starting debate-coach");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.backend.timeout_secs))
        .build()
        .context("failed to build HTTP client")?;
    let gateway = Arc::new(
        HttpCoachGateway::new(client, &config.backend.base_url)
            .context("invalid backend base URL")?,
    );
    let controller = Arc::new(CoachController::new(gateway));

    // The session is created up front; a failure here is user-visible and
    // blocking, but the REPL still starts so /new can retry.
    if let Err(e) = controller.new_session(mode).await {
        eprintln!("Could not start a session: {e}");
        if cli.message.is_some() {
            anyhow::bail!("no session, giving up");
        }
    }

    // One-shot mode: send the message, print the reply and panels, exit.
    if let Some(message) = &cli.message {
        controller.send(message).await;
        let state = controller.state();
        if let Some(turn) = state.conversation.last() {
            println!("{}", ConsoleFormatter::format_turn(turn));
        }
        if !cli.quiet {
            println!();
            print!("{}", ConsoleFormatter::format_panels(&state));
        }
        return Ok(());
    }

    // Interactive chat
    let repl = ChatRepl::new(controller, mode).with_panels(!cli.quiet);
    repl.run().await?;

    Ok(())
}
