//! Command-line argument definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for debate-coach
#[derive(Parser, Debug)]
#[command(name = "debate-coach")]
#[command(author, version, about = "Debate Coach - stress-test claims and pitches from the terminal")]
#[command(long_about = r#"
Debate Coach starts a session against the coach backend and lets you chat
with it. The backend keeps a PRO/CON/SOURCES argument board and a running
strength score for your claim or pitch; both are rendered after every turn.

Modes:
  debate_counter    (alias: debate)  Stress-test a claim
  pitch_objections  (alias: pitch)   Test a pitch against tough objections

Config sources, later ones overriding earlier ones:
  ~/.config/debate-coach/config.toml, then ./coach.toml or ./.coach.toml,
  then --config <path>.

Example:
  debate-coach
  debate-coach --mode pitch "We should sell artisanal error messages"
  debate-coach --base-url http://localhost:8000/api -vv
"#)]
pub struct Cli {
    /// A single message to send (omit for interactive chat)
    pub message: Option<String>,

    /// Conversational mode to start in
    #[arg(short = 'M', long, value_name = "MODE")]
    pub mode: Option<String>,

    /// Backend base URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Path to config file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Ignore all config files and use defaults
    #[arg(long)]
    pub no_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the board and score panels (transcript only)
    #[arg(short, long)]
    pub quiet: bool,
}
