//! Command-line argument parsing for Herald.

use clap::Parser;
use std::path::{Path, PathBuf};

/// Chat-bot command router with paginated help menus.
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Event script to replay through the console transport ("-" reads stdin)
    #[arg(long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// User id the bot posts as; its own messages are ignored
    #[arg(long, value_name = "ID", env = "HERALD_BOT_ID", default_value = "herald")]
    pub bot_id: String,

    /// Write logs to the state directory instead of stderr
    #[arg(long)]
    pub log_file: bool,

    /// Validate config and command tables, then exit
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    /// Parses CLI arguments from the environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path, using the default if not specified.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(herald::config::Config::default_path)
    }

    /// Returns true if the event script should be read from stdin.
    pub fn script_from_stdin(&self) -> bool {
        self.script.as_deref() == Some(Path::new("-"))
    }
}
