//! Error types for Herald.
//!
//! Defines the main error enum used throughout the bot.

use thiserror::Error;

/// Main error type for Herald operations.
#[derive(Error, Debug)]
pub enum BotError {
    /// Configuration errors (unreadable file, invalid TOML, bad values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Two commands were declared under the same name.
    #[error("Conflicting command names: '{name}' already exists")]
    DuplicateCommand {
        /// The conflicting command name.
        name: String,
    },

    /// Chat platform errors (send, edit, delete or registration failures).
    #[error("Transport error: {0}")]
    Transport(String),
}

impl BotError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a duplicate command error for the given name.
    pub fn duplicate_command(name: impl Into<String>) -> Self {
        Self::DuplicateCommand { name: name.into() }
    }

    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::DuplicateCommand { .. } => "Registry Error",
            Self::Transport(_) => "Transport Error",
        }
    }

    /// Returns true for errors that must stop the process at startup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_) | Self::DuplicateCommand { .. })
    }
}

/// Result type alias using BotError.
pub type Result<T> = std::result::Result<T, BotError>;
