//! Command handlers for Herald.
//!
//! A handler is invoked once the dispatcher has resolved and authorized a
//! command. Handlers come in two shapes matching the two dispatch paths.

pub mod help;
pub mod system;
pub mod uptime;

use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use crate::commands::registry::Registry;
use crate::config::Config;
use crate::error::Result;
use crate::session::SessionManager;
use crate::transport::{InteractionEvent, MessageEvent, Transport};
use async_trait::async_trait;

/// Context provided to command handlers.
pub struct CommandContext<'a> {
    /// Outbound platform calls.
    pub transport: &'a dyn Transport,
    /// Validated settings.
    pub config: &'a Config,
    /// Prefix commands, for listings.
    pub prefix_commands: &'a Registry,
    /// Live interactive menus.
    pub sessions: &'a SessionManager,
    /// When the bot started.
    pub started_at: SystemTime,
}

/// Handler for commands typed as chat messages.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Runs the command. `args` excludes the command token.
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        message: &MessageEvent,
        args: &[String],
    ) -> Result<()>;
}

/// Handler for slash command interactions.
#[async_trait]
pub trait InteractionHandler: Send + Sync {
    /// Runs the command and answers the interaction.
    async fn execute(&self, ctx: &CommandContext<'_>, interaction: &InteractionEvent)
        -> Result<()>;
}

/// A command's executable part, tagged by dispatch shape.
#[derive(Clone)]
pub enum Handler {
    /// Runs from a chat message.
    Message(Arc<dyn MessageHandler>),
    /// Runs from an interaction.
    Interaction(Arc<dyn InteractionHandler>),
}

impl Handler {
    /// Wraps a message handler.
    pub fn message(handler: impl MessageHandler + 'static) -> Self {
        Self::Message(Arc::new(handler))
    }

    /// Wraps an interaction handler.
    pub fn interaction(handler: impl InteractionHandler + 'static) -> Self {
        Self::Interaction(Arc::new(handler))
    }

    /// Returns the dispatch shape name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::Interaction(_) => "interaction",
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler::{}", self.kind())
    }
}
