//! Chat platform abstraction for Herald.
//!
//! The router never touches wire framing. It consumes the platform through the
//! [`Transport`] trait and receives [`InboundEvent`]s from whichever binding
//! feeds the dispatcher.

mod console;
mod mock;

pub use console::{parse_script, ConsoleTransport};
pub use mock::{MockTransport, TransportCall};

use crate::commands::output::{InteractionResponse, OutgoingMessage};
use crate::error::Result;
use async_trait::async_trait;

/// Platform message identifier.
pub type MessageId = String;

/// Platform identifier of a registered application (slash) command.
pub type RemoteCommandId = String;

/// Outbound operations the router needs from the chat platform.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a message to a channel and returns its id.
    async fn send_message(&self, channel_id: &str, message: OutgoingMessage) -> Result<MessageId>;

    /// Answers an interaction, either with a new message or by editing the
    /// message the interaction came from.
    async fn respond_interaction(
        &self,
        interaction: &InteractionRef,
        response: InteractionResponse,
    ) -> Result<()>;

    /// Deletes a message.
    async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<()>;

    /// Registers an application command on the platform.
    async fn create_application_command(
        &self,
        guild_id: Option<&str>,
        name: &str,
        description: &str,
    ) -> Result<RemoteCommandId>;

    /// Removes a previously registered application command.
    async fn delete_application_command(
        &self,
        guild_id: Option<&str>,
        command_id: &str,
    ) -> Result<()>;
}

/// A chat message as received from the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    /// Message id.
    pub id: MessageId,
    /// Channel the message was posted in.
    pub channel_id: String,
    /// Author user id.
    pub author_id: String,
    /// Raw text.
    pub content: String,
}

/// Handle used to answer an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionRef {
    /// Interaction id.
    pub id: String,
    /// Channel the interaction happened in.
    pub channel_id: String,
    /// Message a component interaction is attached to.
    pub message_id: Option<MessageId>,
}

/// Discriminated interaction payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionKind {
    /// A slash command invocation.
    ApplicationCommand {
        /// Invoked command name.
        name: String,
    },
    /// A button click.
    Component {
        /// Routing key of the clicked control.
        custom_id: String,
    },
}

/// A structured interaction as received from the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionEvent {
    /// Reply handle.
    pub interaction: InteractionRef,
    /// Invoking user id.
    pub user_id: String,
    /// Payload.
    pub kind: InteractionKind,
}

/// Everything the dispatcher accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Free-text message.
    Message(MessageEvent),
    /// Slash command or component interaction.
    Interaction(InteractionEvent),
}
