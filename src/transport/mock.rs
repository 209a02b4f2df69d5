//! Recording transport for tests.
//!
//! Captures every outbound call in order and can be told to fail selected
//! operations.

use super::{InteractionRef, MessageId, RemoteCommandId, Transport};
use crate::commands::output::{InteractionResponse, OutgoingMessage};
use crate::error::{BotError, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// One outbound call observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    /// `send_message` returning `message_id`.
    Send {
        channel_id: String,
        message_id: MessageId,
        message: OutgoingMessage,
    },
    /// `respond_interaction`.
    Respond {
        interaction: InteractionRef,
        response: InteractionResponse,
    },
    /// `delete_message`.
    Delete {
        channel_id: String,
        message_id: MessageId,
    },
    /// `create_application_command` returning `command_id`.
    CreateCommand {
        name: String,
        command_id: RemoteCommandId,
    },
    /// `delete_application_command`.
    DeleteCommand { command_id: RemoteCommandId },
}

/// A transport that records calls instead of talking to a platform.
pub struct MockTransport {
    calls: Mutex<Vec<TransportCall>>,
    next_id: AtomicU64,
    fail_sends: bool,
    fail_deletes: bool,
    failing_commands: HashSet<String>,
}

impl MockTransport {
    /// Creates a transport where every call succeeds.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1000),
            fail_sends: false,
            fail_deletes: false,
            failing_commands: HashSet::new(),
        }
    }

    /// Makes every `send_message` fail.
    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    /// Makes every `delete_message` and `delete_application_command` fail.
    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    /// Makes registration and deregistration of the named command fail.
    pub fn failing_command(mut self, name: &str) -> Self {
        self.failing_commands.insert(name.to_string());
        self
    }

    /// Returns a snapshot of the recorded calls.
    pub async fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().await.clone()
    }

    /// Returns the messages sent so far as `(message_id, message)` pairs.
    pub async fn sent(&self) -> Vec<(MessageId, OutgoingMessage)> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                TransportCall::Send {
                    message_id,
                    message,
                    ..
                } => Some((message_id.clone(), message.clone())),
                _ => None,
            })
            .collect()
    }

    /// Returns the interaction responses so far.
    pub async fn responses(&self) -> Vec<InteractionResponse> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                TransportCall::Respond { response, .. } => Some(response.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the ids of deleted messages so far.
    pub async fn deleted(&self) -> Vec<MessageId> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                TransportCall::Delete { message_id, .. } => Some(message_id.clone()),
                _ => None,
            })
            .collect()
    }

    fn allocate_id(&self) -> String {
        self.next_id.fetch_add(1, Ordering::Relaxed).to_string()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send_message(&self, channel_id: &str, message: OutgoingMessage) -> Result<MessageId> {
        if self.fail_sends {
            return Err(BotError::transport("Missing Access"));
        }
        let message_id = self.allocate_id();
        self.calls.lock().await.push(TransportCall::Send {
            channel_id: channel_id.to_string(),
            message_id: message_id.clone(),
            message,
        });
        Ok(message_id)
    }

    async fn respond_interaction(
        &self,
        interaction: &InteractionRef,
        response: InteractionResponse,
    ) -> Result<()> {
        self.calls.lock().await.push(TransportCall::Respond {
            interaction: interaction.clone(),
            response,
        });
        Ok(())
    }

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<()> {
        if self.fail_deletes {
            return Err(BotError::transport("Unknown Message"));
        }
        self.calls.lock().await.push(TransportCall::Delete {
            channel_id: channel_id.to_string(),
            message_id: message_id.to_string(),
        });
        Ok(())
    }

    async fn create_application_command(
        &self,
        _guild_id: Option<&str>,
        name: &str,
        _description: &str,
    ) -> Result<RemoteCommandId> {
        if self.failing_commands.contains(name) {
            return Err(BotError::transport(format!("Cannot create '{name}'")));
        }
        let command_id = format!("cmd-{name}");
        self.calls.lock().await.push(TransportCall::CreateCommand {
            name: name.to_string(),
            command_id: command_id.clone(),
        });
        Ok(command_id)
    }

    async fn delete_application_command(
        &self,
        _guild_id: Option<&str>,
        command_id: &str,
    ) -> Result<()> {
        let failing = command_id
            .strip_prefix("cmd-")
            .is_some_and(|name| self.failing_commands.contains(name));
        if self.fail_deletes || failing {
            return Err(BotError::transport(format!(
                "Unknown application command {command_id}"
            )));
        }
        self.calls.lock().await.push(TransportCall::DeleteCommand {
            command_id: command_id.to_string(),
        });
        Ok(())
    }
}
