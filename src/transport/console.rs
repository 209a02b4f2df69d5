//! Headless console transport.
//!
//! Replays a line-oriented event script against the router and prints every
//! outbound call to stdout, so the bot can be exercised without a platform
//! connection.
//!
//! Script lines:
//! - `msg <user> <channel> <text...>` a chat message
//! - `cmd <user> <channel> <name>` a slash command invocation
//! - `click <user> <message-id> <custom-id>` a button click
//!
//! Blank lines and lines starting with `#` are ignored.

use super::{
    InboundEvent, InteractionEvent, InteractionKind, InteractionRef, MessageEvent, MessageId,
    RemoteCommandId, Transport,
};
use crate::commands::output::{InteractionResponse, OutgoingMessage, ResponseKind};
use crate::error::{BotError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

/// Channel used for clicks, which do not name one in the script.
const CONSOLE_CHANNEL: &str = "console";

/// Transport that prints outbound calls.
pub struct ConsoleTransport {
    next_id: AtomicU64,
}

impl ConsoleTransport {
    /// Creates a console transport.
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for ConsoleTransport {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats a message as indented plain text.
fn describe(message: &OutgoingMessage) -> String {
    let mut lines = Vec::new();
    if let Some(content) = &message.content {
        lines.push(content.clone());
    }
    for embed in &message.embeds {
        if let Some(title) = &embed.title {
            lines.push(format!("== {title} =="));
        }
        if let Some(description) = &embed.description {
            lines.push(description.clone());
        }
        for field in &embed.fields {
            lines.push(format!("-- {}", field.name));
            lines.push(field.value.clone());
        }
        if let Some((footer, _)) = &embed.footer {
            lines.push(format!("({footer})"));
        }
    }
    for row in &message.components {
        let labels: Vec<String> = row
            .iter()
            .map(|b| {
                if b.disabled {
                    format!("[{} (disabled)]", b.custom_id)
                } else {
                    format!("[{}]", b.custom_id)
                }
            })
            .collect();
        lines.push(labels.join(" "));
    }
    lines
        .iter()
        .map(|l| format!("    {l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn send_message(&self, channel_id: &str, message: OutgoingMessage) -> Result<MessageId> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed).to_string();
        println!("send #{id} -> {channel_id}\n{}", describe(&message));
        Ok(id)
    }

    async fn respond_interaction(
        &self,
        interaction: &InteractionRef,
        response: InteractionResponse,
    ) -> Result<()> {
        let mode = match response.kind {
            ResponseKind::Reply => "reply",
            ResponseKind::Ephemeral => "ephemeral",
            ResponseKind::UpdateMessage => "update",
        };
        let target = interaction
            .message_id
            .as_deref()
            .unwrap_or(&interaction.channel_id);
        println!("{mode} -> {target}\n{}", describe(&response.message));
        Ok(())
    }

    async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<()> {
        println!("delete #{message_id} in {channel_id}");
        Ok(())
    }

    async fn create_application_command(
        &self,
        guild_id: Option<&str>,
        name: &str,
        _description: &str,
    ) -> Result<RemoteCommandId> {
        println!(
            "register /{name} in {}",
            guild_id.unwrap_or("all guilds")
        );
        Ok(format!("console-{name}"))
    }

    async fn delete_application_command(
        &self,
        _guild_id: Option<&str>,
        command_id: &str,
    ) -> Result<()> {
        println!("deregister {command_id}");
        Ok(())
    }
}

/// Parses an event script into inbound events.
pub fn parse_script(script: &str) -> Result<Vec<InboundEvent>> {
    let mut events = Vec::new();

    for (index, raw) in script.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no = index + 1;
        let event_id = format!("evt-{line_no}");
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));

        let event = match verb {
            "msg" => {
                let mut parts = rest.trim_start().splitn(3, ' ');
                let (Some(user), Some(channel), Some(text)) =
                    (parts.next(), parts.next(), parts.next())
                else {
                    return Err(script_error(line_no, "expected: msg <user> <channel> <text>"));
                };
                InboundEvent::Message(MessageEvent {
                    id: event_id,
                    channel_id: channel.to_string(),
                    author_id: user.to_string(),
                    content: text.to_string(),
                })
            }
            "cmd" => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                let [user, channel, name] = parts.as_slice() else {
                    return Err(script_error(line_no, "expected: cmd <user> <channel> <name>"));
                };
                InboundEvent::Interaction(InteractionEvent {
                    interaction: InteractionRef {
                        id: event_id,
                        channel_id: (*channel).to_string(),
                        message_id: None,
                    },
                    user_id: (*user).to_string(),
                    kind: InteractionKind::ApplicationCommand {
                        name: (*name).to_string(),
                    },
                })
            }
            "click" => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                let [user, message_id, custom_id] = parts.as_slice() else {
                    return Err(script_error(
                        line_no,
                        "expected: click <user> <message-id> <custom-id>",
                    ));
                };
                InboundEvent::Interaction(InteractionEvent {
                    interaction: InteractionRef {
                        id: event_id,
                        channel_id: CONSOLE_CHANNEL.to_string(),
                        message_id: Some((*message_id).to_string()),
                    },
                    user_id: (*user).to_string(),
                    kind: InteractionKind::Component {
                        custom_id: (*custom_id).to_string(),
                    },
                })
            }
            other => {
                return Err(script_error(line_no, &format!("unknown event '{other}'")));
            }
        };
        events.push(event);
    }

    Ok(events)
}

fn script_error(line: usize, msg: &str) -> BotError {
    BotError::config(format!("Event script line {line}: {msg}"))
}
