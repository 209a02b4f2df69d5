//! Small built-in handlers (`ping`, `config`, slash `test`, placeholders).

use super::{CommandContext, InteractionHandler, MessageHandler};
use crate::commands::notices::PLACEHOLDER;
use crate::commands::output::{Embed, InteractionResponse, OutgoingMessage};
use crate::config::Config;
use crate::error::Result;
use crate::transport::{InteractionEvent, MessageEvent};
use async_trait::async_trait;

/// Replies with a pong embed.
pub struct PingHandler;

#[async_trait]
impl MessageHandler for PingHandler {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        message: &MessageEvent,
        _args: &[String],
    ) -> Result<()> {
        let embed = pong_embed(ctx.config).description("Pong!");
        ctx.transport
            .send_message(&message.channel_id, OutgoingMessage::embed(embed))
            .await?;
        Ok(())
    }
}

/// Slash flavour of ping.
pub struct SlashPingHandler;

#[async_trait]
impl InteractionHandler for SlashPingHandler {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        interaction: &InteractionEvent,
    ) -> Result<()> {
        let response = InteractionResponse::reply(OutgoingMessage::embed(pong_embed(ctx.config)));
        ctx.transport
            .respond_interaction(&interaction.interaction, response)
            .await
    }
}

fn pong_embed(config: &Config) -> Embed {
    Embed::new()
        .title("Pong")
        .color(255, 255, 255)
        .footer(config.brand.name.clone(), &config.brand.icon)
        .truncate()
}

/// Shows the running configuration. The token is never included.
pub struct CheckConfigHandler;

#[async_trait]
impl MessageHandler for CheckConfigHandler {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        message: &MessageEvent,
        _args: &[String],
    ) -> Result<()> {
        let embed = config_embed(ctx.config, &message.author_id);
        ctx.transport
            .send_message(&message.channel_id, OutgoingMessage::embed(embed))
            .await?;
        Ok(())
    }
}

fn status(enabled: bool) -> &'static str {
    if enabled {
        "✅"
    } else {
        "❌"
    }
}

/// Builds the configuration summary embed.
pub fn config_embed(config: &Config, requested_by: &str) -> Embed {
    let admins = if config.authorized_ids.is_empty() {
        "None".to_string()
    } else {
        config
            .authorized_ids
            .iter()
            .map(|id| format!("<@{id}>"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    Embed::new()
        .title(format!("⚙️ {} Configuration", config.brand.name))
        .description("Bot configuration and settings")
        .field(
            "Basic Settings",
            format!(
                "**Command Prefix:** `{}`\n**Brand Name:** `{}`",
                config.prefix, config.brand.name
            ),
        )
        .field("Authenticated Users", admins)
        .field(
            "Command Systems",
            format!(
                "**Prefix Commands:** {}\n**Slash Commands:** {}",
                status(config.prefix_enabled),
                status(config.slash_enabled)
            ),
        )
        .field(
            "Advanced Settings",
            format!(
                "**Auto-Deregister:** {}",
                status(config.deregister_commands_after_restart)
            ),
        )
        .color(255, 255, 255)
        .footer(
            format!(
                "{} • Configuration checked by <@{requested_by}>",
                config.brand.name
            ),
            &config.brand.icon,
        )
        .thumbnail(&config.brand.icon)
        .truncate()
}

/// Stand-in for catalogue commands without behaviour.
pub struct PlaceholderHandler;

#[async_trait]
impl MessageHandler for PlaceholderHandler {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        message: &MessageEvent,
        _args: &[String],
    ) -> Result<()> {
        ctx.transport
            .send_message(&message.channel_id, OutgoingMessage::text(PLACEHOLDER))
            .await?;
        Ok(())
    }
}
