//! Paginated help menu (`help`).
//!
//! Sends a menu listing the prefix commands ten per page, split into general and
//! admin categories, and registers a session so its buttons work.

use super::{CommandContext, MessageHandler};
use crate::commands::output::{Button, ButtonStyle, Embed, OutgoingMessage};
use crate::commands::registry::Command;
use crate::config::Config;
use crate::error::Result;
use crate::session::{Category, PageAction, PaginationSession, RenderResult};
use crate::transport::MessageEvent;
use async_trait::async_trait;

/// Handles the help command.
pub struct HelpHandler;

#[async_trait]
impl MessageHandler for HelpHandler {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        message: &MessageEvent,
        _args: &[String],
    ) -> Result<()> {
        let (admin, general): (Vec<_>, Vec<_>) = ctx
            .prefix_commands
            .commands()
            .await
            .into_iter()
            .partition(|cmd| cmd.admin_only);

        let prefix = &ctx.config.prefix;
        let session = PaginationSession::new(
            &message.author_id,
            general.iter().map(|c| format_entry(c, prefix)).collect(),
            admin.iter().map(|c| format_entry(c, prefix)).collect(),
        );

        let view = render_help(&session.render(), ctx.config);
        // Only a delivered menu gets a session.
        let message_id = ctx.transport.send_message(&message.channel_id, view).await?;
        ctx.sessions.create(message_id, session).await;
        Ok(())
    }
}

/// Formats one listing line: `` `.name` (`.alias`, …) - description ``.
pub fn format_entry(command: &Command, prefix: &str) -> String {
    let mut line = format!("`{prefix}{}`", command.name);
    if !command.aliases.is_empty() {
        let aliases = command
            .aliases
            .iter()
            .map(|alias| format!("`{prefix}{alias}`"))
            .collect::<Vec<_>>()
            .join(", ");
        line.push_str(&format!(" ({aliases})"));
    }
    line.push_str(" - ");
    line.push_str(&command.description);
    line
}

/// Draws a help page with its navigation buttons.
pub fn render_help(render: &RenderResult, config: &Config) -> OutgoingMessage {
    let mut embed = Embed::new()
        .title("Available Commands")
        .description(format!(
            "Here are all the commands you can use with the `{}` prefix:",
            config.prefix
        ))
        .color(255, 255, 255);

    if !render.items.is_empty() {
        embed = embed.field(
            format!("{} ({})", render.category.title(), render.page_label()),
            render.items.join("\n"),
        );
    }

    let embed = embed
        .footer(
            format!(
                "{} • {} general, {} admin commands",
                config.brand.name, render.general_total, render.admin_total
            ),
            &config.brand.icon,
        )
        .thumbnail(&config.brand.icon)
        .truncate();

    OutgoingMessage::embed(embed).with_row(vec![
        Button::new(
            PageAction::Previous.custom_id(),
            "◀ Previous",
            ButtonStyle::Secondary,
        )
        .disabled(!render.previous_enabled()),
        Button::new(
            PageAction::ToggleCategory.custom_id(),
            toggle_label(render.category),
            ButtonStyle::Primary,
        ),
        Button::new(PageAction::Next.custom_id(), "Next ▶", ButtonStyle::Secondary)
            .disabled(!render.next_enabled()),
        Button::new(PageAction::Close.custom_id(), "✖ Close", ButtonStyle::Danger),
    ])
}

/// Names the category the toggle switches to.
fn toggle_label(showing: Category) -> &'static str {
    match showing {
        Category::General => "Admin",
        Category::Admin => "General",
    }
}
