//! Slash `uptime` command.

use super::{CommandContext, InteractionHandler};
use crate::commands::output::{Embed, InteractionResponse, OutgoingMessage};
use crate::error::Result;
use crate::transport::InteractionEvent;
use async_trait::async_trait;
use std::time::{Duration, UNIX_EPOCH};

/// Reports how long the bot has been running.
pub struct UptimeHandler;

#[async_trait]
impl InteractionHandler for UptimeHandler {
    async fn execute(
        &self,
        ctx: &CommandContext<'_>,
        interaction: &InteractionEvent,
    ) -> Result<()> {
        let running_for = ctx.started_at.elapsed().unwrap_or_default();
        let started = ctx
            .started_at
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let brand = &ctx.config.brand;

        let embed = Embed::new()
            .title("Uptime")
            .description(format!(
                "{} has been running since <t:{started}:D> ({})",
                brand.name,
                format_uptime(running_for)
            ))
            .color(255, 255, 255)
            .field("Started", format!("<t:{started}:F>"))
            .field("Duration", format!("<t:{started}:R>"))
            .footer(brand.name.clone(), &brand.icon)
            .truncate();

        ctx.transport
            .respond_interaction(
                &interaction.interaction,
                InteractionResponse::reply(OutgoingMessage::embed(embed)),
            )
            .await
    }
}

/// Formats a running time as "2 Days, 1 Hour and 5 Seconds".
///
/// Zero units are skipped; under one second reads "Just started".
pub fn format_uptime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let units = [
        (total / 86_400, "Day"),
        (total / 3_600 % 24, "Hour"),
        (total / 60 % 60, "Minute"),
        (total % 60, "Second"),
    ];

    let parts: Vec<String> = units
        .iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| {
            if *n == 1 {
                format!("1 {unit}")
            } else {
                format!("{n} {unit}s")
            }
        })
        .collect();

    match parts.split_last() {
        None => "Just started".to_string(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}
