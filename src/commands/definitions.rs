//! Declarative command tables.
//!
//! Every built-in command is declared here once. Registries are filled from
//! these tables at startup, in declaration order.

use super::handlers::help::HelpHandler;
use super::handlers::system::{
    CheckConfigHandler, PingHandler, PlaceholderHandler, SlashPingHandler,
};
use super::handlers::uptime::UptimeHandler;
use super::handlers::Handler;
use super::registry::Command;

/// Names the implementation behind a declared command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerRef {
    /// Paginated help menu.
    Help,
    /// Configuration summary.
    CheckConfig,
    /// Text ping.
    Ping,
    /// Fixed "not implemented yet" reply.
    Placeholder,
    /// Slash ping.
    SlashPing,
    /// Slash uptime.
    Uptime,
}

impl HandlerRef {
    /// Instantiates the handler.
    pub fn handler(self) -> Handler {
        match self {
            Self::Help => Handler::message(HelpHandler),
            Self::CheckConfig => Handler::message(CheckConfigHandler),
            Self::Ping => Handler::message(PingHandler),
            Self::Placeholder => Handler::message(PlaceholderHandler),
            Self::SlashPing => Handler::interaction(SlashPingHandler),
            Self::Uptime => Handler::interaction(UptimeHandler),
        }
    }
}

/// Definition of a command.
#[derive(Debug, Clone)]
pub struct CommandDef {
    /// Canonical name (without prefix or leading /).
    pub name: &'static str,
    /// Alternative names for the command.
    pub aliases: &'static [&'static str],
    /// Short description shown in help.
    pub description: &'static str,
    /// Restricts the command to allow-listed callers.
    pub admin_only: bool,
    /// What runs when the command is invoked.
    pub handler: HandlerRef,
}

impl CommandDef {
    /// Builds the registry entry for this declaration.
    pub fn build(&self) -> Command {
        Command::new(
            self.name,
            self.aliases.iter().copied(),
            self.description,
            self.admin_only,
            self.handler.handler(),
        )
    }
}

const fn catalogue(
    name: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
    admin_only: bool,
) -> CommandDef {
    CommandDef {
        name,
        aliases,
        description,
        admin_only,
        handler: HandlerRef::Placeholder,
    }
}

/// Prefix commands, in registration order.
pub static PREFIX_COMMANDS: &[CommandDef] = &[
    CommandDef {
        name: "help",
        aliases: &["commands"],
        description: "List all commands",
        admin_only: false,
        handler: HandlerRef::Help,
    },
    CommandDef {
        name: "config",
        aliases: &["configuration"],
        description: "Check bot configuration",
        admin_only: true,
        handler: HandlerRef::CheckConfig,
    },
    CommandDef {
        name: "ping",
        aliases: &["pingpong"],
        description: "ping pong command",
        admin_only: true,
        handler: HandlerRef::Ping,
    },
    // Catalogue entries without behaviour yet.
    catalogue("avatar", &["av", "pfp"], "Get user's avatar", false),
    catalogue("serverinfo", &["si", "guildinfo"], "Display server information", false),
    catalogue("userinfo", &["ui", "whois"], "Display user information", false),
    catalogue("ban", &["b"], "Ban a user from the server", true),
    catalogue("kick", &["k"], "Kick a user from the server", true),
    catalogue("mute", &["m", "timeout"], "Mute a user in the server", true),
    catalogue("unmute", &["um"], "Unmute a user in the server", true),
    catalogue("warn", &["w"], "Warn a user", true),
    catalogue("purge", &["clear", "clean"], "Delete multiple messages", true),
    catalogue("lock", &["lockdown"], "Lock a channel", true),
    catalogue("unlock", &[], "Unlock a channel", true),
    catalogue("role", &["addrole"], "Add role to user", true),
    catalogue("removerole", &["rr"], "Remove role from user", true),
    catalogue("stats", &["statistics"], "Show bot statistics", false),
    catalogue("weather", &["w"], "Get weather information", false),
    catalogue("translate", &["tr"], "Translate text to another language", false),
    catalogue("joke", &["funny"], "Get a random joke", false),
    catalogue("quote", &["q"], "Get an inspirational quote", false),
    catalogue("fact", &["f"], "Get a random fact", false),
    catalogue("coinflip", &["flip", "coin"], "Flip a coin", false),
    catalogue("dice", &["roll", "d6"], "Roll a dice", false),
    catalogue("8ball", &["eightball"], "Ask the magic 8-ball", false),
    catalogue("calculate", &["calc", "math"], "Perform calculations", false),
    catalogue("base64", &["b64"], "Encode/decode base64", false),
    catalogue("hash", &["md5", "sha1"], "Generate hash of text", false),
    catalogue("qr", &["qrcode"], "Generate QR code", false),
    catalogue("shorten", &["shorturl"], "Shorten a URL", false),
    catalogue("screenshot", &["ss"], "Take website screenshot", false),
    catalogue("color", &["colour", "hex"], "Show color information", false),
    catalogue("reminder", &["remind", "timer"], "Set a reminder", false),
    catalogue("poll", &["vote"], "Create a poll", false),
    catalogue("giveaway", &["ga"], "Start a giveaway", true),
    catalogue("announce", &["announcement"], "Make an announcement", true),
    catalogue("embed", &["em"], "Create custom embed", true),
    catalogue("say", &["echo"], "Make bot say something", true),
    catalogue("react", &["r"], "Add reaction to message", true),
    catalogue("slowmode", &["slow"], "Set channel slowmode", true),
    catalogue("nickname", &["nick"], "Change user nickname", true),
    catalogue("logs", &["log"], "View server logs", true),
    catalogue("backup", &["save"], "Create server backup", true),
    catalogue("restore", &["load"], "Restore server backup", true),
    catalogue("automod", &["am"], "Configure automod settings", true),
    catalogue("filter", &["wordfilter"], "Manage word filters", true),
    catalogue("welcome", &["greeting"], "Configure welcome messages", true),
    catalogue("goodbye", &["farewell"], "Configure goodbye messages", true),
    catalogue("autorole", &["ar"], "Configure auto roles", true),
    catalogue("starboard", &["star"], "Configure starboard", true),
    catalogue("leveling", &["levels", "xp"], "Configure leveling system", true),
    catalogue("economy", &["eco", "money"], "Economy system commands", false),
    catalogue("shop", &["store"], "View the shop", false),
    catalogue("inventory", &["inv", "items"], "View your inventory", false),
    catalogue("balance", &["bal", "coins"], "Check your balance", false),
    catalogue("daily", &["d"], "Claim daily reward", false),
    catalogue("weekly", &["w"], "Claim weekly reward", false),
    catalogue("work", &["job"], "Work to earn money", false),
];

/// Slash commands, in registration order.
pub static SLASH_COMMANDS: &[CommandDef] = &[
    CommandDef {
        name: "test",
        aliases: &[],
        description: "test command",
        admin_only: true,
        handler: HandlerRef::SlashPing,
    },
    CommandDef {
        name: "uptime",
        aliases: &[],
        description: "Show bot uptime",
        admin_only: false,
        handler: HandlerRef::Uptime,
    },
];

/// Finds a declaration by canonical name.
pub fn find_definition<'a>(defs: &'a [CommandDef], name: &str) -> Option<&'a CommandDef> {
    defs.iter().find(|def| def.name == name)
}
