//! User-facing notice texts.

use std::time::Duration;

/// How long a transient text-channel notice stays before it is deleted.
pub const TRANSIENT_NOTICE_TTL: Duration = Duration::from_secs(5);

/// Prefix command denied by the allow-list.
pub const NOT_AUTHORIZED: &str = "You are not authorized to use this command";

/// Slash command denied by the allow-list.
pub const NOT_PERMITTED: &str = "You are not permitted to use this command";

/// Nothing matched the typed token.
pub const COMMAND_NOT_FOUND: &str = "Command not found";

/// A non-owner pressed a menu button.
pub const MENU_FORBIDDEN: &str = "❌ Only the user who requested help can use these buttons.";

/// Replacement content of a closed menu.
pub const MENU_CLOSED: &str = "Help menu closed";

/// Reply of catalogue commands that have no behaviour yet.
pub const PLACEHOLDER: &str = "🧪 This is a test command! It doesn't do anything yet.";

/// A menu button was pressed after the menu expired or closed.
pub fn menu_expired(prefix: &str) -> String {
    format!("❌ This help menu has expired. Use `{prefix}help` to get a new one.")
}
