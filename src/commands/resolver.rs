//! Command resolution and authorization.
//!
//! Lookup order is exact name first, then aliases compared case-insensitively in
//! registration order. Admin-only commands are gated by the allow-list.

use super::registry::{Command, Registry, RegistryKind};
use std::sync::Arc;

/// Case-insensitive string equality (Unicode lowercase folding).
pub fn eq_fold(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

/// Caller ids permitted to run admin-only commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    ids: Vec<String>,
}

impl AllowList {
    /// Creates an allow-list preserving the configured order.
    pub fn new(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true when `caller` matches an entry, ignoring case.
    pub fn permits(&self, caller: &str) -> bool {
        self.ids.iter().any(|id| eq_fold(id, caller))
    }
}

/// Outcome of resolving a token for a caller.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Command found and the caller may run it.
    Authorized(Arc<Command>),
    /// Command found but it is admin-only and the caller is not allow-listed.
    Unauthorized(Arc<Command>),
    /// No command matches the token.
    NotFound,
}

impl Resolution {
    /// Returns whether the caller may run the command.
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized(_))
    }

    /// Returns the matched command, authorized or not.
    pub fn command(&self) -> Option<&Arc<Command>> {
        match self {
            Self::Authorized(cmd) | Self::Unauthorized(cmd) => Some(cmd),
            Self::NotFound => None,
        }
    }

    /// Returns the `(authorized, command)` pair.
    pub fn into_parts(self) -> (bool, Option<Arc<Command>>) {
        match self {
            Self::Authorized(cmd) => (true, Some(cmd)),
            Self::Unauthorized(cmd) => (false, Some(cmd)),
            Self::NotFound => (false, None),
        }
    }
}

/// Decides whether `caller` may run `command`.
pub fn authorize(command: &Command, caller: &str, allow_list: &AllowList) -> bool {
    !command.admin_only || allow_list.permits(caller)
}

impl Registry {
    /// Finds the command for `token` and checks the caller against the allow-list.
    pub async fn resolve(&self, token: &str, caller: &str, allow_list: &AllowList) -> Resolution {
        let Some(command) = self.lookup(token).await else {
            return Resolution::NotFound;
        };

        if authorize(&command, caller, allow_list) {
            Resolution::Authorized(command)
        } else {
            Resolution::Unauthorized(command)
        }
    }

    /// Finds a command by exact name, then by case-insensitive alias.
    ///
    /// Slash registries also accept a case-insensitive name, since platform
    /// command names carry no aliases.
    pub async fn lookup(&self, token: &str) -> Option<Arc<Command>> {
        let inner = self.inner.read().await;

        if let Some(cmd) = inner.by_name.get(token) {
            return Some(Arc::clone(cmd));
        }

        let fold_names = self.kind == RegistryKind::Slash;
        inner
            .ordered
            .iter()
            .find(|cmd| {
                (fold_names && eq_fold(&cmd.name, token))
                    || cmd.aliases.iter().any(|alias| eq_fold(alias, token))
            })
            .cloned()
    }
}
