//! Command registry.
//!
//! Holds the commands of one dispatch path keyed by their canonical name. The
//! registry is filled at startup and only read afterwards; a duplicate name is a
//! fatal configuration error.

use super::definitions::CommandDef;
use super::handlers::Handler;
use super::remote::RemoteCommand;
use crate::error::{BotError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{error, info};

/// Which dispatch path a registry serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryKind {
    /// Text commands introduced by the configured prefix.
    Prefix,
    /// Platform application (slash) commands.
    Slash,
}

impl RegistryKind {
    /// Returns the label used in log events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::Slash => "slash",
        }
    }
}

/// A registered command.
#[derive(Debug, Clone)]
pub struct Command {
    /// Canonical, case-sensitive name.
    pub name: String,
    /// Alternative names, matched case-insensitively.
    pub aliases: Vec<String>,
    /// Short description shown in help.
    pub description: String,
    /// Restricts the command to allow-listed callers.
    pub admin_only: bool,
    /// What runs when the command is invoked.
    pub handler: Handler,
}

impl Command {
    /// Creates a command.
    pub fn new(
        name: impl Into<String>,
        aliases: impl IntoIterator<Item = impl Into<String>>,
        description: impl Into<String>,
        admin_only: bool,
        handler: Handler,
    ) -> Self {
        Self {
            name: name.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
            description: description.into(),
            admin_only,
            handler,
        }
    }
}

#[derive(Default)]
pub(super) struct RegistryInner {
    pub(super) by_name: HashMap<String, Arc<Command>>,
    /// Registration order; alias lookup scans this.
    pub(super) ordered: Vec<Arc<Command>>,
}

/// Name → command mapping for one dispatch path.
pub struct Registry {
    pub(super) kind: RegistryKind,
    pub(super) inner: RwLock<RegistryInner>,
    /// Platform-side registrations made by [`Registry::publish`].
    pub(super) remote: Mutex<Vec<RemoteCommand>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            inner: RwLock::new(RegistryInner::default()),
            remote: Mutex::new(Vec::new()),
        }
    }

    /// Creates a registry from a declaration table.
    pub async fn from_definitions(kind: RegistryKind, defs: &[CommandDef]) -> Result<Self> {
        let registry = Self::new(kind);
        registry.load(defs).await?;
        Ok(registry)
    }

    /// Returns the dispatch path this registry serves.
    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Registers every declaration in order.
    ///
    /// Stops at the first duplicate name; the caller is expected to treat that
    /// as fatal.
    pub async fn load(&self, defs: &[CommandDef]) -> Result<usize> {
        for def in defs {
            self.register(def.build()).await?;
        }
        Ok(defs.len())
    }

    /// Adds a command under its canonical name.
    ///
    /// Returns [`BotError::DuplicateCommand`] and leaves the registry untouched
    /// when the name is already taken.
    pub async fn register(&self, command: Command) -> Result<()> {
        let mut inner = self.inner.write().await;

        if let Some(existing) = inner.by_name.get(&command.name) {
            error!(
                kind = self.kind.label(),
                name = %command.name,
                existing = ?existing,
                new = ?command,
                "Conflicting command names"
            );
            return Err(BotError::duplicate_command(&command.name));
        }

        info!(
            kind = self.kind.label(),
            name = %command.name,
            aliases = ?command.aliases,
            admin_only = command.admin_only,
            "Registered {} command: {}",
            self.kind.label(),
            command.name
        );

        let command = Arc::new(command);
        inner
            .by_name
            .insert(command.name.clone(), Arc::clone(&command));
        inner.ordered.push(command);
        Ok(())
    }

    /// Returns the command registered under exactly `name`.
    pub async fn get(&self, name: &str) -> Option<Arc<Command>> {
        self.inner.read().await.by_name.get(name).cloned()
    }

    /// Returns all commands in registration order.
    pub async fn commands(&self) -> Vec<Arc<Command>> {
        self.inner.read().await.ordered.clone()
    }

    /// Returns the number of registered commands.
    pub async fn len(&self) -> usize {
        self.inner.read().await.ordered.len()
    }

    /// Returns true if nothing is registered.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
