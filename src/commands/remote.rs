//! Platform-side mirror of a slash registry.
//!
//! Slash commands only work once the platform knows about them. `publish` pushes
//! the local registry to the platform and remembers the ids it got back;
//! `unload` deletes those registrations again at shutdown.

use super::registry::Registry;
use crate::transport::{RemoteCommandId, Transport};
use tracing::{error, info, warn};

/// A command registered on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    /// Platform id.
    pub id: RemoteCommandId,
    /// Command name.
    pub name: String,
}

/// Outcome of [`Registry::unload`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnloadReport {
    /// Names of registrations that were deleted.
    pub deleted: Vec<String>,
    /// Names of registrations whose deletion failed.
    pub failed: Vec<String>,
}

impl Registry {
    /// Registers every local command on the platform.
    ///
    /// Previous bookkeeping is discarded first so a restart never records the
    /// same command twice. A command the platform rejects is logged and skipped.
    /// Returns the number of successful registrations.
    pub async fn publish(&self, transport: &dyn Transport, guild_id: Option<&str>) -> usize {
        let commands = self.commands().await;
        let mut remote = self.remote.lock().await;
        remote.clear();

        for cmd in commands {
            match transport
                .create_application_command(guild_id, &cmd.name, &cmd.description)
                .await
            {
                Ok(id) => {
                    info!(name = %cmd.name, id = %id, "Registered slash command: {}", cmd.name);
                    remote.push(RemoteCommand {
                        id,
                        name: cmd.name.clone(),
                    });
                }
                Err(e) => {
                    error!(name = %cmd.name, "Cannot create '{}' command: {}", cmd.name, e);
                }
            }
        }

        remote.len()
    }

    /// Deletes every platform registration recorded by [`Registry::publish`].
    ///
    /// A failed deletion is logged and does not stop the rest. Local bookkeeping
    /// is cleared afterwards whatever the individual outcomes were.
    pub async fn unload(&self, transport: &dyn Transport, guild_id: Option<&str>) -> UnloadReport {
        let mut remote = self.remote.lock().await;
        let mut report = UnloadReport::default();

        for entry in remote.iter() {
            match transport.delete_application_command(guild_id, &entry.id).await {
                Ok(()) => {
                    info!(name = %entry.name, id = %entry.id, "Deregistered: {}", entry.name);
                    report.deleted.push(entry.name.clone());
                }
                Err(e) => {
                    warn!(id = %entry.id, "Failed to delete command ID {}: {}", entry.id, e);
                    report.failed.push(entry.name.clone());
                }
            }
        }

        remote.clear();
        report
    }

    /// Returns the platform registrations currently recorded.
    pub async fn remote_commands(&self) -> Vec<RemoteCommand> {
        self.remote.lock().await.clone()
    }
}
