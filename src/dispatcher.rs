//! Event dispatcher for Herald.
//!
//! Routes every inbound platform event to the right place: prefix messages and
//! slash interactions to their registries, button clicks to the session
//! manager. The dispatcher is the only component that produces user-visible
//! notices; handlers produce everything else.

use std::sync::Arc;
use std::time::SystemTime;

use crate::commands::definitions::{PREFIX_COMMANDS, SLASH_COMMANDS};
use crate::commands::handlers::help::render_help;
use crate::commands::handlers::{CommandContext, Handler};
use crate::commands::notices::{
    menu_expired, COMMAND_NOT_FOUND, MENU_CLOSED, MENU_FORBIDDEN, NOT_AUTHORIZED, NOT_PERMITTED,
    TRANSIENT_NOTICE_TTL,
};
use crate::commands::output::{InteractionResponse, OutgoingMessage};
use crate::commands::registry::{Command, Registry, RegistryKind};
use crate::commands::remote::UnloadReport;
use crate::commands::resolver::{AllowList, Resolution};
use crate::commands::tokenizer::parse_invocation;
use crate::config::{CommandMode, Config};
use crate::error::Result;
use crate::session::{ActionOutcome, PageAction, SessionError, SessionManager, CUSTOM_ID_PREFIX};
use crate::transport::{
    InboundEvent, InteractionEvent, InteractionKind, InteractionRef, MessageEvent, Transport,
};
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Routes inbound events to commands and sessions.
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    config: Config,
    allow_list: AllowList,
    prefix_commands: Registry,
    slash_commands: Registry,
    sessions: SessionManager,
    bot_user_id: String,
    started_at: SystemTime,
    /// Pending deletions of transient notices.
    notice_cleanup: TaskTracker,
}

impl Dispatcher {
    /// Creates a dispatcher with the built-in command tables.
    ///
    /// Fails with [`BotError::DuplicateCommand`](crate::error::BotError) when a
    /// table declares the same name twice.
    pub async fn new(
        transport: Arc<dyn Transport>,
        config: Config,
        bot_user_id: impl Into<String>,
    ) -> Result<Self> {
        let prefix_commands = Registry::from_definitions(RegistryKind::Prefix, PREFIX_COMMANDS).await?;
        let slash_commands = Registry::from_definitions(RegistryKind::Slash, SLASH_COMMANDS).await?;
        Ok(Self::from_parts(
            transport,
            config,
            bot_user_id,
            prefix_commands,
            slash_commands,
            SessionManager::new(),
        ))
    }

    /// Creates a dispatcher from already built parts.
    pub fn from_parts(
        transport: Arc<dyn Transport>,
        config: Config,
        bot_user_id: impl Into<String>,
        prefix_commands: Registry,
        slash_commands: Registry,
        sessions: SessionManager,
    ) -> Self {
        let allow_list = AllowList::new(config.authorized_ids.iter().cloned());
        Self {
            transport,
            config,
            allow_list,
            prefix_commands,
            slash_commands,
            sessions,
            bot_user_id: bot_user_id.into(),
            started_at: SystemTime::now(),
            notice_cleanup: TaskTracker::new(),
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the prefix command registry.
    pub fn prefix_commands(&self) -> &Registry {
        &self.prefix_commands
    }

    /// Returns the slash command registry.
    pub fn slash_commands(&self) -> &Registry {
        &self.slash_commands
    }

    /// Returns the live menu sessions.
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    fn context(&self) -> CommandContext<'_> {
        CommandContext {
            transport: self.transport.as_ref(),
            config: &self.config,
            prefix_commands: &self.prefix_commands,
            sessions: &self.sessions,
            started_at: self.started_at,
        }
    }

    /// Logs the ready banner and publishes slash commands when enabled.
    ///
    /// Returns the number of slash commands registered on the platform.
    pub async fn ready(&self) -> usize {
        let mode = self.config.mode();
        info!(
            brand = %self.config.brand.name,
            bot = %self.bot_user_id,
            mode = mode.label(),
            "{} is ready. Mode: {}",
            self.config.brand.name,
            mode.label()
        );

        match mode {
            CommandMode::Disabled => {
                warn!("Prefix and slash commands are both disabled; no command will run");
                0
            }
            CommandMode::Prefix => 0,
            CommandMode::Slash | CommandMode::PrefixAndSlash => {
                self.slash_commands
                    .publish(self.transport.as_ref(), self.config.guild())
                    .await
            }
        }
    }

    /// Drops every live menu, waits for pending notice deletions and, when
    /// configured, removes the slash commands from the platform.
    pub async fn shutdown(&self) -> Option<UnloadReport> {
        self.sessions.clear().await;

        self.notice_cleanup.close();
        if !self.notice_cleanup.is_empty() {
            debug!(pending = self.notice_cleanup.len(), "Waiting for notice cleanup");
        }
        self.notice_cleanup.wait().await;

        if !(self.config.slash_enabled && self.config.deregister_commands_after_restart) {
            return None;
        }

        warn!("Removing slash commands before exit");
        let report = self
            .slash_commands
            .unload(self.transport.as_ref(), self.config.guild())
            .await;
        info!(
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            "Slash commands removed"
        );
        Some(report)
    }

    /// Handles one inbound event.
    ///
    /// Never fails: every problem is either answered with a notice or logged.
    pub async fn dispatch(&self, event: InboundEvent) {
        match event {
            InboundEvent::Message(message) => self.on_message(&message).await,
            InboundEvent::Interaction(interaction) => self.on_interaction(&interaction).await,
        }
    }

    async fn on_message(&self, message: &MessageEvent) {
        if message.author_id == self.bot_user_id || !self.config.prefix_enabled {
            return;
        }
        let Some(invocation) = parse_invocation(&message.content, &self.config.prefix) else {
            return;
        };

        let resolution = self
            .prefix_commands
            .resolve(&invocation.token, &message.author_id, &self.allow_list)
            .await;

        match resolution {
            Resolution::Authorized(command) => {
                debug!(command = %command.name, user = %message.author_id, "Running prefix command");
                self.run_message_command(&command, message, &invocation.args)
                    .await;
            }
            Resolution::Unauthorized(command) => {
                debug!(command = %command.name, user = %message.author_id, "Prefix command denied");
                self.transient_notice(&message.channel_id, NOT_AUTHORIZED).await;
            }
            Resolution::NotFound => {
                debug!(token = %invocation.token, "Unknown prefix command");
                self.transient_notice(&message.channel_id, COMMAND_NOT_FOUND)
                    .await;
            }
        }
    }

    async fn run_message_command(&self, command: &Command, message: &MessageEvent, args: &[String]) {
        let Handler::Message(handler) = &command.handler else {
            warn!(command = %command.name, "Command cannot run from a text message");
            return;
        };
        if let Err(e) = handler.execute(&self.context(), message, args).await {
            warn!(command = %command.name, "{}: {}", e.category(), e);
        }
    }

    /// Sends a notice and deletes it once [`TRANSIENT_NOTICE_TTL`] has passed.
    async fn transient_notice(&self, channel_id: &str, text: &str) {
        let message_id = match self
            .transport
            .send_message(channel_id, OutgoingMessage::text(text))
            .await
        {
            Ok(id) => id,
            Err(e) => {
                warn!(channel = %channel_id, "Failed to send notice: {}", e);
                return;
            }
        };

        let transport = Arc::clone(&self.transport);
        let channel_id = channel_id.to_string();
        self.notice_cleanup.spawn(async move {
            tokio::time::sleep(TRANSIENT_NOTICE_TTL).await;
            if let Err(e) = transport.delete_message(&channel_id, &message_id).await {
                debug!(message_id = %message_id, "Notice already gone: {}", e);
            }
        });
    }

    async fn on_interaction(&self, interaction: &InteractionEvent) {
        match &interaction.kind {
            InteractionKind::ApplicationCommand { name } => {
                self.on_application_command(interaction, name).await;
            }
            InteractionKind::Component { custom_id } => {
                self.on_component(interaction, custom_id).await;
            }
        }
    }

    async fn on_application_command(&self, interaction: &InteractionEvent, name: &str) {
        if !self.config.slash_enabled {
            debug!(command = %name, "Slash commands disabled; ignoring");
            return;
        }

        let resolution = self
            .slash_commands
            .resolve(name, &interaction.user_id, &self.allow_list)
            .await;

        match resolution {
            Resolution::Authorized(command) => {
                debug!(command = %command.name, user = %interaction.user_id, "Running slash command");
                let Handler::Interaction(handler) = &command.handler else {
                    warn!(command = %command.name, "Command cannot run from an interaction");
                    return;
                };
                if let Err(e) = handler.execute(&self.context(), interaction).await {
                    warn!(command = %command.name, "{}: {}", e.category(), e);
                }
            }
            Resolution::Unauthorized(command) => {
                debug!(command = %command.name, user = %interaction.user_id, "Slash command denied");
                self.respond(&interaction.interaction, InteractionResponse::ephemeral(NOT_PERMITTED))
                    .await;
            }
            Resolution::NotFound => {
                self.respond(
                    &interaction.interaction,
                    InteractionResponse::ephemeral(COMMAND_NOT_FOUND),
                )
                .await;
            }
        }
    }

    async fn on_component(&self, interaction: &InteractionEvent, custom_id: &str) {
        if !custom_id.starts_with(CUSTOM_ID_PREFIX) {
            return;
        }
        let Some(action) = PageAction::from_custom_id(custom_id) else {
            debug!(custom_id = %custom_id, "Unknown menu control");
            return;
        };

        let outcome = match &interaction.interaction.message_id {
            Some(message_id) => {
                self.sessions
                    .handle_action(message_id, &interaction.user_id, action)
                    .await
            }
            None => Err(SessionError::Expired),
        };

        let response = match outcome {
            Ok(ActionOutcome::Render(render)) => {
                InteractionResponse::update(render_help(&render, &self.config))
            }
            Ok(ActionOutcome::Closed) => {
                InteractionResponse::update(OutgoingMessage::text(MENU_CLOSED))
            }
            Err(SessionError::Expired) => {
                InteractionResponse::ephemeral(menu_expired(&self.config.prefix))
            }
            Err(SessionError::Forbidden) => InteractionResponse::ephemeral(MENU_FORBIDDEN),
        };
        self.respond(&interaction.interaction, response).await;
    }

    async fn respond(&self, interaction: &InteractionRef, response: InteractionResponse) {
        if let Err(e) = self.transport.respond_interaction(interaction, response).await {
            warn!(interaction = %interaction.id, "Failed to respond to interaction: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::output::ResponseKind;
    use crate::transport::{MockTransport, TransportCall};

    async fn dispatcher_with(config: Config) -> (Arc<MockTransport>, Dispatcher) {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = Dispatcher::new(transport.clone(), config, "bot")
            .await
            .unwrap();
        (transport, dispatcher)
    }

    fn message(author: &str, content: &str) -> InboundEvent {
        InboundEvent::Message(MessageEvent {
            id: "m-1".to_string(),
            channel_id: "general".to_string(),
            author_id: author.to_string(),
            content: content.to_string(),
        })
    }

    fn slash(user: &str, name: &str) -> InboundEvent {
        InboundEvent::Interaction(InteractionEvent {
            interaction: InteractionRef {
                id: "i-1".to_string(),
                channel_id: "general".to_string(),
                message_id: None,
            },
            user_id: user.to_string(),
            kind: InteractionKind::ApplicationCommand {
                name: name.to_string(),
            },
        })
    }

    #[tokio::test]
    async fn test_bot_ignores_itself() {
        let (transport, dispatcher) = dispatcher_with(Config::default()).await;
        dispatcher.dispatch(message("bot", ".ping")).await;
        assert!(transport.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_non_prefixed_text_is_ignored() {
        let (transport, dispatcher) = dispatcher_with(Config::default()).await;
        dispatcher.dispatch(message("u1", "hello there")).await;
        assert!(transport.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_prefix_disabled_ignores_commands() {
        let config = Config {
            prefix_enabled: false,
            ..Config::default()
        };
        let (transport, dispatcher) = dispatcher_with(config).await;
        dispatcher.dispatch(message("u1", ".help")).await;
        assert!(transport.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_placeholder_command_runs() {
        let (transport, dispatcher) = dispatcher_with(Config::default()).await;
        dispatcher.dispatch(message("u1", ".FLIP heads")).await;

        let sent = transport.sent().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].1.content.as_deref().unwrap().contains("test command"));
    }

    #[tokio::test]
    async fn test_slash_disabled_ignores_interactions() {
        let (transport, dispatcher) = dispatcher_with(Config::default()).await;
        dispatcher.dispatch(slash("u1", "uptime")).await;
        assert!(transport.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_slash_command_is_ephemeral() {
        let config = Config {
            slash_enabled: true,
            ..Config::default()
        };
        let (transport, dispatcher) = dispatcher_with(config).await;
        dispatcher.dispatch(slash("u1", "nope")).await;

        let responses = transport.responses().await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].kind, ResponseKind::Ephemeral);
        assert_eq!(responses[0].message.content.as_deref(), Some(COMMAND_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_foreign_component_is_ignored() {
        let (transport, dispatcher) = dispatcher_with(Config::default()).await;
        let click = InboundEvent::Interaction(InteractionEvent {
            interaction: InteractionRef {
                id: "i-2".to_string(),
                channel_id: "general".to_string(),
                message_id: Some("1000".to_string()),
            },
            user_id: "u1".to_string(),
            kind: InteractionKind::Component {
                custom_id: "poll_yes".to_string(),
            },
        });
        dispatcher.dispatch(click).await;
        assert!(transport.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_ready_publishes_only_with_slash() {
        let (transport, dispatcher) = dispatcher_with(Config::default()).await;
        assert_eq!(dispatcher.ready().await, 0);
        assert!(transport.calls().await.is_empty());

        let config = Config {
            slash_enabled: true,
            ..Config::default()
        };
        let (transport, dispatcher) = dispatcher_with(config).await;
        assert_eq!(dispatcher.ready().await, 2);
        assert!(matches!(
            transport.calls().await[0],
            TransportCall::CreateCommand { .. }
        ));
    }

    #[tokio::test]
    async fn test_shutdown_deregisters_when_configured() {
        let config = Config {
            slash_enabled: true,
            deregister_commands_after_restart: true,
            ..Config::default()
        };
        let (_transport, dispatcher) = dispatcher_with(config).await;
        dispatcher.ready().await;

        let report = dispatcher.shutdown().await.unwrap();
        assert_eq!(report.deleted, vec!["test", "uptime"]);
        assert!(dispatcher.slash_commands().remote_commands().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_waits_for_notice_deletion() {
        let (transport, dispatcher) = dispatcher_with(Config::default()).await;
        dispatcher.dispatch(message("u1", ".nope")).await;
        assert!(transport.deleted().await.is_empty());

        dispatcher.shutdown().await;

        let sent = transport.sent().await;
        assert_eq!(transport.deleted().await, vec![sent[0].0.clone()]);
    }

    #[tokio::test]
    async fn test_shutdown_keeps_commands_by_default() {
        let config = Config {
            slash_enabled: true,
            ..Config::default()
        };
        let (_transport, dispatcher) = dispatcher_with(config).await;
        dispatcher.ready().await;

        assert!(dispatcher.shutdown().await.is_none());
        assert_eq!(dispatcher.slash_commands().remote_commands().await.len(), 2);
    }
}
