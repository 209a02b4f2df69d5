//! Shared fixtures for dispatcher tests.

use herald::config::Config;
use herald::transport::{
    InboundEvent, InteractionEvent, InteractionKind, InteractionRef, MessageEvent, MockTransport,
};
use herald::Dispatcher;
use std::sync::Arc;

/// User id on the allow-list of [`admin_config`].
pub const ADMIN: &str = "ABC";

/// A dispatcher wired to a recording transport.
pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub dispatcher: Arc<Dispatcher>,
}

pub async fn harness(config: Config) -> Harness {
    harness_with(MockTransport::new(), config).await
}

pub async fn harness_with(transport: MockTransport, config: Config) -> Harness {
    let transport = Arc::new(transport);
    let dispatcher = Dispatcher::new(transport.clone(), config, "bot")
        .await
        .expect("built-in tables have unique names");
    Harness {
        transport,
        dispatcher: Arc::new(dispatcher),
    }
}

/// Both dispatch paths enabled, one allow-listed admin.
pub fn admin_config() -> Config {
    Config {
        authorized_ids: vec![ADMIN.to_string()],
        slash_enabled: true,
        ..Config::default()
    }
}

pub fn message(author: &str, content: &str) -> InboundEvent {
    InboundEvent::Message(MessageEvent {
        id: format!("msg-{author}"),
        channel_id: "general".to_string(),
        author_id: author.to_string(),
        content: content.to_string(),
    })
}

pub fn slash(user: &str, name: &str) -> InboundEvent {
    InboundEvent::Interaction(InteractionEvent {
        interaction: InteractionRef {
            id: format!("slash-{name}"),
            channel_id: "general".to_string(),
            message_id: None,
        },
        user_id: user.to_string(),
        kind: InteractionKind::ApplicationCommand {
            name: name.to_string(),
        },
    })
}

pub fn click(user: &str, message_id: &str, custom_id: &str) -> InboundEvent {
    InboundEvent::Interaction(InteractionEvent {
        interaction: InteractionRef {
            id: format!("click-{custom_id}"),
            channel_id: "general".to_string(),
            message_id: Some(message_id.to_string()),
        },
        user_id: user.to_string(),
        kind: InteractionKind::Component {
            custom_id: custom_id.to_string(),
        },
    })
}
