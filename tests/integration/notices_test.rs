//! Prefix command resolution and transient notices.

use super::common::{admin_config, harness, harness_with, message, ADMIN};
use herald::commands::notices::{COMMAND_NOT_FOUND, NOT_AUTHORIZED, TRANSIENT_NOTICE_TTL};
use herald::config::Config;
use herald::transport::{MockTransport, TransportCall};
use pretty_assertions::assert_eq;
use std::time::Duration;

async fn settle() {
    tokio::time::sleep(TRANSIENT_NOTICE_TTL + Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn test_unauthorized_notice_is_deleted_after_five_seconds() {
    let h = harness(admin_config()).await;
    h.dispatcher.dispatch(message("123", ".config")).await;

    let sent = h.transport.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1.content.as_deref(), Some(NOT_AUTHORIZED));
    assert!(h.transport.deleted().await.is_empty());

    tokio::time::sleep(TRANSIENT_NOTICE_TTL - Duration::from_millis(10)).await;
    assert!(h.transport.deleted().await.is_empty());

    settle().await;
    assert_eq!(h.transport.deleted().await, vec![sent[0].0.clone()]);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_command_notice_is_transient() {
    let h = harness(Config::default()).await;
    h.dispatcher.dispatch(message("u1", ".doesnotexist")).await;
    settle().await;

    let calls = h.transport.calls().await;
    assert_eq!(calls.len(), 2);
    match (&calls[0], &calls[1]) {
        (
            TransportCall::Send {
                message_id,
                message,
                ..
            },
            TransportCall::Delete {
                message_id: deleted,
                channel_id,
            },
        ) => {
            assert_eq!(message.content.as_deref(), Some(COMMAND_NOT_FOUND));
            assert_eq!(deleted, message_id);
            assert_eq!(channel_id, "general");
        }
        other => panic!("unexpected calls: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_bare_prefix_is_not_found() {
    let h = harness(Config::default()).await;
    h.dispatcher.dispatch(message("u1", ".")).await;

    let sent = h.transport.sent().await;
    assert_eq!(sent[0].1.content.as_deref(), Some(COMMAND_NOT_FOUND));
}

#[tokio::test(start_paused = true)]
async fn test_failed_notice_delete_is_tolerated() {
    let h = harness_with(MockTransport::new().failing_deletes(), admin_config()).await;
    h.dispatcher.dispatch(message("u1", ".ban someone")).await;
    settle().await;

    assert_eq!(h.transport.sent().await.len(), 1);
    assert!(h.transport.deleted().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_admin_matches_in_any_case() {
    let h = harness(admin_config()).await;
    h.dispatcher.dispatch(message(ADMIN, ".config")).await;
    h.dispatcher.dispatch(message("abc", ".Configuration")).await;
    settle().await;

    let sent = h.transport.sent().await;
    assert_eq!(sent.len(), 2);
    for (_, reply) in &sent {
        assert!(reply.content.is_none());
        assert_eq!(
            reply.embeds[0].title.as_deref(),
            Some("⚙️ Herald Configuration")
        );
    }
    assert!(h.transport.deleted().await.is_empty());
}

#[tokio::test]
async fn test_shared_alias_resolves_to_first_registered() {
    let h = harness(admin_config()).await;
    // `w` is declared by warn (admin), weather and weekly.
    h.dispatcher.dispatch(message("u1", ".w")).await;

    let sent = h.transport.sent().await;
    assert_eq!(sent[0].1.content.as_deref(), Some(NOT_AUTHORIZED));
}

#[tokio::test]
async fn test_own_messages_are_ignored() {
    let h = harness(admin_config()).await;
    h.dispatcher.dispatch(message("bot", ".help")).await;
    h.dispatcher.dispatch(message("bot", ".nothing")).await;
    assert!(h.transport.calls().await.is_empty());
}

#[tokio::test]
async fn test_arguments_do_not_affect_resolution() {
    let h = harness(admin_config()).await;
    h.dispatcher
        .dispatch(message(ADMIN, ".ping \"quoted arg\" more"))
        .await;

    let sent = h.transport.sent().await;
    assert_eq!(sent[0].1.embeds[0].description.as_deref(), Some("Pong!"));
}

#[tokio::test]
async fn test_indented_prefix_is_ignored() {
    let h = harness(admin_config()).await;
    h.dispatcher.dispatch(message("u1", "   .help")).await;
    h.dispatcher.dispatch(message("u1", "\t.nothing")).await;
    assert!(h.transport.calls().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_deletes_pending_notices() {
    let h = harness(Config::default()).await;
    h.dispatcher.dispatch(message("u1", ".one")).await;
    h.dispatcher.dispatch(message("u1", ".two")).await;

    h.dispatcher.shutdown().await;

    let mut sent: Vec<_> = h.transport.sent().await.into_iter().map(|(id, _)| id).collect();
    let mut deleted = h.transport.deleted().await;
    sent.sort();
    deleted.sort();
    assert_eq!(sent.len(), 2);
    assert_eq!(deleted, sent);
}
