//! Slash commands: dispatch, publishing and shutdown deregistration.

use super::common::{admin_config, harness, harness_with, slash, ADMIN};
use herald::commands::notices::{COMMAND_NOT_FOUND, NOT_PERMITTED};
use herald::commands::ResponseKind;
use herald::config::Config;
use herald::transport::{MockTransport, TransportCall};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_admin_slash_command_denied_ephemerally() {
    let h = harness(admin_config()).await;
    h.dispatcher.dispatch(slash("u1", "test")).await;

    let responses = h.transport.responses().await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].kind, ResponseKind::Ephemeral);
    assert_eq!(responses[0].message.content.as_deref(), Some(NOT_PERMITTED));
}

#[tokio::test]
async fn test_admin_slash_command_runs_for_listed_user() {
    let h = harness(admin_config()).await;
    h.dispatcher.dispatch(slash("abc", "test")).await;

    let responses = h.transport.responses().await;
    assert_eq!(responses[0].kind, ResponseKind::Reply);
    assert_eq!(responses[0].message.embeds[0].title.as_deref(), Some("Pong"));
}

#[tokio::test]
async fn test_uptime_replies_with_running_time() {
    let h = harness(admin_config()).await;
    h.dispatcher.dispatch(slash("u1", "Uptime")).await;

    let responses = h.transport.responses().await;
    assert_eq!(responses[0].kind, ResponseKind::Reply);
    let embed = &responses[0].message.embeds[0];
    assert!(embed
        .description
        .as_deref()
        .unwrap()
        .starts_with("Herald has been running since <t:"));
    assert!(embed.field_starting_with("Started").is_some());
    assert!(embed.field_starting_with("Duration").is_some());
}

#[tokio::test]
async fn test_prefix_only_command_is_not_a_slash_command() {
    let h = harness(admin_config()).await;
    h.dispatcher.dispatch(slash(ADMIN, "help")).await;

    let responses = h.transport.responses().await;
    assert_eq!(responses[0].message.content.as_deref(), Some(COMMAND_NOT_FOUND));
}

#[tokio::test]
async fn test_ready_skips_rejected_registrations() {
    let h = harness_with(MockTransport::new().failing_command("test"), admin_config()).await;
    assert_eq!(h.dispatcher.ready().await, 1);

    let names: Vec<String> = h
        .dispatcher
        .slash_commands()
        .remote_commands()
        .await
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["uptime"]);
}

#[tokio::test]
async fn test_shutdown_unloads_published_commands() {
    let config = Config {
        deregister_commands_after_restart: true,
        ..admin_config()
    };
    let h = harness(config).await;
    h.dispatcher.ready().await;
    let report = h.dispatcher.shutdown().await.unwrap();

    assert_eq!(report.deleted, vec!["test", "uptime"]);
    assert!(report.failed.is_empty());

    let deletions: Vec<String> = h
        .transport
        .calls()
        .await
        .into_iter()
        .filter_map(|call| match call {
            TransportCall::DeleteCommand { command_id } => Some(command_id),
            _ => None,
        })
        .collect();
    assert_eq!(deletions, vec!["cmd-test", "cmd-uptime"]);
}

#[tokio::test]
async fn test_shutdown_reports_failed_deletions() {
    let config = Config {
        deregister_commands_after_restart: true,
        ..admin_config()
    };
    let h = harness_with(MockTransport::new().failing_deletes(), config).await;
    h.dispatcher.ready().await;
    let report = h.dispatcher.shutdown().await.unwrap();

    assert!(report.deleted.is_empty());
    assert_eq!(report.failed, vec!["test", "uptime"]);
    assert!(h
        .dispatcher
        .slash_commands()
        .remote_commands()
        .await
        .is_empty());
}
