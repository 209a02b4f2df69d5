//! Help menu sessions driven through the dispatcher.

use super::common::{click, harness, harness_with, message};
use herald::commands::notices::{menu_expired, MENU_CLOSED, MENU_FORBIDDEN};
use herald::commands::{OutgoingMessage, ResponseKind};
use herald::config::Config;
use herald::session::{Category, SESSION_TTL};
use herald::transport::MockTransport;
use pretty_assertions::assert_eq;
use std::time::Duration;

fn page_field(message: &OutgoingMessage) -> String {
    message.embeds[0].fields[0].name.clone()
}

#[tokio::test]
async fn test_help_sends_first_general_page() {
    let h = harness(Config::default()).await;
    h.dispatcher.dispatch(message("u1", ".help")).await;

    let sent = h.transport.sent().await;
    assert_eq!(sent.len(), 1);
    let (message_id, menu) = &sent[0];
    assert_eq!(message_id, "1000");

    let embed = &menu.embeds[0];
    assert_eq!(embed.title.as_deref(), Some("Available Commands"));
    assert_eq!(page_field(menu), "General Commands (Page 1/3)");
    assert_eq!(
        embed.fields[0].value.lines().next(),
        Some("`.help` (`.commands`) - List all commands")
    );
    assert_eq!(
        embed.footer.as_ref().map(|(text, _)| text.as_str()),
        Some("Herald • 29 general, 29 admin commands")
    );
    assert!(h.dispatcher.sessions().contains("1000").await);
}

#[tokio::test]
async fn test_help_alias_opens_menu() {
    let h = harness(Config::default()).await;
    h.dispatcher.dispatch(message("u1", ".COMMANDS")).await;
    assert_eq!(h.dispatcher.sessions().len().await, 1);
}

#[tokio::test]
async fn test_owner_navigates_pages_and_categories() {
    let h = harness(Config::default()).await;
    h.dispatcher.dispatch(message("u1", ".help")).await;

    h.dispatcher.dispatch(click("u1", "1000", "help_next")).await;
    h.dispatcher.dispatch(click("u1", "1000", "help_next")).await;
    h.dispatcher.dispatch(click("u1", "1000", "help_next")).await;
    h.dispatcher.dispatch(click("u1", "1000", "help_toggle")).await;

    let labels: Vec<String> = h
        .transport
        .responses()
        .await
        .iter()
        .map(|r| {
            assert_eq!(r.kind, ResponseKind::UpdateMessage);
            page_field(&r.message)
        })
        .collect();

    assert_eq!(
        labels,
        vec![
            "General Commands (Page 2/3)",
            "General Commands (Page 3/3)",
            "General Commands (Page 3/3)",
            "Admin Commands (Page 1/3)",
        ]
    );

    let last = h.transport.responses().await.pop().unwrap();
    assert!(last.message.button("help_prev").unwrap().disabled);
    assert_eq!(last.message.button("help_toggle").unwrap().label, "General");
}

#[tokio::test]
async fn test_non_owner_is_refused_without_changing_state() {
    let h = harness(Config::default()).await;
    h.dispatcher.dispatch(message("u1", ".help")).await;
    h.dispatcher.dispatch(click("u1", "1000", "help_next")).await;

    h.dispatcher.dispatch(click("u2", "1000", "help_next")).await;
    h.dispatcher.dispatch(click("u2", "1000", "help_close")).await;

    let responses = h.transport.responses().await;
    assert_eq!(responses.len(), 3);
    for refused in &responses[1..] {
        assert_eq!(refused.kind, ResponseKind::Ephemeral);
        assert_eq!(refused.message.content.as_deref(), Some(MENU_FORBIDDEN));
        assert!(refused.message.embeds.is_empty());
    }

    let view = h.dispatcher.sessions().peek("1000").await.unwrap();
    assert_eq!(view.page, 1);
    assert_eq!(view.category, Category::General);
}

#[tokio::test]
async fn test_close_replaces_menu_and_ends_session() {
    let h = harness(Config::default()).await;
    h.dispatcher.dispatch(message("u1", ".help")).await;

    h.dispatcher.dispatch(click("u1", "1000", "help_close")).await;
    h.dispatcher.dispatch(click("u1", "1000", "help_next")).await;

    let responses = h.transport.responses().await;
    assert_eq!(responses[0].kind, ResponseKind::UpdateMessage);
    assert_eq!(responses[0].message, OutgoingMessage::text(MENU_CLOSED));

    assert_eq!(responses[1].kind, ResponseKind::Ephemeral);
    assert_eq!(
        responses[1].message.content.as_deref(),
        Some(menu_expired(".").as_str())
    );
    assert!(h.dispatcher.sessions().is_empty().await);
}

#[tokio::test]
async fn test_click_on_unknown_menu_reports_expired() {
    let h = harness(Config::default()).await;
    h.dispatcher.dispatch(click("u1", "424242", "help_prev")).await;

    let responses = h.transport.responses().await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].kind, ResponseKind::Ephemeral);
}

#[tokio::test(start_paused = true)]
async fn test_menu_expires_after_five_minutes() {
    let h = harness(Config::default()).await;
    h.dispatcher.dispatch(message("u1", ".help")).await;

    tokio::time::sleep(SESSION_TTL - Duration::from_secs(1)).await;
    assert!(h.dispatcher.sessions().contains("1000").await);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(!h.dispatcher.sessions().contains("1000").await);

    h.dispatcher.dispatch(click("u1", "1000", "help_next")).await;
    let responses = h.transport.responses().await;
    assert_eq!(responses[0].kind, ResponseKind::Ephemeral);
    assert_eq!(
        responses[0].message.content.as_deref(),
        Some(menu_expired(".").as_str())
    );
}

#[tokio::test]
async fn test_undelivered_menu_has_no_session() {
    let h = harness_with(MockTransport::new().failing_sends(), Config::default()).await;
    h.dispatcher.dispatch(message("u1", ".help")).await;
    assert!(h.dispatcher.sessions().is_empty().await);
}

#[tokio::test]
async fn test_custom_prefix_in_listing() {
    let config = Config {
        prefix: "!".to_string(),
        ..Config::default()
    };
    let h = harness(config).await;
    h.dispatcher.dispatch(message("u1", "!help")).await;
    h.dispatcher.dispatch(click("u1", "999", "help_next")).await;

    let (_, menu) = &h.transport.sent().await[0];
    assert!(menu.embeds[0].fields[0].value.starts_with("`!help`"));

    let expired = &h.transport.responses().await[0];
    assert!(expired.message.content.as_deref().unwrap().contains("`!help`"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_clicks_apply_one_at_a_time() {
    let h = harness(Config::default()).await;
    h.dispatcher.dispatch(message("u1", ".help")).await;

    let clicks = (0..20).map(|_| {
        let dispatcher = h.dispatcher.clone();
        tokio::spawn(async move { dispatcher.dispatch(click("u1", "1000", "help_next")).await })
    });
    for result in futures::future::join_all(clicks).await {
        result.unwrap();
    }

    assert_eq!(h.transport.responses().await.len(), 20);
    let view = h.dispatcher.sessions().peek("1000").await.unwrap();
    assert_eq!(view.page, 2);
}
