//! Integration tests for issuing and redeeming links through the registry.

mod helpers;

use std::time::Duration;

use chrono::Utc;

use sharelink_core::error::{ErrorKind, INVALID_LINK_MESSAGE};
use sharelink_core::traits::CacheProvider;
use sharelink_entity::share::ShareCategory;
use sharelink_token::public_path;

const MINUTE: Duration = Duration::from_secs(60);

#[tokio::test]
async fn test_issued_url_uses_configured_host() {
    let app = helpers::TestApp::new().await;
    let link = app
        .registry
        .issue(ShareCategory::File, "f-1", MINUTE)
        .await
        .unwrap();

    assert_eq!(link.path, public_path(ShareCategory::File, &link.token));
    assert_eq!(
        link.url,
        format!("https://share.example.com/fs/{}", link.token)
    );
    let lifetime = link.expires_at - Utc::now();
    assert!(lifetime <= chrono::Duration::seconds(60));
    assert!(lifetime > chrono::Duration::seconds(50));
}

#[tokio::test]
async fn test_count_link_is_exhausted_after_max_uses() {
    let app = helpers::TestApp::new().await;
    let link = app
        .registry
        .issue_with_count(ShareCategory::Message, "m-42", MINUTE, 3)
        .await
        .unwrap();

    for _ in 0..3 {
        let value = app
            .registry
            .consume(ShareCategory::Message, &link.token, MINUTE)
            .await
            .unwrap();
        assert_eq!(value, "m-42");
    }

    let err = app
        .registry
        .consume(ShareCategory::Message, &link.token, MINUTE)
        .await
        .unwrap_err();
    assert_eq!(err.public_message(), INVALID_LINK_MESSAGE);
    assert!(
        !app.cache
            .exists(&format!("count-{}", link.token))
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_concurrent_consumers_never_exceed_budget_by_much() {
    let app = helpers::TestApp::new().await;
    let link = app
        .registry
        .issue_with_count(ShareCategory::File, "f-7", MINUTE, 5)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..5 {
        let registry = app.registry.clone();
        let token = link.token.clone();
        handles.push(tokio::spawn(async move {
            registry.consume(ShareCategory::File, &token, MINUTE).await
        }));
    }
    // Exactly the budget runs concurrently, so every one must succeed.
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), "f-7");
    }
    assert!(
        app.registry
            .consume(ShareCategory::File, &link.token, MINUTE)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn test_rejections_are_indistinguishable() {
    let app = helpers::TestApp::new().await;

    let expired = app.codec.mint(Utc::now() - chrono::Duration::hours(1));
    let unknown = app.codec.mint(Utc::now());
    let live = app
        .registry
        .issue(ShareCategory::Message, "m-1", MINUTE)
        .await
        .unwrap();
    let mut tampered = live.token.clone();
    let first = if tampered.starts_with('A') { "B" } else { "A" };
    tampered.replace_range(0..1, first);

    for token in [expired.as_str(), unknown.as_str(), tampered.as_str(), "junk"] {
        let err = app
            .registry
            .consume(ShareCategory::Message, token, MINUTE)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidParameter, "token {token}");
        assert_eq!(err.public_message(), INVALID_LINK_MESSAGE);
    }
}

#[tokio::test]
async fn test_links_expire_with_their_window() {
    let app = helpers::TestApp::new().await;
    let window = Duration::from_millis(300);
    let link = app
        .registry
        .issue(ShareCategory::Message, "m-1", window)
        .await
        .unwrap();

    assert!(
        app.registry
            .consume(ShareCategory::Message, &link.token, window)
            .await
            .is_ok()
    );
    tokio::time::sleep(Duration::from_millis(400)).await;
    let err = app
        .registry
        .consume(ShareCategory::Message, &link.token, window)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidParameter);
}

#[tokio::test]
async fn test_login_links_cannot_be_count_bound() {
    let app = helpers::TestApp::new().await;
    let err = app
        .registry
        .issue_with_count(ShareCategory::Login, "u-1", MINUTE, 1)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidParameter);
}

#[tokio::test]
async fn test_burst_of_mixed_links_keeps_policies_apart() {
    let app = helpers::TestApp::new().await;
    let mut tokens = std::collections::HashSet::new();
    let mut files = Vec::new();
    let mut messages = Vec::new();
    for i in 0..25 {
        let file = app
            .registry
            .issue(ShareCategory::File, &format!("f-{i}"), MINUTE)
            .await
            .unwrap();
        let message = app
            .registry
            .issue_with_count(ShareCategory::Message, &format!("m-{i}"), MINUTE, 1)
            .await
            .unwrap();
        assert!(tokens.insert(file.token.clone()));
        assert!(tokens.insert(message.token.clone()));
        files.push(file);
        messages.push(message);
    }

    for file in &files {
        for _ in 0..2 {
            assert!(
                app.registry
                    .consume(ShareCategory::File, &file.token, MINUTE)
                    .await
                    .is_ok()
            );
        }
    }
    for message in &messages {
        assert!(
            app.registry
                .consume(ShareCategory::Message, &message.token, MINUTE)
                .await
                .is_ok()
        );
        assert!(
            app.registry
                .consume(ShareCategory::Message, &message.token, MINUTE)
                .await
                .is_err()
        );
    }
}
