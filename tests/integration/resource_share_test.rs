//! Integration tests for sharing users' messages, files and logins.

mod helpers;

use sharelink_core::error::ErrorKind;
use sharelink_entity::share::ShareRequest;
use sharelink_service::RequestContext;

#[tokio::test]
async fn test_message_share_round_trip() {
    let app = helpers::TestApp::new().await;
    app.create_test_message("m-1", "alice", "see you at noon");

    let link = app
        .message
        .share(&RequestContext::new("alice"), "m-1", ShareRequest::times(1))
        .await
        .unwrap();
    assert!(link.url.starts_with("https://share.example.com/ms/"));

    assert_eq!(
        app.message.read_shared(&link.token).await.unwrap(),
        "see you at noon"
    );
    assert!(app.message.read_shared(&link.token).await.is_err());
}

#[tokio::test]
async fn test_file_share_by_duration() {
    let app = helpers::TestApp::new().await;
    app.create_test_file("f-1", "alice", "report.pdf");

    let link = app
        .file
        .share(&RequestContext::new("alice"), "f-1", ShareRequest::minutes(30))
        .await
        .unwrap();
    assert_eq!(link.max_uses, None);

    for _ in 0..3 {
        let download = app.file.read_shared(&link.token).await.unwrap();
        assert_eq!(download.name, "report.pdf");
        assert_eq!(download.location, "/srv/files/alice/f-1");
    }

    app.files.remove("f-1");
    let err = app.file.read_shared(&link.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_cannot_share_someone_elses_file() {
    let app = helpers::TestApp::new().await;
    app.create_test_file("f-1", "alice", "report.pdf");

    let err = app
        .file
        .share(&RequestContext::new("mallory"), "f-1", ShareRequest::times(5))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
}

#[tokio::test]
async fn test_login_link_signs_in_once() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("u-1", "alice");

    let link = app
        .login
        .create_login_link(&RequestContext::new("u-1"))
        .await
        .unwrap();
    let user = app.login.login_by_link(&link.token).await.unwrap();
    assert_eq!(user.id, "u-1");

    let err = app.login.login_by_link(&link.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidParameter);
}

#[tokio::test]
async fn test_login_token_does_not_open_messages() {
    let app = helpers::TestApp::new().await;
    app.create_test_user("u-1", "alice");
    app.create_test_message("u-1", "u-1", "not for you");

    let link = app
        .login
        .create_login_link(&RequestContext::new("u-1"))
        .await
        .unwrap();
    let err = app.message.read_shared(&link.token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidParameter);
}
