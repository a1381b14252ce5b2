//! Mock authentication flow scenarios.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use midnight_dream_integration_tests::{
    ScriptedGateway, build_app, build_app_with_store, demo_catalog, failing_auth,
};
use midnight_dream_storefront::app::{App, UiEvent};
use midnight_dream_storefront::notify::{Notification, RecordingSink};
use midnight_dream_storefront::storage::{KeyValueStore, MemoryStore};
use midnight_dream_storefront::ui::{AuthTab, ModalKind};

#[tokio::test]
async fn test_login_flow() {
    let gateway = ScriptedGateway::accepting(1);
    let mut ctx = build_app(&gateway);

    // The auth button opens the modal when signed out.
    ctx.app.handle_event(UiEvent::AuthButton).await;
    assert!(ctx.app.ui().is_open(ModalKind::AuthModal));

    ctx.app
        .handle_event(UiEvent::SubmitLogin {
            email: "morticia@example.com".to_owned(),
            password: "hunter2".to_owned(),
        })
        .await;

    assert!(ctx.app.auth().is_authenticated());
    assert_eq!(ctx.app.auth().current_user().unwrap().name, "morticia");
    // Success closes the modal.
    assert_eq!(ctx.app.ui().open(), None);
    // The profile is persisted for the next visit.
    assert!(ctx.store.get("user").unwrap().is_some());
}

#[tokio::test]
async fn test_login_validation_shows_form_error() {
    let gateway = ScriptedGateway::accepting(1);
    let mut ctx = build_app(&gateway);

    ctx.app.handle_event(UiEvent::AuthButton).await;
    ctx.app
        .handle_event(UiEvent::SubmitLogin {
            email: "not-an-email".to_owned(),
            password: "hunter2".to_owned(),
        })
        .await;

    assert!(!ctx.app.auth().is_authenticated());
    assert!(ctx.app.ui().is_open(ModalKind::AuthModal));
    assert!(ctx.app.ui().auth_error().unwrap().contains("invalid email"));

    // Switching tabs clears the displayed error.
    ctx.app
        .handle_event(UiEvent::SwitchAuthTab(AuthTab::Register))
        .await;
    assert_eq!(ctx.app.ui().auth_error(), None);
}

#[tokio::test]
async fn test_register_flow() {
    let gateway = ScriptedGateway::accepting(1);
    let mut ctx = build_app(&gateway);

    ctx.app.handle_event(UiEvent::AuthButton).await;
    ctx.app
        .handle_event(UiEvent::SwitchAuthTab(AuthTab::Register))
        .await;

    // Weak password is rejected with a form error.
    ctx.app
        .handle_event(UiEvent::SubmitRegister {
            name: "Wednesday".to_owned(),
            email: "wednesday@example.com".to_owned(),
            password: "12345".to_owned(),
        })
        .await;
    assert!(!ctx.app.auth().is_authenticated());
    assert_eq!(
        ctx.app.ui().auth_error(),
        Some("password must be at least 6 characters")
    );

    ctx.app
        .handle_event(UiEvent::SubmitRegister {
            name: "Wednesday".to_owned(),
            email: "wednesday@example.com".to_owned(),
            password: "123456".to_owned(),
        })
        .await;
    assert!(ctx.app.auth().is_authenticated());
    assert_eq!(ctx.app.auth().current_user().unwrap().name, "Wednesday");
    assert_eq!(ctx.app.ui().open(), None);
}

#[tokio::test]
async fn test_backend_rejection_shows_form_error() {
    let gateway = ScriptedGateway::accepting(1);
    let store = Arc::new(MemoryStore::new());
    let sink = Arc::new(RecordingSink::new());
    let mut app = App::new(
        demo_catalog(),
        store,
        sink,
        &gateway,
        failing_auth(),
    );

    app.handle_event(UiEvent::AuthButton).await;
    app.handle_event(UiEvent::SubmitLogin {
        email: "morticia@example.com".to_owned(),
        password: "hunter2".to_owned(),
    })
    .await;

    assert!(!app.auth().is_authenticated());
    assert_eq!(app.ui().auth_error(), Some("server error"));
}

#[tokio::test]
async fn test_auth_button_logs_out_when_signed_in() {
    let gateway = ScriptedGateway::accepting(1);
    let mut ctx = build_app(&gateway);

    ctx.app
        .handle_event(UiEvent::SubmitLogin {
            email: "morticia@example.com".to_owned(),
            password: "hunter2".to_owned(),
        })
        .await;
    ctx.sink.clear();

    ctx.app.handle_event(UiEvent::AuthButton).await;

    assert!(!ctx.app.auth().is_authenticated());
    assert!(ctx.store.get("user").unwrap().is_none());
    assert_eq!(
        ctx.sink.received()[0],
        Notification::Success("You have been signed out".to_owned())
    );
}

#[tokio::test]
async fn test_session_survives_application_restart() {
    let gateway = ScriptedGateway::accepting(1);
    let mut ctx = build_app(&gateway);
    let store = ctx.store.clone();

    ctx.app
        .handle_event(UiEvent::SubmitLogin {
            email: "morticia@example.com".to_owned(),
            password: "hunter2".to_owned(),
        })
        .await;
    drop(ctx);

    let restarted = build_app_with_store(&gateway, store);
    assert!(restarted.app.auth().is_authenticated());
    assert_eq!(
        restarted.app.auth().current_user().unwrap().email.as_str(),
        "morticia@example.com"
    );
}

#[tokio::test]
async fn test_corrupt_stored_user_means_signed_out() {
    let store = Arc::new(MemoryStore::new());
    store.set("user", "{not json").unwrap();

    let gateway = ScriptedGateway::accepting(1);
    let ctx = build_app_with_store(&gateway, store.clone());

    assert!(!ctx.app.auth().is_authenticated());
    assert!(store.get("user").unwrap().is_none());
}
