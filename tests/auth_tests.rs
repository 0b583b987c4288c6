
use test_utils::*;

use transformer_inspector::{
    auth::session::SessionUser,
    entities::{auth::LoginUser, comment::CommentDraft},
    errors::AppError,
    settings::AppConfig,
    AppState,
};

#[actix_rt::test]
async fn signed_in_user_becomes_the_comment_author() {
    let app = TestApp::spawn().await;
    assert_eq!(app.state.comments("insp-1").draft().author, "admin");

    app.state.session.sign_in(
        "user-token",
        SessionUser {
            id: "u-1".to_string(),
            email: "nimal@example.com".to_string(),
            name: "Nimal Perera".to_string(),
        },
    );

    let view = app.state.comments("insp-1");
    assert_eq!(view.draft().author, "Nimal Perera");
    assert!(view.submit(CommentDraft::new(view.draft().author, "Checked.")).await.is_created());
    assert_eq!(app.store().comments[0].author, "Nimal Perera");
    assert_eq!(
        app.store().seen_tokens.last().cloned().flatten().as_deref(),
        Some("user-token")
    );
}

#[actix_rt::test]
async fn blank_user_name_falls_back_to_the_default_author() {
    let app = TestApp::spawn().await;
    app.state.session.sign_in(
        "user-token",
        SessionUser {
            id: "u-2".to_string(),
            email: "ops@example.com".to_string(),
            name: "  ".to_string(),
        },
    );

    assert_eq!(app.state.session.display_name(), "admin");
}

#[actix_rt::test]
async fn login_signs_the_session_in() {
    let app = TestApp::spawn().await;
    let account = app.seed_account("kamal@example.com", "s3cret-pass", "Kamal Silva");

    let user = app
        .state
        .auth()
        .login(LoginUser::new(" kamal@example.com ", "s3cret-pass"))
        .await
        .unwrap();

    assert_eq!(user, account);
    assert!(app.state.session.is_authenticated());
    assert_eq!(app.state.session.user(), Some(account.clone()));
    assert_eq!(app.state.comments("insp-1").draft().author, "Kamal Silva");

    app.state.comments("insp-1").reload().await;
    let expected = format!("session-{}", account.id);
    assert_eq!(
        app.store().seen_tokens.last().cloned().flatten(),
        Some(expected)
    );
}

#[actix_rt::test]
async fn wrong_password_is_reported_as_bad_credentials() {
    let app = TestApp::spawn().await;
    app.seed_account("kamal@example.com", "s3cret-pass", "Kamal Silva");

    let result = app
        .state
        .auth()
        .login(LoginUser::new("kamal@example.com", "guess"))
        .await;

    assert!(matches!(result, Err(AppError::WrongCredentials)));
    assert_eq!(
        result.unwrap_err().user_message().as_deref(),
        Some("Invalid email or password")
    );
    assert_eq!(app.state.session.user(), None);
}

#[actix_rt::test]
async fn malformed_credentials_are_not_sent() {
    let app = TestApp::spawn().await;

    let result = app.state.auth().login(LoginUser::new("not-an-email", "")).await;

    let error = result.unwrap_err();
    assert!(error.is_validation());
    let fields: Vec<&str> = error.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["email", "password"]);
    assert_eq!(app.store().requests, 0);
}

#[actix_rt::test]
async fn configured_credentials_sign_in_at_startup() {
    let app = TestApp::spawn().await;
    app.seed_account("ops@example.com", "pw-123456", "Ops Desk");

    let config = AppConfig {
        api_token: None,
        login_email: Some("ops@example.com".to_string()),
        login_password: Some("pw-123456".to_string()),
        ..test_config(&app.address)
    };
    let state = AppState::new(config).unwrap();

    assert!(state.sign_in_from_config().await.unwrap());
    assert_eq!(state.session.display_name(), "Ops Desk");

    let anonymous = AppState::new(test_config(&app.address)).unwrap();
    assert!(!anonymous.sign_in_from_config().await.unwrap());
}
