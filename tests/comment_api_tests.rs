
use test_utils::*;

use transformer_inspector::{
    constants::COMMENTS_EMPTY,
    entities::comment::CommentDraft,
    errors::AppError,
    repositories::comment::CommentRepository,
    use_cases::resource_view::{LoadOutcome, SubmitOutcome, ViewError},
};

#[actix_rt::test]
async fn empty_thread_shows_empty_state_not_error() {
    let app = TestApp::spawn().await;
    let view = app.state.comments("insp-1");

    let outcome = view.reload().await;

    assert!(matches!(outcome, LoadOutcome::Loaded(0)));
    let snapshot = view.snapshot();
    assert!(snapshot.error().is_none());
    assert_eq!(snapshot.empty_message(), Some(COMMENTS_EMPTY));
    assert_eq!(snapshot.heading(), "Comments (0)");
}

#[actix_rt::test]
async fn submitted_comment_is_listed_after_reload() {
    let app = TestApp::spawn().await;
    let view = app.state.comments("insp-1");
    view.reload().await;

    let outcome = view.submit(CommentDraft::new("admin", "Checked.")).await;
    assert!(outcome.is_created());

    let items = view.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].author, "admin");
    assert_eq!(items[0].comment_text, "Checked.");
    assert_eq!(items[0].inspection_id, "insp-1");
    assert!(!view.is_submitting());

    // a fresh view sees the same thread
    let other = app.state.comments("insp-1");
    assert!(matches!(other.reload().await, LoadOutcome::Loaded(1)));

    // and other inspections stay untouched
    let unrelated = app.state.comments("insp-2");
    assert!(matches!(unrelated.reload().await, LoadOutcome::Loaded(0)));
}

#[actix_rt::test]
async fn draft_defaults_to_configured_author() {
    let app = TestApp::spawn().await;
    let view = app.state.comments("insp-1");

    assert_eq!(view.draft().author, "admin");
}

#[actix_rt::test]
async fn blank_comment_is_not_sent() {
    let app = TestApp::spawn().await;
    let view = app.state.comments("insp-1");

    let outcome = view.submit(CommentDraft::new("admin", "   ")).await;

    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    assert_eq!(app.store().requests, 0);
    assert_eq!(
        view.error().and_then(|e| e.field_message("comment_text").map(str::to_string)),
        Some("Please enter a comment".to_string())
    );
}

#[actix_rt::test]
async fn server_message_is_shown_and_draft_kept() {
    let app = TestApp::spawn().await;
    let view = app.state.comments("insp-1");
    app.fail_next(500, r#"{"message":"Database unavailable"}"#);

    let outcome = view.submit(CommentDraft::new("admin", "Replace the bushing")).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(AppError::Server { status: 500, .. })));
    assert_eq!(view.error(), Some(ViewError::Submit("Database unavailable".to_string())));
    assert_eq!(view.draft().comment_text, "Replace the bushing");
    assert!(app.store().comments.is_empty());

    // retrying the kept draft succeeds
    assert!(view.submit_draft().await.is_created());
    assert!(view.error().is_none());
    assert_eq!(view.items().len(), 1);
}

#[actix_rt::test]
async fn empty_error_body_falls_back_to_generic_text() {
    let app = TestApp::spawn().await;
    let view = app.state.comments("insp-1");
    app.fail_next(503, "");

    view.reload().await;

    assert_eq!(view.error(), Some(ViewError::Load("Failed to load comments".to_string())));
}

#[actix_rt::test]
async fn plain_text_error_body_is_used_verbatim() {
    let app = TestApp::spawn().await;
    let view = app.state.comments("insp-1");
    app.fail_next(502, "Bad gateway");

    view.reload().await;

    assert_eq!(view.error(), Some(ViewError::Load("Bad gateway".to_string())));
}

#[actix_rt::test]
async fn requests_carry_the_bearer_token() {
    let app = TestApp::spawn().await;
    let view = app.state.comments("insp-1");

    view.reload().await;

    let store = app.store();
    assert_eq!(store.seen_tokens.last(), Some(&Some(TEST_TOKEN.to_string())));
}

#[actix_rt::test]
async fn rejected_token_signs_the_session_out() {
    let app = TestApp::spawn().await;
    app.store().reject_tokens = true;
    assert!(app.state.session.is_authenticated());

    let view = app.state.comments("insp-1");
    let outcome = view.reload().await;

    assert!(matches!(outcome, LoadOutcome::Failed(AppError::UnauthorizedAccess)));
    assert_eq!(
        view.error(),
        Some(ViewError::Load("Session expired. Please log in again.".to_string()))
    );
    assert!(!app.state.session.is_authenticated());

    // later requests go out without a token
    app.store().reject_tokens = false;
    view.reload().await;
    assert_eq!(app.store().seen_tokens.last(), Some(&None));
}

#[actix_rt::test]
async fn count_and_delete_comments() {
    let app = TestApp::spawn().await;
    let view = app.state.comments("insp-1");
    view.submit(CommentDraft::new("admin", "First")).await;
    view.submit(CommentDraft::new("admin", "Second")).await;

    let repo = &app.state.repos.comments;
    assert_eq!(repo.count_comments("insp-1").await.unwrap(), 2);

    let first = view.items()[0].id.clone();
    repo.delete_comment(&first).await.unwrap();
    assert_eq!(repo.count_comments("insp-1").await.unwrap(), 1);

    let missing = repo.delete_comment(&first).await;
    assert!(matches!(missing, Err(AppError::NotFound(msg)) if msg == "Comment not found"));
}
