
use test_utils::*;

use transformer_inspector::{
    constants::NOTES_EMPTY,
    entities::inspection::InspectionStatus,
    use_cases::notes::NotesSave,
};

#[actix_rt::test]
async fn saved_notes_are_trimmed_and_sent_as_notes_only() {
    let app = TestApp::spawn().await;
    let inspection = app.seed_inspection("INS-001", "tf-1", InspectionStatus::Pending);
    let editor = app.state.notes(&inspection);
    assert_eq!(editor.snapshot().display_text(), NOTES_EMPTY);

    editor.begin_edit();
    editor.edit("  Oil leak near the HV bushing  ");
    let outcome = editor.save().await;

    assert!(outcome.is_saved());
    let body = app
        .last_body(&format!("/api/inspections/{}", inspection.id))
        .expect("notes body");
    assert_eq!(body, serde_json::json!({ "notes": "Oil leak near the HV bushing" }));

    let snapshot = editor.snapshot();
    assert!(!snapshot.is_editing);
    assert!(!snapshot.is_saving);
    assert_eq!(snapshot.display_text(), "Oil leak near the HV bushing");
    assert_eq!(
        app.store().inspections[0].notes.as_deref(),
        Some("Oil leak near the HV bushing")
    );
}

#[actix_rt::test]
async fn unchanged_notes_just_close_the_editor() {
    let app = TestApp::spawn().await;
    let inspection = app.seed_inspection("INS-001", "tf-1", InspectionStatus::Pending);
    let editor = app.state.notes(&inspection);

    editor.begin_edit();
    editor.edit("   ");
    let requests = app.store().requests;
    let outcome = editor.save().await;

    assert!(matches!(outcome, NotesSave::Unchanged));
    assert_eq!(app.store().requests, requests);
    assert!(!editor.snapshot().is_editing);
}

#[actix_rt::test]
async fn failed_save_keeps_the_editor_open() {
    let app = TestApp::spawn().await;
    let inspection = app.seed_inspection("INS-001", "tf-1", InspectionStatus::Pending);
    let editor = app.state.notes(&inspection);

    editor.begin_edit();
    editor.edit("Replace silica gel");
    app.fail_next(500, "");
    let outcome = editor.save().await;

    assert!(matches!(outcome, NotesSave::Failed(_)));
    let snapshot = editor.snapshot();
    assert!(snapshot.is_editing);
    assert!(!snapshot.is_saving);
    assert_eq!(snapshot.text, "Replace silica gel");
    assert_eq!(snapshot.error.as_deref(), Some("Failed to save notes"));

    app.fail_next(404, "");
    editor.save().await;
    assert_eq!(editor.snapshot().error.as_deref(), Some("Inspection not found"));
}

#[actix_rt::test]
async fn cancel_restores_the_saved_notes() {
    let app = TestApp::spawn().await;
    let mut inspection = app.seed_inspection("INS-001", "tf-1", InspectionStatus::Pending);
    inspection.notes = Some("Checked earthing".to_string());
    let editor = app.state.notes(&inspection);

    editor.begin_edit();
    editor.edit("Something else");
    editor.cancel();

    let snapshot = editor.snapshot();
    assert!(!snapshot.is_editing);
    assert_eq!(snapshot.text, "Checked earthing");
    assert_eq!(snapshot.display_text(), "Checked earthing");
    assert_eq!(app.store().requests, 0);
}
