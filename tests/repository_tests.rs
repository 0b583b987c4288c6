
use chrono::{Duration, Utc};
use test_utils::*;

use transformer_inspector::{
    entities::{
        inspection::{InspectionDraft, InspectionStatus, NewInspection},
        page::PageQuery,
        thermal_image::ImageType,
        transformer::{NewTransformer, TransformerDraft, TransformerType},
    },
    errors::AppError,
    settings::AppConfig,
    AppState,
    repositories::{
        inspection::{InspectionQuery, InspectionRepository},
        thermal_image::{ImageQuery, ThermalImageRepository},
        transformer::TransformerRepository,
    },
    repositories::resource::Scope,
    use_cases::{
        resource_view::{LoadOutcome, SubmitOutcome, ViewError},
        thermal_images::latest_pair,
        transformers::TransformerStats,
    },
};

fn inspection_draft(inspection_no: &str, transformer_id: &str) -> InspectionDraft {
    InspectionDraft {
        inspection_no: inspection_no.to_string(),
        transformer_id: transformer_id.to_string(),
        inspected_date: Some(Utc::now()),
        inspected_by: "Inspector Perera".to_string(),
        ..Default::default()
    }
}

#[actix_rt::test]
async fn transformer_scoped_inspections_only_list_that_transformer() {
    let app = TestApp::spawn().await;
    app.seed_inspection("INS-001", "tf-1", InspectionStatus::Pending);
    app.seed_inspection("INS-002", "tf-2", InspectionStatus::Completed);
    app.seed_inspection("INS-003", "tf-1", InspectionStatus::InProgress);

    let scoped = app.state.inspections(Some("tf-1"));
    assert!(matches!(scoped.reload().await, LoadOutcome::Loaded(2)));
    assert!(scoped.items().iter().all(|i| i.transformer_id == "tf-1"));

    let all = app.state.inspections(None);
    assert!(matches!(all.reload().await, LoadOutcome::Loaded(3)));
}

#[actix_rt::test]
async fn new_inspection_starts_pending_and_inherits_scope() {
    let app = TestApp::spawn().await;
    let view = app.state.inspections(Some("tf-9"));

    let outcome = view.submit(inspection_draft("INS-100", "")).await;

    match outcome {
        SubmitOutcome::Created { record, reload } => {
            assert_eq!(record.transformer_id, "tf-9");
            assert_eq!(record.status, InspectionStatus::Pending);
            assert!(matches!(reload, LoadOutcome::Loaded(1)));
        }
        other => panic!("expected Created, got {:?}", other),
    }
    assert_eq!(view.draft(), InspectionDraft::default());
}

#[actix_rt::test]
async fn missing_inspection_date_is_a_field_error() {
    let app = TestApp::spawn().await;
    let view = app.state.inspections(None);

    let draft = InspectionDraft {
        inspected_date: None,
        ..inspection_draft("INS-101", "tf-1")
    };
    let outcome = view.submit(draft).await;

    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
    let error = view.error().expect("validation error");
    assert_eq!(error.field_message("inspected_date"), Some("Please select an inspection date"));
    assert_eq!(app.store().requests, 0);
}

#[actix_rt::test]
async fn duplicate_inspection_number_reports_conflict() {
    let app = TestApp::spawn().await;
    app.seed_inspection("INS-001", "tf-1", InspectionStatus::Pending);
    let view = app.state.inspections(Some("tf-1"));

    let outcome = view.submit(inspection_draft("INS-001", "tf-1")).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(AppError::Conflict(_))));
    assert_eq!(
        view.error(),
        Some(ViewError::Submit("Inspection number INS-001 already exists".to_string()))
    );
    assert_eq!(view.draft().inspection_no, "INS-001");
}

#[actix_rt::test]
async fn status_update_uses_wire_spelling() {
    let app = TestApp::spawn().await;
    let inspection = app.seed_inspection("INS-001", "tf-1", InspectionStatus::Pending);
    let repo = &app.state.repos.inspections;

    let updated = repo
        .update_inspection_status(&inspection.id, &InspectionStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(updated.status, InspectionStatus::InProgress);

    let fetched = repo.get_inspection(&inspection.id).await.unwrap();
    assert_eq!(fetched.status.label(), "In Progress");
}

#[actix_rt::test]
async fn unknown_inspection_is_not_found() {
    let app = TestApp::spawn().await;

    let result = app.state.repos.inspections.get_inspection("nope").await;

    assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Inspection not found"));
}

#[actix_rt::test]
async fn inspection_search_is_paged() {
    let app = TestApp::spawn().await;
    for n in 0..5 {
        app.seed_inspection(&format!("INS-{:03}", n), "tf-1", InspectionStatus::Pending);
    }
    app.seed_inspection("OTHER-1", "tf-1", InspectionStatus::Pending);

    let query = InspectionQuery::new(PageQuery { q: "ins".to_string(), page: 1, size: 2 }, None);
    let page = app.state.repos.inspections.list_inspections(&query).await.unwrap();

    assert_eq!(page.total_elements, 5);
    assert_eq!(page.total_pages, Some(3));
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].inspection_no, "INS-002");
}

#[actix_rt::test]
async fn created_transformer_appears_in_list_and_stats() {
    let app = TestApp::spawn().await;
    app.seed_transformer("AZ-1001", "Nugegoda", TransformerType::Bulk);
    let view = app.state.transformers();
    view.reload().await;

    let draft = TransformerDraft {
        transformer_no: " AZ-2002 ".to_string(),
        pole_no: "EN-122-A".to_string(),
        region: "Maharagama".to_string(),
        ..Default::default()
    };
    let outcome = view.submit(draft).await;
    assert!(outcome.is_created());

    let items = view.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].transformer_no, "AZ-2002");
    assert_eq!(items[1].transformer_type, TransformerType::Distribution);

    let stats = TransformerStats::from_transformers(&items);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.by_region.get("Maharagama"), Some(&1));
    assert_eq!(stats.by_type.get(&TransformerType::Bulk), Some(&1));
}

#[actix_rt::test]
async fn transformer_draft_requires_numbers() {
    let app = TestApp::spawn().await;
    let view = app.state.transformers();

    view.submit(TransformerDraft::default()).await;

    let error = view.error().expect("validation error");
    assert_eq!(error.field_message("pole_no"), Some("Pole number is required"));
    assert_eq!(error.field_message("transformer_no"), Some("Transformer number is required"));
    // sorted by field name, so the banner text is stable
    assert_eq!(error.to_string(), "Pole number is required");
}

#[actix_rt::test]
async fn missing_transformer_maps_to_not_found() {
    let app = TestApp::spawn().await;

    let result = app.state.repos.transformers.get_transformer("tf-unknown").await;

    assert!(matches!(result, Err(AppError::NotFound(msg)) if msg == "Transformer not found"));
}

#[actix_rt::test]
async fn thermal_images_are_scoped_and_paired() {
    let app = TestApp::spawn().await;
    let now = Utc::now();
    app.seed_image("tf-1", ImageType::Baseline, now - Duration::days(30));
    let newest_baseline = app.seed_image("tf-1", ImageType::Baseline, now - Duration::days(2));
    let maintenance = app.seed_image("tf-1", ImageType::Maintenance, now - Duration::hours(3));
    app.seed_image("tf-2", ImageType::Maintenance, now);

    let view = app.state.thermal_images("tf-1");
    assert!(matches!(view.reload().await, LoadOutcome::Loaded(3)));

    let items = view.items();
    let pair = latest_pair(&items);
    assert_eq!(pair.baseline.map(|i| i.id.as_str()), Some(newest_baseline.id.as_str()));
    assert_eq!(pair.maintenance.map(|i| i.id.as_str()), Some(maintenance.id.as_str()));

    let only_maintenance = app
        .state
        .repos
        .thermal_images
        .list_images(&ImageQuery::for_transformer("tf-1", 10).of_type(ImageType::Maintenance))
        .await
        .unwrap();
    assert_eq!(only_maintenance.content.len(), 1);
}

#[actix_rt::test]
async fn unreachable_service_is_a_network_error() {
    let state = transformer_inspector::AppState::new(test_config("http://127.0.0.1:9")).unwrap();

    let view = state.transformers();
    let outcome = view.reload().await;

    assert!(matches!(outcome, LoadOutcome::Failed(AppError::Network(_))));
    assert!(matches!(view.error(), Some(ViewError::Load(msg)) if msg.starts_with("Network error calling")));
}

#[actix_rt::test]
async fn created_inspection_is_sent_with_the_status_endpoint_spelling() {
    let app = TestApp::spawn().await;
    let view = app.state.inspections(Some("tf-1"));

    assert!(view.submit(inspection_draft("INS-200", "")).await.is_created());

    let body = app.last_body("/api/inspections").expect("create body");
    assert_eq!(body["status"], "PENDING");
    assert_eq!(body["transformerId"], "tf-1");
}

#[actix_rt::test]
async fn inspections_can_be_updated_and_deleted() {
    let app = TestApp::spawn().await;
    let inspection = app.seed_inspection("INS-001", "tf-1", InspectionStatus::Pending);
    let repo = &app.state.repos.inspections;

    let update = NewInspection {
        inspection_no: "INS-001A".to_string(),
        transformer_id: "tf-1".to_string(),
        inspected_date: inspection.inspected_date,
        maintenance_date: Some(Utc::now()),
        status: InspectionStatus::Completed,
        inspected_by: "Kamal".to_string(),
        notes: None,
    };
    let updated = repo.update_inspection(&inspection.id, &update).await.unwrap();
    assert_eq!(updated.inspection_no, "INS-001A");
    assert_eq!(updated.status, InspectionStatus::Completed);
    let body = app.last_body(&format!("/api/inspections/{}", inspection.id)).unwrap();
    assert_eq!(body["status"], "COMPLETED");

    repo.delete_inspection(&inspection.id).await.unwrap();
    assert!(app.store().inspections.is_empty());

    let again = repo.delete_inspection(&inspection.id).await;
    assert!(matches!(again, Err(AppError::NotFound(msg)) if msg == "Inspection not found"));
}

#[actix_rt::test]
async fn transformers_can_be_updated_and_deleted() {
    let app = TestApp::spawn().await;
    let transformer = app.seed_transformer("AZ-1001", "Nugegoda", TransformerType::Bulk);
    let repo = &app.state.repos.transformers;

    let update = NewTransformer {
        transformer_no: "AZ-1001".to_string(),
        pole_no: "EN-900".to_string(),
        region: "Kotte".to_string(),
        transformer_type: TransformerType::Distribution,
        location_details: "Behind the market".to_string(),
    };
    let updated = repo.update_transformer(&transformer.id, &update).await.unwrap();
    assert_eq!(updated.region, "Kotte");

    let fetched = repo.get_transformer(&transformer.id).await.unwrap();
    assert_eq!(fetched.pole_no, "EN-900");
    assert_eq!(fetched.transformer_type, TransformerType::Distribution);

    repo.delete_transformer(&transformer.id).await.unwrap();
    let gone = repo.get_transformer(&transformer.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(msg)) if msg == "Transformer not found"));

    let missing = repo.update_transformer(&transformer.id, &update).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[actix_rt::test]
async fn thermal_images_can_be_deleted() {
    let app = TestApp::spawn().await;
    let image = app.seed_image("tf-1", ImageType::Baseline, Utc::now());
    let repo = &app.state.repos.thermal_images;

    repo.delete_image(&image.id).await.unwrap();
    assert!(app.store().images.is_empty());

    let again = repo.delete_image(&image.id).await;
    assert!(matches!(again, Err(AppError::NotFound(msg)) if msg == "Thermal image not found"));
}

#[actix_rt::test]
async fn views_report_totals_beyond_the_loaded_page() {
    let app = TestApp::spawn().await;
    for n in 1..=3 {
        app.seed_transformer(&format!("AZ-{:04}", n), "Kotte", TransformerType::Bulk);
    }
    let state = AppState::new(AppConfig { page_size: 2, ..test_config(&app.address) }).unwrap();
    let view = state.transformers();

    assert!(matches!(view.reload().await, LoadOutcome::Loaded(2)));
    let snapshot = view.snapshot();
    assert_eq!(snapshot.total(), 3);
    assert!(snapshot.is_partial());
    assert_eq!(snapshot.heading(), "Transformers (3)");
    let page = snapshot.page.expect("page info");
    assert_eq!((page.number, page.total_pages), (0, 2));

    assert!(matches!(view.next_page().await, LoadOutcome::Loaded(1)));
    assert_eq!(view.items()[0].transformer_no, "AZ-0003");
    assert_eq!(view.page(), 1);
    assert!(matches!(view.next_page().await, LoadOutcome::Skipped));

    assert!(matches!(view.previous_page().await, LoadOutcome::Loaded(2)));
    assert_eq!(view.items()[0].transformer_no, "AZ-0001");
}

#[actix_rt::test]
async fn switching_scope_starts_from_the_first_page() {
    let app = TestApp::spawn().await;
    for n in 1..=3 {
        app.seed_inspection(&format!("INS-A{}", n), "tf-a", InspectionStatus::Pending);
    }
    app.seed_inspection("INS-B1", "tf-b", InspectionStatus::Pending);
    let state = AppState::new(AppConfig { page_size: 2, ..test_config(&app.address) }).unwrap();
    let view = state.inspections(Some("tf-a"));

    assert!(matches!(view.go_to_page(1).await, LoadOutcome::Loaded(1)));
    assert_eq!(view.page(), 1);

    assert!(matches!(view.load(&Scope::owner("tf-b")).await, LoadOutcome::Loaded(1)));
    assert_eq!(view.page(), 0);
    assert_eq!(view.items()[0].inspection_no, "INS-B1");
    assert_eq!(view.snapshot().total(), 1);
}
