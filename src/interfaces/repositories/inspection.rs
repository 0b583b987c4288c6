use async_trait::async_trait;
use tracing::instrument;

use crate::{
    constants::FIRST_PAGE,
    entities::{
        inspection::{Inspection, InspectionNotesUpdate, InspectionStatus, NewInspection},
        page::{Page, PageQuery, TransformerPageQuery},
    },
    errors::AppError,
    infrastructure::http::client::{segment, ApiClient},
    repositories::{
        http_repo::HttpInspectionRepo,
        resource::{CreateResource, ResourceRepository, Scope},
    },
};

/// Query string of the inspection list endpoint.
pub type InspectionQuery = TransformerPageQuery;

#[async_trait]
pub trait InspectionRepository: Send + Sync {
    async fn list_inspections(&self, query: &InspectionQuery) -> Result<Page<Inspection>, AppError>;
    async fn get_inspection(&self, id: &str) -> Result<Inspection, AppError>;
    async fn create_inspection(&self, inspection: &NewInspection) -> Result<Inspection, AppError>;
    async fn update_inspection(&self, id: &str, inspection: &NewInspection) -> Result<Inspection, AppError>;
    async fn update_inspection_status(&self, id: &str, status: &InspectionStatus) -> Result<Inspection, AppError>;
    async fn update_inspection_notes(&self, id: &str, notes: &str) -> Result<Inspection, AppError>;
    async fn delete_inspection(&self, id: &str) -> Result<(), AppError>;
}

impl HttpInspectionRepo {
    pub fn new(client: ApiClient, page_size: u32) -> Self {
        HttpInspectionRepo { client, page_size }
    }
}

fn not_found_as_inspection(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::NotFound("Inspection not found".to_string()),
        _ => e,
    }
}

#[async_trait]
impl InspectionRepository for HttpInspectionRepo {
    #[instrument(skip(self))]
    async fn list_inspections(&self, query: &InspectionQuery) -> Result<Page<Inspection>, AppError> {
        self.client.get_json_with_query("/api/inspections", query).await
    }

    #[instrument(skip(self))]
    async fn get_inspection(&self, id: &str) -> Result<Inspection, AppError> {
        self.client
            .get_json(&format!("/api/inspections/{}", segment(id)))
            .await
            .map_err(not_found_as_inspection)
    }

    #[instrument(skip(self, inspection), fields(inspection_no = %inspection.inspection_no))]
    async fn create_inspection(&self, inspection: &NewInspection) -> Result<Inspection, AppError> {
        self.client
            .post_json("/api/inspections", inspection)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => AppError::Conflict(format!(
                    "Inspection number {} already exists",
                    inspection.inspection_no
                )),
                _ => e,
            })
    }

    #[instrument(skip(self, inspection))]
    async fn update_inspection(&self, id: &str, inspection: &NewInspection) -> Result<Inspection, AppError> {
        self.client
            .put_json(&format!("/api/inspections/{}", segment(id)), inspection)
            .await
            .map_err(not_found_as_inspection)
    }

    #[instrument(skip(self))]
    async fn update_inspection_status(&self, id: &str, status: &InspectionStatus) -> Result<Inspection, AppError> {
        self.client
            .put_query(
                &format!("/api/inspections/{}/status", segment(id)),
                &[("status", status.wire_value())],
            )
            .await
            .map_err(not_found_as_inspection)
    }

    #[instrument(skip(self, notes))]
    async fn update_inspection_notes(&self, id: &str, notes: &str) -> Result<Inspection, AppError> {
        let body = InspectionNotesUpdate {
            notes: notes.to_string(),
        };
        self.client
            .put_json(&format!("/api/inspections/{}", segment(id)), &body)
            .await
            .map_err(not_found_as_inspection)
    }

    #[instrument(skip(self))]
    async fn delete_inspection(&self, id: &str) -> Result<(), AppError> {
        self.client
            .delete(&format!("/api/inspections/{}", segment(id)))
            .await
            .map_err(not_found_as_inspection)
    }
}

#[async_trait]
impl ResourceRepository for HttpInspectionRepo {
    type Record = Inspection;

    async fn list(&self, scope: &Scope) -> Result<Vec<Inspection>, AppError> {
        Ok(self.list_page(scope, FIRST_PAGE).await?.into_content())
    }

    async fn list_page(&self, scope: &Scope, page: u32) -> Result<Page<Inspection>, AppError> {
        let query = InspectionQuery::new(
            PageQuery::nth(page, self.page_size),
            scope.owner_id().map(str::to_string),
        );
        self.list_inspections(&query).await
    }
}

#[async_trait]
impl CreateResource for HttpInspectionRepo {
    type Payload = NewInspection;

    async fn create(&self, payload: &NewInspection) -> Result<Inspection, AppError> {
        self.create_inspection(payload).await
    }
}
