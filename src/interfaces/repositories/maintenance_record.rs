use async_trait::async_trait;
use tracing::instrument;

use crate::{
    constants::FIRST_PAGE,
    entities::{
        maintenance_record::{
            CreateMaintenanceRecordRequest, FinalizeMaintenanceRecordRequest, MaintenanceRecord,
            UpdateMaintenanceRecordRequest,
        },
        page::{Page, PageQuery, TransformerPageQuery},
    },
    errors::AppError,
    infrastructure::http::client::{segment, ApiClient},
    repositories::{
        http_repo::HttpMaintenanceRecordRepo,
        resource::{CreateResource, ResourceRepository, Scope},
    },
};

/// Query string of the maintenance-record list endpoint.
pub type MaintenanceRecordQuery = TransformerPageQuery;

#[async_trait]
pub trait MaintenanceRecordRepository: Send + Sync {
    async fn list_records(&self, query: &MaintenanceRecordQuery) -> Result<Page<MaintenanceRecord>, AppError>;
    async fn get_record(&self, id: &str) -> Result<MaintenanceRecord, AppError>;
    async fn get_record_by_inspection(&self, inspection_id: &str) -> Result<MaintenanceRecord, AppError>;
    async fn list_records_by_transformer(&self, transformer_id: &str) -> Result<Vec<MaintenanceRecord>, AppError>;
    async fn create_record(&self, request: &CreateMaintenanceRecordRequest) -> Result<MaintenanceRecord, AppError>;
    async fn update_record(&self, id: &str, request: &UpdateMaintenanceRecordRequest) -> Result<MaintenanceRecord, AppError>;
    async fn finalize_record(&self, id: &str, request: &FinalizeMaintenanceRecordRequest) -> Result<MaintenanceRecord, AppError>;
    async fn delete_record(&self, id: &str) -> Result<(), AppError>;
}

impl HttpMaintenanceRecordRepo {
    pub fn new(client: ApiClient, page_size: u32) -> Self {
        HttpMaintenanceRecordRepo { client, page_size }
    }
}

fn not_found_as_record(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::NotFound("Maintenance record not found".to_string()),
        _ => e,
    }
}

#[async_trait]
impl MaintenanceRecordRepository for HttpMaintenanceRecordRepo {
    #[instrument(skip(self))]
    async fn list_records(&self, query: &MaintenanceRecordQuery) -> Result<Page<MaintenanceRecord>, AppError> {
        self.client.get_json_with_query("/api/maintenance-records", query).await
    }

    #[instrument(skip(self))]
    async fn get_record(&self, id: &str) -> Result<MaintenanceRecord, AppError> {
        self.client
            .get_json(&format!("/api/maintenance-records/{}", segment(id)))
            .await
            .map_err(not_found_as_record)
    }

    #[instrument(skip(self))]
    async fn get_record_by_inspection(&self, inspection_id: &str) -> Result<MaintenanceRecord, AppError> {
        self.client
            .get_json(&format!("/api/maintenance-records/inspection/{}", segment(inspection_id)))
            .await
            .map_err(not_found_as_record)
    }

    #[instrument(skip(self))]
    async fn list_records_by_transformer(&self, transformer_id: &str) -> Result<Vec<MaintenanceRecord>, AppError> {
        self.client
            .get_json(&format!("/api/maintenance-records/transformer/{}", segment(transformer_id)))
            .await
    }

    #[instrument(skip(self, request), fields(inspection_id = %request.inspection_id))]
    async fn create_record(&self, request: &CreateMaintenanceRecordRequest) -> Result<MaintenanceRecord, AppError> {
        self.client
            .post_json("/api/maintenance-records", request)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => AppError::Conflict(
                    "This inspection already has a maintenance record".to_string(),
                ),
                AppError::NotFound(_) => AppError::NotFound("Inspection not found".to_string()),
                _ => e,
            })
    }

    #[instrument(skip(self, request))]
    async fn update_record(&self, id: &str, request: &UpdateMaintenanceRecordRequest) -> Result<MaintenanceRecord, AppError> {
        self.client
            .put_json(&format!("/api/maintenance-records/{}", segment(id)), request)
            .await
            .map_err(not_found_as_record)
    }

    #[instrument(skip(self, request))]
    async fn finalize_record(&self, id: &str, request: &FinalizeMaintenanceRecordRequest) -> Result<MaintenanceRecord, AppError> {
        self.client
            .post_json(&format!("/api/maintenance-records/{}/finalize", segment(id)), request)
            .await
            .map_err(not_found_as_record)
    }

    #[instrument(skip(self))]
    async fn delete_record(&self, id: &str) -> Result<(), AppError> {
        self.client
            .delete(&format!("/api/maintenance-records/{}", segment(id)))
            .await
            .map_err(not_found_as_record)
    }
}

#[async_trait]
impl ResourceRepository for HttpMaintenanceRecordRepo {
    type Record = MaintenanceRecord;

    async fn list(&self, scope: &Scope) -> Result<Vec<MaintenanceRecord>, AppError> {
        Ok(self.list_page(scope, FIRST_PAGE).await?.into_content())
    }

    async fn list_page(&self, scope: &Scope, page: u32) -> Result<Page<MaintenanceRecord>, AppError> {
        let query = MaintenanceRecordQuery::new(
            PageQuery::nth(page, self.page_size),
            scope.owner_id().map(str::to_string),
        );
        self.list_records(&query).await
    }
}

#[async_trait]
impl CreateResource for HttpMaintenanceRecordRepo {
    type Payload = CreateMaintenanceRecordRequest;

    async fn create(&self, payload: &CreateMaintenanceRecordRequest) -> Result<MaintenanceRecord, AppError> {
        self.create_record(payload).await
    }
}
