use validator::Validate;

use crate::{
    constants::MAINTENANCE_SAVE_FAILED,
    entities::maintenance_record::{
        CreateMaintenanceRecordRequest, FinalizeMaintenanceRecordRequest, MaintenanceDetails,
        MaintenanceRecord, MaintenanceRecordDraft, UpdateMaintenanceRecordRequest,
    },
    errors::AppError,
    repositories::{
        maintenance_record::MaintenanceRecordRepository,
        resource::{CreateResource, Scope},
    },
    use_cases::resource_view::{Draft, ResourceKind, ResourceView},
};

pub type MaintenanceRecordsView<R> = ResourceView<R, MaintenanceRecordDraft>;

impl Draft for MaintenanceRecordDraft {
    type Payload = CreateMaintenanceRecordRequest;

    fn to_payload(&self, _scope: &Scope) -> Result<CreateMaintenanceRecordRequest, AppError> {
        self.validate()?;
        Ok(self.clone().into_request())
    }

    /// Clears the inspection; the author stays.
    fn reset(&mut self) {
        self.inspection_id.clear();
    }
}

/// Maintenance records, of one transformer when `transformer_id` is given.
pub fn maintenance_records_view<R>(
    repo: R,
    transformer_id: Option<&str>,
    author: &str,
) -> MaintenanceRecordsView<R>
where
    R: CreateResource<Record = MaintenanceRecord, Payload = CreateMaintenanceRecordRequest>,
{
    let scope = match transformer_id {
        Some(id) => Scope::owner(id),
        None => Scope::All,
    };
    ResourceView::with_draft(
        repo,
        ResourceKind::MaintenanceRecords,
        MaintenanceRecordDraft::for_author(author),
    )
    .scoped(scope)
}

/// Banner text for a failed update, finalize or delete.
pub fn save_failed_message(error: &AppError) -> String {
    error
        .user_message()
        .unwrap_or_else(|| MAINTENANCE_SAVE_FAILED.to_string())
}

/// Edits a single record. Only drafts may change; finalized records are
/// rejected before anything is sent.
pub struct MaintenanceHandler<R>
where
    R: MaintenanceRecordRepository,
{
    pub record_repo: R,
}

impl<R> MaintenanceHandler<R>
where
    R: MaintenanceRecordRepository,
{
    pub fn new(record_repo: R) -> Self {
        MaintenanceHandler { record_repo }
    }

    /// The record of an inspection, created on first use.
    pub async fn open_for_inspection(
        &self,
        inspection_id: &str,
        created_by: &str,
    ) -> Result<MaintenanceRecord, AppError> {
        match self.record_repo.get_record_by_inspection(inspection_id).await {
            Ok(record) => Ok(record),
            Err(AppError::NotFound(_)) => {
                let draft = MaintenanceRecordDraft {
                    inspection_id: inspection_id.to_string(),
                    created_by: created_by.to_string(),
                };
                draft.validate()?;
                let record = self.record_repo.create_record(&draft.into_request()).await?;
                tracing::info!(record_number = %record.record_number, "Maintenance record created");
                Ok(record)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn update(
        &self,
        id: &str,
        details: MaintenanceDetails,
        updated_by: &str,
    ) -> Result<MaintenanceRecord, AppError> {
        let request = UpdateMaintenanceRecordRequest {
            details,
            updated_by: updated_by.trim().to_string(),
        };
        request.validate()?;

        self.record_repo.get_record(id).await?.ensure_editable()?;
        let record = self.record_repo.update_record(id, &request).await?;
        tracing::info!(record_number = %record.record_number, version = record.version, "Maintenance record saved");
        Ok(record)
    }

    pub async fn finalize(&self, id: &str, finalized_by: &str) -> Result<MaintenanceRecord, AppError> {
        let request = FinalizeMaintenanceRecordRequest {
            finalized_by: finalized_by.trim().to_string(),
        };
        request.validate()?;

        self.record_repo.get_record(id).await?.ensure_editable()?;
        let record = self.record_repo.finalize_record(id, &request).await?;
        tracing::info!(record_number = %record.record_number, "Maintenance record finalized");
        Ok(record)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.record_repo.get_record(id).await?.ensure_editable()?;
        self.record_repo.delete_record(id).await?;
        tracing::info!(record_id = %id, "Maintenance record deleted");
        Ok(())
    }
}
