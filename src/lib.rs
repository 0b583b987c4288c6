use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod shared_repos;

pub use domain::{entities, use_cases};
pub use interfaces::repositories;
pub use infrastructure::{auth, http, utils};

use auth::session::Session;
use errors::AppError;
use http::client::ApiClient;
use entities::{auth::LoginUser, inspection::Inspection};
use repositories::http_repo::{
    HttpAuthRepo, HttpCommentRepo, HttpInspectionRepo, HttpMaintenanceRecordRepo,
    HttpThermalImageRepo, HttpTransformerRepo,
};
use settings::AppConfig;
use shared_repos::SharedRepositories;
use use_cases::{
    auth::AuthHandler,
    comments::{comments_view, CommentsView},
    inspections::{inspections_view, InspectionsView},
    maintenance::{maintenance_records_view, MaintenanceHandler, MaintenanceRecordsView},
    notes::NotesEditor,
    resource_view::ResourceView,
    thermal_images::thermal_images_view,
    transformers::{transformers_view, TransformersView},
};

/// Everything a screen needs to build its views.
pub struct AppState {
    pub config: AppConfig,
    pub session: Arc<Session>,
    pub repos: SharedRepositories,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let session = Arc::new(Session::from_config(&config));
        let client = ApiClient::new(&config, session.clone())?;
        let repos = SharedRepositories::new(client, &config);

        Ok(AppState { config, session, repos })
    }

    pub fn auth(&self) -> AuthHandler<HttpAuthRepo> {
        AuthHandler::new(self.repos.auth.clone(), self.session.clone())
    }

    /// Signs in with the configured credentials, when both are set.
    pub async fn sign_in_from_config(&self) -> Result<bool, AppError> {
        let (Some(email), Some(password)) = (self.config.login_email.as_deref(), self.config.password()) else {
            return Ok(false);
        };
        self.auth().login(LoginUser::new(email, password.as_str())).await?;
        Ok(true)
    }

    /// Comment thread of an inspection, attributed to the signed-in user.
    pub fn comments(&self, inspection_id: &str) -> CommentsView<HttpCommentRepo> {
        comments_view(self.repos.comments.clone(), inspection_id, &self.session.display_name())
    }

    pub fn inspections(&self, transformer_id: Option<&str>) -> InspectionsView<HttpInspectionRepo> {
        inspections_view(self.repos.inspections.clone(), transformer_id)
    }

    pub fn transformers(&self) -> TransformersView<HttpTransformerRepo> {
        transformers_view(self.repos.transformers.clone())
    }

    pub fn thermal_images(&self, transformer_id: &str) -> ResourceView<HttpThermalImageRepo> {
        thermal_images_view(self.repos.thermal_images.clone(), transformer_id)
    }

    pub fn notes(&self, inspection: &Inspection) -> NotesEditor<HttpInspectionRepo> {
        NotesEditor::for_inspection(self.repos.inspections.clone(), inspection)
    }

    /// Maintenance records, new ones attributed to the signed-in user.
    pub fn maintenance_records(&self, transformer_id: Option<&str>) -> MaintenanceRecordsView<HttpMaintenanceRecordRepo> {
        maintenance_records_view(
            self.repos.maintenance_records.clone(),
            transformer_id,
            &self.session.display_name(),
        )
    }

    pub fn maintenance(&self) -> MaintenanceHandler<HttpMaintenanceRecordRepo> {
        MaintenanceHandler::new(self.repos.maintenance_records.clone())
    }
}
