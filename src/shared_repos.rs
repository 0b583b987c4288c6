use crate::{
    constants::IMAGES_PAGE_SIZE,
    http::client::ApiClient,
    repositories::http_repo::{
        HttpAuthRepo, HttpCommentRepo, HttpInspectionRepo, HttpMaintenanceRecordRepo,
        HttpThermalImageRepo, HttpTransformerRepo,
    },
    settings::AppConfig,
};

/// One repository per resource kind, all sharing a single API client.
#[derive(Clone)]
pub struct SharedRepositories {
    pub auth: HttpAuthRepo,
    pub comments: HttpCommentRepo,
    pub inspections: HttpInspectionRepo,
    pub transformers: HttpTransformerRepo,
    pub thermal_images: HttpThermalImageRepo,
    pub maintenance_records: HttpMaintenanceRecordRepo,
}

impl SharedRepositories {
    pub fn new(client: ApiClient, config: &AppConfig) -> Self {
        SharedRepositories {
            auth: HttpAuthRepo::new(client.clone()),
            comments: HttpCommentRepo::new(client.clone()),
            inspections: HttpInspectionRepo::new(client.clone(), config.page_size),
            transformers: HttpTransformerRepo::new(client.clone(), config.page_size),
            thermal_images: HttpThermalImageRepo::new(client.clone(), IMAGES_PAGE_SIZE),
            maintenance_records: HttpMaintenanceRecordRepo::new(client, config.page_size),
        }
    }
}
