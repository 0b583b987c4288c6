use async_trait::async_trait;
use serde::Serialize;
use tracing::instrument;

use crate::{
    constants::FIRST_PAGE,
    entities::{
        page::Page,
        thermal_image::{ImageType, ThermalImage},
    },
    errors::AppError,
    infrastructure::http::client::{segment, ApiClient},
    repositories::{
        http_repo::HttpThermalImageRepo,
        resource::{ResourceRepository, Scope},
    },
};

/// Query string of the image list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformer_id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub image_type: Option<&'static str>,
    pub page: u32,
    pub size: u32,
}

impl ImageQuery {
    pub fn for_transformer(transformer_id: impl Into<String>, size: u32) -> Self {
        ImageQuery {
            transformer_id: Some(transformer_id.into()),
            image_type: None,
            page: FIRST_PAGE,
            size,
        }
    }

    pub fn at_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn of_type(mut self, image_type: ImageType) -> Self {
        self.image_type = Some(image_type.wire_value());
        self
    }
}

#[async_trait]
pub trait ThermalImageRepository: Send + Sync {
    async fn list_images(&self, query: &ImageQuery) -> Result<Page<ThermalImage>, AppError>;
    async fn delete_image(&self, id: &str) -> Result<(), AppError>;
}

impl HttpThermalImageRepo {
    pub fn new(client: ApiClient, page_size: u32) -> Self {
        HttpThermalImageRepo { client, page_size }
    }
}

#[async_trait]
impl ThermalImageRepository for HttpThermalImageRepo {
    #[instrument(skip(self))]
    async fn list_images(&self, query: &ImageQuery) -> Result<Page<ThermalImage>, AppError> {
        self.client.get_json_with_query("/api/images", query).await
    }

    #[instrument(skip(self))]
    async fn delete_image(&self, id: &str) -> Result<(), AppError> {
        self.client
            .delete(&format!("/api/images/{}", segment(id)))
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Thermal image not found".to_string()),
                _ => e,
            })
    }
}

#[async_trait]
impl ResourceRepository for HttpThermalImageRepo {
    type Record = ThermalImage;

    async fn list(&self, scope: &Scope) -> Result<Vec<ThermalImage>, AppError> {
        Ok(self.list_page(scope, FIRST_PAGE).await?.into_content())
    }

    async fn list_page(&self, scope: &Scope, page: u32) -> Result<Page<ThermalImage>, AppError> {
        let query = match scope.owner_id() {
            Some(transformer_id) => ImageQuery::for_transformer(transformer_id, self.page_size),
            None => ImageQuery {
                transformer_id: None,
                image_type: None,
                page: FIRST_PAGE,
                size: self.page_size,
            },
        };
        self.list_images(&query.at_page(page)).await
    }
}
