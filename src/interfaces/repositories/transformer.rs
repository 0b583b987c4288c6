use async_trait::async_trait;
use tracing::instrument;

use crate::{
    constants::FIRST_PAGE,
    entities::{
        page::{Page, PageQuery},
        transformer::{NewTransformer, Transformer},
    },
    errors::AppError,
    infrastructure::http::client::{segment, ApiClient},
    repositories::{
        http_repo::HttpTransformerRepo,
        resource::{CreateResource, ResourceRepository, Scope},
    },
};

#[async_trait]
pub trait TransformerRepository: Send + Sync {
    async fn list_transformers(&self, query: &PageQuery) -> Result<Page<Transformer>, AppError>;
    async fn get_transformer(&self, id: &str) -> Result<Transformer, AppError>;
    async fn create_transformer(&self, transformer: &NewTransformer) -> Result<Transformer, AppError>;
    async fn update_transformer(&self, id: &str, transformer: &NewTransformer) -> Result<Transformer, AppError>;
    async fn delete_transformer(&self, id: &str) -> Result<(), AppError>;
}

impl HttpTransformerRepo {
    pub fn new(client: ApiClient, page_size: u32) -> Self {
        HttpTransformerRepo { client, page_size }
    }
}

fn not_found_as_transformer(e: AppError) -> AppError {
    match e {
        AppError::NotFound(_) => AppError::NotFound("Transformer not found".to_string()),
        _ => e,
    }
}

#[async_trait]
impl TransformerRepository for HttpTransformerRepo {
    #[instrument(skip(self))]
    async fn list_transformers(&self, query: &PageQuery) -> Result<Page<Transformer>, AppError> {
        self.client.get_json_with_query("/api/transformers", query).await
    }

    #[instrument(skip(self))]
    async fn get_transformer(&self, id: &str) -> Result<Transformer, AppError> {
        self.client
            .get_json(&format!("/api/transformers/{}", segment(id)))
            .await
            .map_err(not_found_as_transformer)
    }

    #[instrument(skip(self, transformer), fields(transformer_no = %transformer.transformer_no))]
    async fn create_transformer(&self, transformer: &NewTransformer) -> Result<Transformer, AppError> {
        self.client
            .post_json("/api/transformers", transformer)
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => AppError::Conflict(format!(
                    "Transformer {} already exists",
                    transformer.transformer_no
                )),
                _ => e,
            })
    }

    #[instrument(skip(self, transformer))]
    async fn update_transformer(&self, id: &str, transformer: &NewTransformer) -> Result<Transformer, AppError> {
        self.client
            .put_json(&format!("/api/transformers/{}", segment(id)), transformer)
            .await
            .map_err(not_found_as_transformer)
    }

    #[instrument(skip(self))]
    async fn delete_transformer(&self, id: &str) -> Result<(), AppError> {
        self.client
            .delete(&format!("/api/transformers/{}", segment(id)))
            .await
            .map_err(not_found_as_transformer)
    }
}

#[async_trait]
impl ResourceRepository for HttpTransformerRepo {
    type Record = Transformer;

    async fn list(&self, scope: &Scope) -> Result<Vec<Transformer>, AppError> {
        Ok(self.list_page(scope, FIRST_PAGE).await?.into_content())
    }

    async fn list_page(&self, scope: &Scope, page: u32) -> Result<Page<Transformer>, AppError> {
        if *scope != Scope::All {
            return Err(AppError::invalid_field(
                "scope",
                "Transformers are listed as a whole collection",
            ));
        }
        self.list_transformers(&PageQuery::nth(page, self.page_size)).await
    }
}

#[async_trait]
impl CreateResource for HttpTransformerRepo {
    type Payload = NewTransformer;

    async fn create(&self, payload: &NewTransformer) -> Result<Transformer, AppError> {
        self.create_transformer(payload).await
    }
}
