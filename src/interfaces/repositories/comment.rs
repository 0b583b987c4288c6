use async_trait::async_trait;
use tracing::instrument;

use crate::{
    entities::comment::{Comment, CreateCommentRequest},
    errors::AppError,
    infrastructure::http::client::{segment, ApiClient},
    repositories::{
        http_repo::HttpCommentRepo,
        resource::{CreateResource, ResourceRepository, Scope},
    },
};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn list_comments(&self, inspection_id: &str) -> Result<Vec<Comment>, AppError>;
    async fn add_comment(&self, request: &CreateCommentRequest) -> Result<Comment, AppError>;
    async fn delete_comment(&self, comment_id: &str) -> Result<(), AppError>;
    async fn count_comments(&self, inspection_id: &str) -> Result<u64, AppError>;
}

impl HttpCommentRepo {
    pub fn new(client: ApiClient) -> Self {
        HttpCommentRepo { client }
    }
}

#[async_trait]
impl CommentRepository for HttpCommentRepo {
    #[instrument(skip(self))]
    async fn list_comments(&self, inspection_id: &str) -> Result<Vec<Comment>, AppError> {
        self.client
            .get_json(&format!("/api/inspection-comments/inspection/{}", segment(inspection_id)))
            .await
    }

    #[instrument(skip(self, request), fields(inspection_id = %request.inspection_id))]
    async fn add_comment(&self, request: &CreateCommentRequest) -> Result<Comment, AppError> {
        self.client.post_json("/api/inspection-comments", request).await
    }

    #[instrument(skip(self))]
    async fn delete_comment(&self, comment_id: &str) -> Result<(), AppError> {
        self.client
            .delete(&format!("/api/inspection-comments/{}", segment(comment_id)))
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound("Comment not found".to_string()),
                _ => e,
            })
    }

    #[instrument(skip(self))]
    async fn count_comments(&self, inspection_id: &str) -> Result<u64, AppError> {
        self.client
            .get_json(&format!(
                "/api/inspection-comments/inspection/{}/count",
                segment(inspection_id)
            ))
            .await
    }
}

#[async_trait]
impl ResourceRepository for HttpCommentRepo {
    type Record = Comment;

    async fn list(&self, scope: &Scope) -> Result<Vec<Comment>, AppError> {
        match scope.owner_id() {
            Some(inspection_id) => self.list_comments(inspection_id).await,
            None => Err(AppError::invalid_field(
                "inspection_id",
                "Comments can only be listed for an inspection",
            )),
        }
    }
}

#[async_trait]
impl CreateResource for HttpCommentRepo {
    type Payload = CreateCommentRequest;

    async fn create(&self, payload: &CreateCommentRequest) -> Result<Comment, AppError> {
        self.add_comment(payload).await
    }
}
