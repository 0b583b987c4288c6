use async_trait::async_trait;
use tracing::instrument;

use crate::{
    entities::auth::{AuthResponse, LoginUser},
    errors::AppError,
    infrastructure::http::client::ApiClient,
    repositories::http_repo::HttpAuthRepo,
};

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn login(&self, credentials: &LoginUser) -> Result<AuthResponse, AppError>;
}

impl HttpAuthRepo {
    pub fn new(client: ApiClient) -> Self {
        HttpAuthRepo { client }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepo {
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn login(&self, credentials: &LoginUser) -> Result<AuthResponse, AppError> {
        self.client
            .post_json("/api/auth/login", credentials)
            .await
            .map_err(|e| match e {
                // a 401 here means bad credentials, not an expired session
                AppError::UnauthorizedAccess => AppError::WrongCredentials,
                _ => e,
            })
    }
}
