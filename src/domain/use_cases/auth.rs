use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::session::{Session, SessionUser},
    entities::auth::LoginUser,
    errors::AppError,
    repositories::auth::AuthRepository,
};

pub struct AuthHandler<R>
where
    R: AuthRepository,
{
    pub auth_repo: R,
    pub session: Arc<Session>,
}

impl<R> AuthHandler<R>
where
    R: AuthRepository,
{
    pub fn new(auth_repo: R, session: Arc<Session>) -> Self {
        AuthHandler { auth_repo, session }
    }

    /// Exchanges credentials for a token and signs the session in.
    pub async fn login(&self, request: LoginUser) -> Result<SessionUser, AppError> {
        request.validate()?;

        let response = self.auth_repo.login(&request).await?;
        if response.token.trim().is_empty() {
            return Err(AppError::Decode("Login response carried no token".to_string()));
        }

        self.session.sign_in(response.token, response.user.clone());
        tracing::info!(user_id = %response.user.id, "User logged in successfully");
        Ok(response.user)
    }

    pub fn logout(&self) {
        self.session.sign_out();
    }
}
