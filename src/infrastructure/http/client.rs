//! Thin JSON client for the inspection REST service.
//!
//! Every request carries the session's bearer token. Non-2xx responses are
//! turned into [`AppError`] with the server-provided message when one can be
//! found in the body.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{errors::AppError, infrastructure::auth::session::Session, settings::AppConfig};

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: Arc<Session>) -> Result<Self, AppError> {
        let base_url = config.base_url()?;
        Ok(Self::with_client(reqwest::Client::new(), base_url, session))
    }

    /// Reuses an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(http: reqwest::Client, base_url: Url, session: Arc<Session>) -> Self {
        ApiClient { http, base_url, session }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Resolves an absolute API path (`/api/...`) against the base URL,
    /// keeping any path prefix the base URL already has.
    pub fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    pub async fn get_json<T>(&self, path: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let response = self.send(self.http.request(Method::GET, url.clone()), &url).await?;
        Self::parse_json(response).await
    }

    pub async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        let request = self.http.request(Method::GET, url.clone()).query(query);
        let response = self.send(request, &url).await?;
        Self::parse_json(response).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.http.request(Method::POST, url.clone()).json(body);
        let response = self.send(request, &url).await?;
        Self::parse_json(response).await
    }

    pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.http.request(Method::PUT, url.clone()).json(body);
        let response = self.send(request, &url).await?;
        Self::parse_json(response).await
    }

    /// `PUT` with query parameters and no body.
    pub async fn put_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        let request = self.http.request(Method::PUT, url.clone()).query(query);
        let response = self.send(request, &url).await?;
        Self::parse_json(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        let url = self.endpoint(path)?;
        self.send(self.http.request(Method::DELETE, url.clone()), &url).await?;
        Ok(())
    }

    // ---- private helpers ----

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response, AppError> {
        let request = match self.session.bearer_token() {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        };

        tracing::debug!(%url, "Sending API request");

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Network error calling {}: {}", url, e)))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%url, "API rejected the session token");
            self.session.sign_out();
            return Err(AppError::UnauthorizedAccess);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // an empty message lets the view fall back to its own text
            let message = extract_message(&body).unwrap_or_default();
            tracing::warn!(%url, status = status.as_u16(), "API request failed: {}", message);
            return Err(AppError::from_status(status.as_u16(), message));
        }

        Ok(response)
    }

    async fn parse_json<T>(response: Response) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read response body: {}", e)))?;

        serde_json::from_str(&text).map_err(AppError::from)
    }
}

/// Pulls a readable message out of an error body: the `message` or `error`
/// field of a JSON object, otherwise the raw text.
pub fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        let field = ["message", "error", "details"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::trim)
            .find(|s| !s.is_empty());
        if let Some(message) = field {
            return Some(message.to_string());
        }
    }

    Some(body.to_string())
}

/// Percent-encodes an identifier for use as a single path segment.
pub fn segment(id: &str) -> String {
    urlencoding::encode(id.trim()).into_owned()
}
