//! Thin clients for the marketplace REST API.
//!
//! Request and response bodies the clients do not interpret are passed
//! through as [`serde_json::Value`].

pub mod category;
pub mod subscription;
pub mod wallet;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::AppError;

/// Errors raised by the REST clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Admin token not configured")]
    MissingAdminToken,
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status: 404, body } => AppError::NotFound(body),
            ClientError::Status { status: 401 | 403, body } => AppError::Auth(body),
            ClientError::MissingAdminToken => AppError::Auth("Admin token not configured".into()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Shared HTTP plumbing: base URL, a cookie-keeping client (partner calls
/// ride on the session cookie) and an optional bearer token for admin calls.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
    admin_token: Option<String>,
}

/// Whether a request needs the admin bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Session,
    Admin,
}

impl ApiClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:5000/api`).
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Self::with_http_client(base_url, http)
    }

    /// Create with an explicit reqwest client (useful for testing / DI).
    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Result<Self, ClientError> {
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');

        Ok(Self {
            base_url: Url::parse(&base)?,
            http,
            admin_token: None,
        })
    }

    /// Attach the bearer token used for `/subscriptions/admin/*` calls.
    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        access: Access,
    ) -> Result<T, ClientError> {
        self.request::<(), T>(Method::GET, path, None, access).await
    }

    pub(crate) async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        access: Access,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if access == Access::Admin {
            let token = self
                .admin_token
                .as_deref()
                .ok_or(ClientError::MissingAdminToken)?;
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let client = ApiClient::new("http://localhost:5000/api").unwrap();
        assert_eq!(
            client.url("/subscriptions/plans").unwrap().as_str(),
            "http://localhost:5000/api/subscriptions/plans"
        );

        let client = ApiClient::new("http://localhost:5000/api/").unwrap();
        assert_eq!(
            client.url("wallet/balance").unwrap().as_str(),
            "http://localhost:5000/api/wallet/balance"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_client_error_mapping() {
        let not_found: AppError = ClientError::Status {
            status: 404,
            body: "plan missing".into(),
        }
        .into();
        assert!(matches!(not_found, AppError::NotFound(_)));

        let unauthorized: AppError = ClientError::MissingAdminToken.into();
        assert!(matches!(unauthorized, AppError::Auth(_)));
    }
}
