use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::{self, AuthError};
use crate::session::principal::AuthenticatedUser;
use crate::transport::http_client::{HttpClient, ReqwestHttpClient};
use crate::transport::AuthTransport;
use crate::SecurityConfig;

/// HTTP implementation of the authentication collaborator.
///
/// POSTs JSON credentials to the configured authentication URL and an empty
/// body to the configured logout URL. Performs no retries; timeout policy
/// belongs to the underlying client.
pub struct HttpAuthTransport {
    client: Arc<dyn HttpClient>,
    authentication_url: String,
    logout_url: String,
}

impl HttpAuthTransport {
    /// Create a transport backed by a default reqwest client
    pub fn new(config: &SecurityConfig) -> Self {
        Self::with_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    /// Create a transport over a custom HTTP client
    pub fn with_client(client: Arc<dyn HttpClient>, config: &SecurityConfig) -> Self {
        Self {
            client,
            authentication_url: config.authentication_url.clone(),
            logout_url: config.logout_url.clone(),
        }
    }

    fn json_headers() -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers
    }
}

#[async_trait]
impl AuthTransport for HttpAuthTransport {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let body = json!({ "username": username, "password": password }).to_string();

        let response = self
            .client
            .post(&self.authentication_url, Self::json_headers(), body)
            .await?;

        if !response.is_success() {
            debug!(status = response.status(), "Authentication rejected");
            return Err(error::authentication_failed(response.status()));
        }

        let user: AuthenticatedUser = response.json()?;
        Ok(user)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let response = self
            .client
            .post(&self.logout_url, HashMap::new(), String::new())
            .await?;

        if !response.is_success() {
            debug!(status = response.status(), "Logout rejected");
            return Err(error::logout_failed(response.status()));
        }

        Ok(())
    }
}
