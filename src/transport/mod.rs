use async_trait::async_trait;

use crate::error::AuthError;
use crate::session::principal::AuthenticatedUser;

pub mod http;
pub mod http_client;
#[cfg(test)]
mod tests;

pub use http::HttpAuthTransport;
pub use http_client::{HttpClient, HttpResponse, ReqwestHttpClient};

/// Contract of the external authentication collaborator.
///
/// Rejections carry the transport's status code; this crate never
/// reinterprets it.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    /// Verify credentials and return the authenticated user
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthError>;

    /// End the session on the server side
    async fn logout(&self) -> Result<(), AuthError>;
}
