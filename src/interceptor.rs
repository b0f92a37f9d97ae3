use std::sync::Arc;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

use crate::session::service::SecurityService;

/// Outbound-request hook that keeps the auth token header in sync with the
/// current session.
///
/// Authenticated: the configured header is set to the principal's token.
/// Anonymous: any header with that name is removed. The host's request
/// pipeline invokes this once per outgoing call; it never retries or queues.
pub struct AuthHeaderInterceptor {
    security: Arc<SecurityService>,
}

impl AuthHeaderInterceptor {
    /// Create an interceptor bound to a security service
    pub fn new(security: Arc<SecurityService>) -> Self {
        Self { security }
    }

    /// Stamp or strip the auth token header on an outgoing request.
    ///
    /// This hook never fails: a token or configured name that is not
    /// representable as an HTTP header leaves the request without the
    /// header and logs a warning.
    pub async fn apply(&self, headers: &mut HeaderMap) {
        let name = match HeaderName::from_bytes(self.security.auth_token_header().as_bytes()) {
            Ok(name) => name,
            Err(e) => {
                warn!(error = %e, "Configured auth token header is not a valid header name");
                return;
            }
        };

        match self.security.current_principal().await.token() {
            Some(token) => match HeaderValue::from_str(token) {
                Ok(value) => {
                    headers.insert(name, value);
                }
                Err(e) => {
                    warn!(error = %e, "Session token is not a valid header value");
                    headers.remove(name);
                }
            },
            None => {
                headers.remove(name);
            }
        }
    }
}
