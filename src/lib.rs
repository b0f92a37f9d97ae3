//! Client-side session and identity management.
//!
//! Authenticates against two configurable HTTP endpoints, persists the
//! current principal behind a session-storage port, answers role-membership
//! queries, and stamps outgoing requests with a token header.

use serde::{Deserialize, Serialize};

// Export modules
pub mod error;
pub mod interceptor;
pub mod session;
#[cfg(test)]
mod tests;
pub mod transport;

pub use error::{AuthError, ErrorCode, ErrorSeverity};
pub use interceptor::AuthHeaderInterceptor;
pub use session::{
    AuthenticatedUser, MemorySessionStorage, Principal, RoleRequirement, SecurityService,
    SessionEvent, SessionStorage, USER_STORAGE_KEY,
};
pub use transport::{AuthTransport, HttpAuthTransport};

/// Default header used to carry the session token
pub const DEFAULT_AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Default path of the authentication endpoint
pub const DEFAULT_AUTHENTICATION_URL: &str = "/login";

/// Default path of the logout endpoint
pub const DEFAULT_LOGOUT_URL: &str = "/logout";

/// Configuration for the security services.
///
/// Set once at construction time; the user storage key is fixed and not part
/// of the configuration surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// URL credentials are posted to
    pub authentication_url: String,
    /// URL the logout request is posted to
    pub logout_url: String,
    /// Name of the header carrying the session token
    pub auth_token_header: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            authentication_url: DEFAULT_AUTHENTICATION_URL.to_string(),
            logout_url: DEFAULT_LOGOUT_URL.to_string(),
            auth_token_header: DEFAULT_AUTH_TOKEN_HEADER.to_string(),
        }
    }
}
