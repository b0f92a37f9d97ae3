use serde::{Deserialize, Serialize};

/// Identity record issued by the authentication endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// Username the credentials belong to
    pub username: String,
    /// Opaque token presented on subsequent requests
    pub token: String,
    /// Role names granted to this user
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    /// Create a new authenticated user record
    pub fn new(
        username: impl Into<String>,
        token: impl Into<String>,
        roles: Vec<String>,
    ) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            roles,
        }
    }

    /// Exact, case-sensitive role membership test
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// The current identity: either nobody, or a user produced by a successful
/// authentication. Variant tests replace sentinel-value comparison, so there
/// is no "null user" to compare against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Principal {
    /// No authenticated user
    Anonymous,
    /// A user restored from storage or returned by the authentication endpoint
    Authenticated(AuthenticatedUser),
}

impl Principal {
    /// The anonymous principal
    pub fn anonymous() -> Self {
        Principal::Anonymous
    }

    /// True when a user is authenticated
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Principal::Authenticated(_))
    }

    /// True when no user is authenticated
    pub fn is_anonymous(&self) -> bool {
        !self.is_authenticated()
    }

    /// Username of the current user, empty for anonymous
    pub fn username(&self) -> &str {
        match self {
            Principal::Anonymous => "",
            Principal::Authenticated(user) => &user.username,
        }
    }

    /// Token of the current user, absent for anonymous
    pub fn token(&self) -> Option<&str> {
        match self {
            Principal::Anonymous => None,
            Principal::Authenticated(user) => Some(&user.token),
        }
    }

    /// Roles of the current user, empty for anonymous
    pub fn roles(&self) -> &[String] {
        match self {
            Principal::Anonymous => &[],
            Principal::Authenticated(user) => &user.roles,
        }
    }

    /// The underlying user record, if authenticated
    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            Principal::Anonymous => None,
            Principal::Authenticated(user) => Some(user),
        }
    }
}

impl From<AuthenticatedUser> for Principal {
    fn from(user: AuthenticatedUser) -> Self {
        Principal::Authenticated(user)
    }
}
