use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::error::AuthError;
use crate::session::events::SessionEvent;
use crate::session::principal::Principal;
use crate::session::roles::{self, RoleRequirement};
use crate::session::storage::{SessionStorage, UserStore};
use crate::transport::AuthTransport;
use crate::SecurityConfig;

/// Capacity of the session event channel
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Login/logout flows and identity queries for a single logical session.
///
/// The current principal is derived from the storage port on every query, so
/// callers sharing a backend always observe the most recently persisted
/// value. Nothing identity-related is cached in memory.
pub struct SecurityService {
    transport: Arc<dyn AuthTransport>,
    users: UserStore,
    auth_token_header: String,
    events: broadcast::Sender<SessionEvent>,
}

impl SecurityService {
    /// Create a security service over a transport and a storage backend
    pub fn new(
        transport: Arc<dyn AuthTransport>,
        storage: Arc<dyn SessionStorage>,
        config: &SecurityConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            transport,
            users: UserStore::new(storage),
            auth_token_header: config.auth_token_header.clone(),
            events,
        }
    }

    /// The current principal, re-read from storage.
    ///
    /// Absent, unparsable, and unreadable persisted state all degrade to
    /// `Principal::Anonymous`; this never fails.
    pub async fn current_principal(&self) -> Principal {
        match self.users.retrieve().await {
            Ok(Some(user)) => Principal::Authenticated(user),
            Ok(None) => Principal::Anonymous,
            Err(e) => {
                warn!(error = %e, "Session storage read failed, treating as anonymous");
                Principal::Anonymous
            }
        }
    }

    /// True when a user is currently authenticated
    pub async fn is_authenticated(&self) -> bool {
        self.current_principal().await.is_authenticated()
    }

    /// True when no user is currently authenticated
    pub async fn is_anonymous(&self) -> bool {
        !self.is_authenticated().await
    }

    /// Name of the header that carries the session token
    pub fn auth_token_header(&self) -> &str {
        &self.auth_token_header
    }

    /// Authenticate against the transport and persist the resulting user.
    ///
    /// On rejection the persisted user is cleared before the transport's
    /// error is handed back, so a failed login always leaves the session
    /// anonymous.
    pub async fn login(&self, username: &str, password: &str) -> Result<Principal, AuthError> {
        match self.transport.authenticate(username, password).await {
            Ok(user) => {
                self.users.store(&user).await?;
                info!(username = %user.username, "Login succeeded");

                let _ = self.events.send(SessionEvent::LoggedIn {
                    username: user.username.clone(),
                });
                Ok(Principal::Authenticated(user))
            }
            Err(err) => {
                // A stale principal must not survive a rejected login.
                if let Err(clear_err) = self.users.clear().await {
                    warn!(error = %clear_err, "Failed to clear session after rejected login");
                }

                let _ = self.events.send(SessionEvent::LoginFailed {
                    status: err.status(),
                });
                Err(err)
            }
        }
    }

    /// Log out against the transport, clearing the persisted user only after
    /// the transport confirms success.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.transport.logout().await?;
        self.users.clear().await?;
        info!("Logout succeeded");

        let _ = self.events.send(SessionEvent::LoggedOut { forced: false });
        Ok(())
    }

    /// Log out, clearing the persisted user even if the transport fails.
    ///
    /// The transport's error is still returned after the clear so the caller
    /// sees the rejection.
    pub async fn force_logout(&self) -> Result<(), AuthError> {
        let transport_result = self.transport.logout().await;
        if let Err(err) = &transport_result {
            warn!(error = %err, "Logout transport failed, clearing session anyway");
        }

        self.users.clear().await?;
        let _ = self.events.send(SessionEvent::LoggedOut { forced: true });
        transport_result
    }

    /// True iff the current principal holds every required role.
    ///
    /// The requirement is validated before storage is read, so an
    /// unspecified requirement fails without observing the session.
    pub async fn has_all_roles(
        &self,
        required: impl Into<RoleRequirement>,
    ) -> Result<bool, AuthError> {
        let required = required.into().normalize()?;
        let principal = self.current_principal().await;
        Ok(roles::all_present(&principal, &required))
    }

    /// True iff the current principal holds at least one required role.
    ///
    /// Same validation order and empty-requirement semantics as
    /// [`Self::has_all_roles`].
    pub async fn has_any_roles(
        &self,
        required: impl Into<RoleRequirement>,
    ) -> Result<bool, AuthError> {
        let required = required.into().normalize()?;
        let principal = self.current_principal().await;
        Ok(roles::any_present(&principal, &required))
    }

    /// Subscribe to session lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
