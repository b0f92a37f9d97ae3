use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error type for the security services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional context for additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// HTTP status code reported by the transport, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Severity level
    pub severity: ErrorSeverity,
}

impl AuthError {
    /// Create a new error builder with the specified error code
    pub fn new(code: ErrorCode) -> AuthErrorBuilder {
        AuthErrorBuilder {
            code,
            message: String::new(),
            context: None,
            status: None,
            severity: ErrorSeverity::Error,
        }
    }

    /// The transport status code carried by this error, unreinterpreted
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// True when this error reports a caller-contract violation
    pub fn is_invalid_argument(&self) -> bool {
        self.code == ErrorCode::InvalidArgument
    }
}

/// Builder for creating AuthError instances
pub struct AuthErrorBuilder {
    code: ErrorCode,
    message: String,
    context: Option<String>,
    status: Option<u16>,
    severity: ErrorSeverity,
}

impl AuthErrorBuilder {
    /// Set the error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the error context
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Set the transport status code
    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Set the error severity
    pub fn severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }

    /// Build the final AuthError
    pub fn build(self) -> AuthError {
        AuthError {
            code: self.code,
            message: self.message,
            context: self.context,
            status: self.status,
            severity: self.severity,
        }
    }
}

/// Error codes for different types of errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A role check was invoked without specifying required roles
    InvalidArgument,
    /// The authentication endpoint rejected the credentials
    AuthenticationFailed,
    /// The logout endpoint reported a failure
    LogoutFailed,
    /// The request never produced a usable response
    TransportFailed,
    /// The session storage backend failed
    StorageFailed,
    /// Invariant violation inside this crate
    Internal,
}

/// Severity levels for errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    /// Informational messages that don't impact functionality
    Info,
    /// Warnings that might impact functionality but don't stop operation
    Warning,
    /// Errors that impact functionality but allow continued operation
    Error,
    /// Critical errors that prevent the session layer from functioning
    Critical,
}

/// Transport-layer failures, before they are folded into an AuthError
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode response body: {reason}")]
    InvalidBody { reason: String },
}

impl From<TransportError> for AuthError {
    fn from(err: TransportError) -> Self {
        AuthError::new(ErrorCode::TransportFailed)
            .message("Authentication transport failed")
            .context(err.to_string())
            .build()
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{}: {} ({})", self.code, self.message, context)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::InvalidArgument => write!(f, "INVALID_ARGUMENT"),
            ErrorCode::AuthenticationFailed => write!(f, "AUTHENTICATION_FAILED"),
            ErrorCode::LogoutFailed => write!(f, "LOGOUT_FAILED"),
            ErrorCode::TransportFailed => write!(f, "TRANSPORT_FAILED"),
            ErrorCode::StorageFailed => write!(f, "STORAGE_FAILED"),
            ErrorCode::Internal => write!(f, "INTERNAL"),
        }
    }
}

impl std::error::Error for AuthError {}

// Utility functions to create errors

/// Create an invalid argument error
pub fn invalid_argument(reason: impl Into<String>) -> AuthError {
    AuthError::new(ErrorCode::InvalidArgument)
        .message(reason)
        .severity(ErrorSeverity::Error)
        .build()
}

/// Create an authentication failed error carrying the transport status
pub fn authentication_failed(status: u16) -> AuthError {
    AuthError::new(ErrorCode::AuthenticationFailed)
        .message("Authentication was rejected")
        .status(status)
        .severity(ErrorSeverity::Warning)
        .build()
}

/// Create a logout failed error carrying the transport status
pub fn logout_failed(status: u16) -> AuthError {
    AuthError::new(ErrorCode::LogoutFailed)
        .message("Logout was rejected")
        .status(status)
        .severity(ErrorSeverity::Warning)
        .build()
}

/// Create a storage failed error
pub fn storage_failed(err: impl fmt::Display) -> AuthError {
    AuthError::new(ErrorCode::StorageFailed)
        .message("Session storage operation failed")
        .context(err.to_string())
        .severity(ErrorSeverity::Error)
        .build()
}
