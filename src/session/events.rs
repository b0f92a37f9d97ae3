use serde::{Deserialize, Serialize};

/// Session lifecycle notifications published by the security service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A login completed and the user was persisted
    LoggedIn { username: String },
    /// A login was rejected; any persisted user has been cleared
    LoginFailed { status: Option<u16> },
    /// The persisted user was cleared
    LoggedOut { forced: bool },
}
