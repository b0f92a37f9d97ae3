pub mod events;
pub mod principal;
pub mod roles;
pub mod service;
pub mod storage;
#[cfg(test)]
pub(crate) mod tests;

pub use events::SessionEvent;
pub use principal::{AuthenticatedUser, Principal};
pub use roles::RoleRequirement;
pub use service::SecurityService;
pub use storage::{MemorySessionStorage, SessionStorage, UserStore, USER_STORAGE_KEY};
