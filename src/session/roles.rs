//! Role requirement normalization and the membership predicates.
//!
//! Requirements arrive either as an explicit sequence of role names or as a
//! single comma-separated string; both normalize to a list of tokens checked
//! against the principal's roles by exact, case-sensitive equality. There is
//! no hierarchy and no wildcard.

use crate::error::{self, AuthError};
use crate::session::principal::Principal;

/// Required roles as supplied by the caller.
///
/// `Unspecified` models a caller that never provided a requirement at all,
/// which is a contract violation distinct from an empty requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRequirement {
    /// The caller did not specify a requirement
    Unspecified,
    /// An explicit sequence of role names, used verbatim
    Roles(Vec<String>),
    /// A comma-separated string, whitespace-stripped before splitting
    Csv(String),
}

impl RoleRequirement {
    /// Normalize into a list of role-name tokens.
    ///
    /// Sequences pass through untouched. A string first has ALL whitespace
    /// removed, then splits on commas; empty segments are dropped, so `""`
    /// normalizes to the empty requirement. `Unspecified` is an error.
    pub fn normalize(&self) -> Result<Vec<String>, AuthError> {
        match self {
            RoleRequirement::Unspecified => Err(error::invalid_argument(
                "required roles were not specified",
            )),
            RoleRequirement::Roles(roles) => Ok(roles.clone()),
            RoleRequirement::Csv(raw) => {
                let stripped: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
                Ok(stripped
                    .split(',')
                    .filter(|token| !token.is_empty())
                    .map(str::to_string)
                    .collect())
            }
        }
    }

    /// True when the caller did not specify a requirement
    pub fn is_unspecified(&self) -> bool {
        matches!(self, RoleRequirement::Unspecified)
    }
}

impl From<&str> for RoleRequirement {
    fn from(raw: &str) -> Self {
        RoleRequirement::Csv(raw.to_string())
    }
}

impl From<String> for RoleRequirement {
    fn from(raw: String) -> Self {
        RoleRequirement::Csv(raw)
    }
}

impl From<Vec<String>> for RoleRequirement {
    fn from(roles: Vec<String>) -> Self {
        RoleRequirement::Roles(roles)
    }
}

impl From<&[&str]> for RoleRequirement {
    fn from(roles: &[&str]) -> Self {
        RoleRequirement::Roles(roles.iter().map(|r| r.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for RoleRequirement {
    fn from(roles: [&str; N]) -> Self {
        RoleRequirement::Roles(roles.iter().map(|r| r.to_string()).collect())
    }
}

impl<T: Into<RoleRequirement>> From<Option<T>> for RoleRequirement {
    fn from(roles: Option<T>) -> Self {
        match roles {
            Some(roles) => roles.into(),
            None => RoleRequirement::Unspecified,
        }
    }
}

/// True iff every required role is held by the principal.
///
/// An empty requirement holds vacuously.
pub fn has_all_roles(
    principal: &Principal,
    required: &RoleRequirement,
) -> Result<bool, AuthError> {
    Ok(all_present(principal, &required.normalize()?))
}

/// True iff at least one required role is held by the principal.
///
/// An empty requirement holds vacuously, mirroring `has_all_roles`.
pub fn has_any_roles(
    principal: &Principal,
    required: &RoleRequirement,
) -> Result<bool, AuthError> {
    Ok(any_present(principal, &required.normalize()?))
}

pub(crate) fn all_present(principal: &Principal, required: &[String]) -> bool {
    let held = principal.roles();
    required.iter().all(|role| held.iter().any(|h| h == role))
}

pub(crate) fn any_present(principal: &Principal, required: &[String]) -> bool {
    if required.is_empty() {
        return true;
    }
    let held = principal.roles();
    required.iter().any(|role| held.iter().any(|h| h == role))
}
