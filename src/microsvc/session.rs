//! Session variables from the request context.

use std::collections::HashMap;

use crate::customer::Role;
use crate::orders::Requester;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Parsed session variables from the incoming request.
///
/// The upstream auth layer verifies the caller and forwards identity as
/// headers:
///
/// ```text
/// x-user-id: user-42
/// x-user-role: customer
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    /// Create a session from a map of variables.
    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// Get the user ID (`x-user-id`).
    pub fn user_id(&self) -> Option<&str> {
        self.get(USER_ID_HEADER).filter(|id| !id.is_empty())
    }

    /// Get the user role (`x-user-role`). Anything but `admin` is a customer.
    pub fn role(&self) -> Role {
        match self.get(USER_ROLE_HEADER) {
            Some(role) if role.eq_ignore_ascii_case("admin") => Role::Admin,
            _ => Role::Customer,
        }
    }

    /// The requester identity, if the session carries a user ID.
    pub fn requester(&self) -> Option<Requester> {
        self.user_id().map(|user_id| Requester {
            user_id: user_id.to_string(),
            role: self.role(),
        })
    }

    /// Get a session variable by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }
}
