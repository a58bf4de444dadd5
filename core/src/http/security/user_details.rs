//! Credential stores consulted during authentication.

use std::collections::HashMap;

use crate::http::security::User;

/// Looks up a principal by username.
///
/// Implementations back the HTTP Basic authenticator; they return the user
/// with its stored (encoded) password and never verify it themselves.
pub trait UserDetailsService: Send + Sync {
    fn load_user_by_username(&self, username: &str) -> Option<User>;
}

/// Immutable in-memory user store.
///
/// Usernames are matched case-insensitively.
///
/// # Example
/// ```
/// use rest_security_core::http::security::{InMemoryUserDetailsService, User, UserDetailsService};
///
/// let users = InMemoryUserDetailsService::new()
///     .with_user(User::with_username("Admin").password("{noop}admin").roles(["ADMIN"]));
///
/// assert!(users.load_user_by_username("admin").is_some());
/// assert!(users.load_user_by_username("ADMIN").is_some());
/// assert!(users.load_user_by_username("nobody").is_none());
/// ```
#[derive(Clone, Default)]
pub struct InMemoryUserDetailsService {
    users: HashMap<String, User>,
}

impl InMemoryUserDetailsService {
    pub fn new() -> Self {
        InMemoryUserDetailsService {
            users: HashMap::new(),
        }
    }

    /// Adds a user. A second user with the same (case-folded) name is skipped.
    pub fn with_user(mut self, user: User) -> Self {
        use std::collections::hash_map::Entry;
        match self.users.entry(user.get_username().to_lowercase()) {
            Entry::Occupied(e) => {
                log::warn!("user {} already exists, skipping", e.key());
            }
            Entry::Vacant(e) => {
                e.insert(user);
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserDetailsService for InMemoryUserDetailsService {
    fn load_user_by_username(&self, username: &str) -> Option<User> {
        self.users.get(&username.to_lowercase()).cloned()
    }
}
