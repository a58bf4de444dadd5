//! Principal model for authentication and authorization.

use std::fmt;

/// A principal known to a [`UserDetailsService`](super::UserDetailsService).
///
/// The password is kept in its stored form (`{id}hash`) and is never printed
/// by `Display` or `Debug`.
///
/// # Example
/// ```
/// use rest_security_core::http::security::User;
///
/// let user = User::with_username("admin")
///     .password("{noop}secret")
///     .roles(["ADMIN", "USER"])
///     .authorities(["reports:read"]);
///
/// assert!(user.has_role("ADMIN"));
/// assert!(user.has_authority("reports:read"));
/// assert!(user.is_enabled());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    username: String,
    password: String,
    roles: Vec<String>,
    authorities: Vec<String>,
    enabled: bool,
}

impl User {
    /// Starts a user with no password, roles or authorities.
    pub fn with_username(username: impl Into<String>) -> Self {
        User {
            username: username.into(),
            password: String::new(),
            roles: Vec::new(),
            authorities: Vec::new(),
            enabled: true,
        }
    }

    /// Sets the stored (encoded) password.
    pub fn password(mut self, encoded_password: impl Into<String>) -> Self {
        self.password = encoded_password.into();
        self
    }

    /// Adds roles, skipping duplicates.
    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for role in roles {
            let role = role.into();
            if !self.roles.contains(&role) {
                self.roles.push(role);
            }
        }
        self
    }

    /// Adds authorities, skipping duplicates.
    pub fn authorities<I, S>(mut self, authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for authority in authorities {
            let authority = authority.into();
            if !self.authorities.contains(&authority) {
                self.authorities.push(authority);
            }
        }
        self
    }

    /// Marks the account as disabled. Disabled users never authenticate.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn get_username(&self) -> &str {
        &self.username
    }

    pub fn get_password(&self) -> &str {
        &self.password
    }

    pub fn get_roles(&self) -> &[String] {
        &self.roles
    }

    pub fn get_authorities(&self) -> &[String] {
        &self.authorities
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Checks if the user has ANY of the specified roles.
    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        roles.iter().any(|role| self.has_role(role.as_ref()))
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    /// Checks if the user has ANY of the specified authorities.
    pub fn has_any_authority<S: AsRef<str>>(&self, authorities: &[S]) -> bool {
        authorities
            .iter()
            .any(|authority| self.has_authority(authority.as_ref()))
    }

    /// Returns a copy without the stored password, for handing to handlers.
    pub fn erase_credentials(&self) -> Self {
        User {
            password: String::new(),
            ..self.clone()
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "User {{ username: {}, roles: {:?}, authorities: {:?} }}",
            self.username, self.roles, self.authorities
        )
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"[PROTECTED]")
            .field("roles", &self.roles)
            .field("authorities", &self.authorities)
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let user = User::with_username("alice")
            .password("{noop}secret")
            .roles(["USER"])
            .authorities(["reports:read"]);

        assert_eq!(user.get_username(), "alice");
        assert_eq!(user.get_password(), "{noop}secret");
        assert_eq!(user.get_roles(), ["USER".to_string()]);
        assert_eq!(user.get_authorities(), ["reports:read".to_string()]);
        assert!(user.is_enabled());
    }

    #[test]
    fn test_roles_no_duplicates() {
        let user = User::with_username("admin")
            .roles(["ADMIN", "USER"])
            .roles(["ADMIN", "MANAGER"]);

        assert_eq!(user.get_roles().len(), 3);
    }

    #[test]
    fn test_role_checks() {
        let user = User::with_username("user").roles(["USER"]);

        assert!(user.has_role("USER"));
        assert!(!user.has_role("user"));
        assert!(user.has_any_role(&["ADMIN", "USER"]));
        assert!(!user.has_any_role(&["ADMIN", "MANAGER"]));
        assert!(!user.has_any_role::<&str>(&[]));
    }

    #[test]
    fn test_authority_checks() {
        let user = User::with_username("user").authorities(["users:read"]);

        assert!(user.has_authority("users:read"));
        assert!(!user.has_authority("USERS:READ"));
        assert!(user.has_any_authority(&["users:write".to_string(), "users:read".to_string()]));
    }

    #[test]
    fn test_disabled() {
        let user = User::with_username("bob").disabled();
        assert!(!user.is_enabled());
    }

    #[test]
    fn test_erase_credentials() {
        let user = User::with_username("admin")
            .password("{noop}secret")
            .roles(["ADMIN"]);
        let erased = user.erase_credentials();

        assert_eq!(erased.get_password(), "");
        assert_eq!(erased.get_username(), "admin");
        assert!(erased.has_role("ADMIN"));
    }

    #[test]
    fn test_display_and_debug_hide_password() {
        let user = User::with_username("admin")
            .password("{noop}secret")
            .roles(["ADMIN"]);

        let display = format!("{}", user);
        let debug = format!("{:?}", user);
        assert!(display.contains("admin"));
        assert!(display.contains("ADMIN"));
        assert!(!display.contains("secret"));
        assert!(!debug.contains("secret"));
        assert!(debug.contains("[PROTECTED]"));
    }
}
