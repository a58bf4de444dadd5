//! HTTP Basic authenticator backed by a [`UserDetailsService`].

use std::sync::{Arc, OnceLock};

use actix_web::dev::ServiceRequest;

use crate::http::error::AuthError;
use crate::http::security::config::Authenticator;
use crate::http::security::crypto::{DelegatingPasswordEncoder, PasswordEncoder};
use crate::http::security::http_basic::extract_credentials;
use crate::http::security::user::User;
use crate::http::security::user_details::UserDetailsService;

const USER_NOT_FOUND_PASSWORD: &str = "userNotFoundPassword";

/// Verifies `Authorization: Basic` credentials on every request.
///
/// Nothing is remembered between requests: each call decodes the header,
/// loads the user and checks the password again.
///
/// # Example
/// ```
/// use rest_security_core::http::security::{
///     HttpBasicAuthenticator, InMemoryUserDetailsService, User,
/// };
///
/// let users = InMemoryUserDetailsService::new()
///     .with_user(User::with_username("admin").password("{noop}admin"));
/// let authenticator = HttpBasicAuthenticator::new(users);
/// ```
#[derive(Clone)]
pub struct HttpBasicAuthenticator {
    user_details: Arc<dyn UserDetailsService>,
    password_encoder: Arc<dyn PasswordEncoder>,
    // hash of a fixed password, matched against for unknown usernames so that
    // a miss costs about as much as a wrong password
    user_not_found_password: Arc<OnceLock<Option<String>>>,
}

impl HttpBasicAuthenticator {
    /// Creates an authenticator using a [`DelegatingPasswordEncoder`].
    pub fn new<U: UserDetailsService + 'static>(user_details: U) -> Self {
        HttpBasicAuthenticator {
            user_details: Arc::new(user_details),
            password_encoder: Arc::new(DelegatingPasswordEncoder::new()),
            user_not_found_password: Arc::new(OnceLock::new()),
        }
    }

    /// Sets the password encoder used to verify stored passwords.
    pub fn password_encoder<E: PasswordEncoder + 'static>(mut self, encoder: E) -> Self {
        self.password_encoder = Arc::new(encoder);
        self.user_not_found_password = Arc::new(OnceLock::new());
        self
    }

    fn mitigate_against_timing_attack(&self, password: &str) {
        let dummy = self.user_not_found_password.get_or_init(|| {
            self.password_encoder
                .encode(USER_NOT_FOUND_PASSWORD)
                .map_err(|e| log::warn!("cannot encode the unknown-user password: {}", e))
                .ok()
        });
        if let Some(dummy) = dummy {
            self.password_encoder.matches(password, dummy);
        }
    }

    /// Verifies a username/password pair against the store.
    pub fn verify_credentials(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let Some(user) = self.user_details.load_user_by_username(username) else {
            self.mitigate_against_timing_attack(password);
            log::debug!("authentication failed: unknown user {}", username);
            return Err(AuthError::BadCredentials);
        };

        if !user.is_enabled() {
            log::debug!("authentication failed: user {} is disabled", username);
            return Err(AuthError::Disabled);
        }

        if !self.password_encoder.matches(password, user.get_password()) {
            log::debug!("authentication failed: bad password for {}", username);
            return Err(AuthError::BadCredentials);
        }

        if self.password_encoder.upgrade_encoding(user.get_password()) {
            log::debug!("stored password of {} should be re-encoded", username);
        }

        Ok(user.erase_credentials())
    }
}

impl Authenticator for HttpBasicAuthenticator {
    fn authenticate(&self, req: &ServiceRequest) -> Result<Option<User>, AuthError> {
        match extract_credentials(req.headers())? {
            Some(credentials) => self
                .verify_credentials(&credentials.username, &credentials.password)
                .map(Some),
            None => Ok(None),
        }
    }
}
