//! Security policy of the service.
//!
//! `/auth/welcome` is public, every other request needs HTTP Basic
//! credentials. Nothing is kept between requests. Failures are answered by
//! the JSON entry point (401) and access-denied handler (403).

use rest_security_core::http::security::{
    Access, BCryptPasswordEncoder, DelegatingPasswordEncoder, EncoderId, HttpBasicAuthenticator,
    HttpBasicConfig, InMemoryUserDetailsService, JsonAccessDeniedHandler,
    JsonAuthenticationEntryPoint, PasswordEncoderError, RequestMatcherAuthorizer, SecurityTransform,
    User,
};

pub const WELCOME_PATH: &str = "/auth/welcome";

/// The filter chain type wrapped around the application.
pub type SecurityFilterChain = SecurityTransform<HttpBasicAuthenticator, RequestMatcherAuthorizer>;

/// Users, password encoder and challenge realm of the service.
///
/// Cheap to clone; `HttpServer` builds one filter chain per worker.
#[derive(Clone)]
pub struct SecurityPolicy {
    authenticator: HttpBasicAuthenticator,
    realm: Option<String>,
}

impl SecurityPolicy {
    /// Creates the policy over `users`, verified by [`Self::password_encoder`].
    pub fn new(users: InMemoryUserDetailsService) -> Self {
        Self::with_encoder(users, Self::password_encoder())
    }

    /// Creates the policy with an explicit encoder.
    pub fn with_encoder(
        users: InMemoryUserDetailsService,
        encoder: DelegatingPasswordEncoder,
    ) -> Self {
        SecurityPolicy {
            authenticator: HttpBasicAuthenticator::new(users).password_encoder(encoder),
            realm: None,
        }
    }

    /// Advertises `WWW-Authenticate: Basic realm="<realm>"` on 401 responses.
    pub fn realm(mut self, realm: Option<String>) -> Self {
        self.realm = realm;
        self
    }

    /// Password encoder: `{id}hash` values, new hashes are bcrypt.
    pub fn password_encoder() -> DelegatingPasswordEncoder {
        DelegatingPasswordEncoder::new().default_encoder(EncoderId::BCrypt)
    }

    /// Request rules: the welcome page is public, the rest authenticated.
    pub fn authorizer() -> RequestMatcherAuthorizer {
        RequestMatcherAuthorizer::new()
            .add_matcher(WELCOME_PATH, Access::PermitAll)
            .any_request(Access::Authenticated)
    }

    /// Builds the stateless HTTP Basic filter chain.
    pub fn security_filter_chain(&self) -> SecurityFilterChain {
        let mut entry_point = JsonAuthenticationEntryPoint::new();
        if let Some(realm) = &self.realm {
            entry_point = entry_point.challenge(HttpBasicConfig::new().realm(realm));
        }

        SecurityTransform::new(self.authenticator.clone(), Self::authorizer())
            .authentication_entry_point(entry_point)
            .access_denied_handler(JsonAccessDeniedHandler)
    }
}

/// Demo accounts, stored under different encoder ids:
///
/// - `admin`/`admin` (bcrypt): ADMIN, USER
/// - `user`/`user` (argon2): USER
/// - `guest`/`guest` (noop): no role
pub fn demo_users(
    encoder: &DelegatingPasswordEncoder,
) -> Result<InMemoryUserDetailsService, PasswordEncoderError> {
    Ok(InMemoryUserDetailsService::new()
        .with_user(
            User::with_username("admin")
                .password(encoder.encode_with(EncoderId::BCrypt, "admin")?)
                .roles(["ADMIN", "USER"])
                .authorities(["reports:read"]),
        )
        .with_user(
            User::with_username("user")
                .password(encoder.encode_with(EncoderId::Argon2, "user")?)
                .roles(["USER"]),
        )
        .with_user(
            User::with_username("guest").password(encoder.encode_with(EncoderId::NoOp, "guest")?),
        ))
}

/// Cheaper bcrypt settings for tests.
#[doc(hidden)]
pub fn fast_password_encoder() -> DelegatingPasswordEncoder {
    SecurityPolicy::password_encoder().bcrypt(BCryptPasswordEncoder::with_cost(4))
}
