//! Authentication, authorization and the security filter chain.
//!
//! # Module Structure
//!
//! - `authenticator` - HTTP Basic authenticator backed by a user store
//! - `authorizer` - Ordered request rules (RequestMatcherAuthorizer)
//! - `config` - Core traits (Authenticator, Authorizer)
//! - `crypto` - Password encoding (BCrypt, Argon2, NoOp, Delegating)
//! - `extractor` - Actix Web extractors (AuthenticatedUser, OptionalUser)
//! - `handler` - Entry point and access-denied handler
//! - `headers` - Default security response headers
//! - `http_basic` - `Authorization: Basic` parsing
//! - `middleware` - The filter chain (SecurityTransform)
//! - `user` - User model
//! - `user_details` - User lookup (UserDetailsService)

pub use authenticator::HttpBasicAuthenticator;
pub use authorizer::{Access, RequestMatcher, RequestMatcherAuthorizer};
pub use config::{AuthorizationDecision, Authenticator, Authorizer};
pub use crypto::{
    Argon2PasswordEncoder, BCryptPasswordEncoder, DelegatingPasswordEncoder, EncoderId,
    NoOpPasswordEncoder, PasswordEncoder, PasswordEncoderError,
};
pub use extractor::{AuthenticatedUser, OptionalUser};
pub use handler::{
    AccessDeniedHandler, AuthenticationEntryPoint, JsonAccessDeniedHandler,
    JsonAuthenticationEntryPoint,
};
pub use headers::{FrameOptions, SecurityHeaders};
pub use http_basic::{BasicCredentials, HttpBasicConfig};
pub use middleware::SecurityTransform;
pub use user::User;
pub use user_details::{InMemoryUserDetailsService, UserDetailsService};

pub mod authenticator;
pub mod authorizer;
pub mod config;
pub mod crypto;
pub mod extractor;
pub mod handler;
pub mod headers;
pub mod http_basic;
pub mod middleware;
pub mod user;
pub mod user_details;
