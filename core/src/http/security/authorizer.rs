//! Request-matcher based authorization.
//!
//! Rules are checked in registration order and the first matching rule
//! decides. Requests that match no rule fall to the `any_request` rule,
//! which defaults to [`Access::Authenticated`].

use actix_web::dev::ServiceRequest;
use actix_web::http::Method;
use regex::Regex;

use crate::http::security::config::{AuthorizationDecision, Authorizer};
use crate::http::security::user::User;

/// Selects the requests a rule applies to.
#[derive(Debug, Clone)]
pub struct RequestMatcher {
    path: PathPattern,
    method: Option<Method>,
}

#[derive(Debug, Clone)]
enum PathPattern {
    Exact(String),
    Regex(Regex),
}

impl RequestMatcher {
    /// Matches one path exactly.
    pub fn exact(path: impl Into<String>) -> Self {
        RequestMatcher {
            path: PathPattern::Exact(path.into()),
            method: None,
        }
    }

    /// Matches paths against a regex, anchored at both ends.
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        let re = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(RequestMatcher {
            path: PathPattern::Regex(re),
            method: None,
        })
    }

    /// Restricts the matcher to one HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn matches(&self, method: &Method, path: &str) -> bool {
        if let Some(expected) = &self.method {
            if expected != method {
                return false;
            }
        }
        match &self.path {
            PathPattern::Exact(p) => p == path,
            PathPattern::Regex(re) => re.is_match(path),
        }
    }
}

impl From<&str> for RequestMatcher {
    fn from(path: &str) -> Self {
        RequestMatcher::exact(path)
    }
}

/// Access rule attached to a [`RequestMatcher`].
///
/// # Example
/// ```
/// use rest_security_core::http::security::Access;
///
/// let admin = Access::has_any_role(["ADMIN", "MANAGER"]);
/// let reader = Access::has_any_authority(["reports:read"]);
/// let public = Access::PermitAll;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Anyone, including anonymous callers.
    PermitAll,
    /// Any authenticated caller.
    Authenticated,
    /// An authenticated caller with at least one of the roles.
    HasAnyRole(Vec<String>),
    /// An authenticated caller with at least one of the authorities.
    HasAnyAuthority(Vec<String>),
    /// Nobody.
    DenyAll,
}

impl Access {
    pub fn has_role(role: impl Into<String>) -> Self {
        Access::HasAnyRole(vec![role.into()])
    }

    pub fn has_any_role<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Access::HasAnyRole(roles.into_iter().map(Into::into).collect())
    }

    pub fn has_authority(authority: impl Into<String>) -> Self {
        Access::HasAnyAuthority(vec![authority.into()])
    }

    pub fn has_any_authority<I, S>(authorities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Access::HasAnyAuthority(authorities.into_iter().map(Into::into).collect())
    }

    /// Evaluates the rule for a (possibly anonymous) caller.
    pub fn check(&self, user: Option<&User>) -> AuthorizationDecision {
        if *self == Access::PermitAll {
            return AuthorizationDecision::Granted;
        }
        let Some(user) = user else {
            return AuthorizationDecision::AuthenticationRequired;
        };
        let granted = match self {
            Access::PermitAll | Access::Authenticated => true,
            Access::HasAnyRole(roles) => user.has_any_role(roles.as_slice()),
            Access::HasAnyAuthority(authorities) => user.has_any_authority(authorities.as_slice()),
            Access::DenyAll => false,
        };
        if granted {
            AuthorizationDecision::Granted
        } else {
            AuthorizationDecision::Denied
        }
    }
}

/// Ordered list of request rules.
///
/// # Example
/// ```
/// use rest_security_core::http::security::{Access, RequestMatcher, RequestMatcherAuthorizer};
///
/// let authorizer = RequestMatcherAuthorizer::new()
///     .add_matcher("/auth/welcome", Access::PermitAll)
///     .add_matcher(RequestMatcher::regex("/admin/.*").unwrap(), Access::has_role("ADMIN"))
///     .any_request(Access::Authenticated);
/// ```
#[derive(Debug, Clone)]
pub struct RequestMatcherAuthorizer {
    matchers: Vec<(RequestMatcher, Access)>,
    any_request: Access,
}

impl RequestMatcherAuthorizer {
    pub fn new() -> Self {
        RequestMatcherAuthorizer {
            matchers: Vec::new(),
            any_request: Access::Authenticated,
        }
    }

    /// Appends a rule. Earlier rules take precedence.
    pub fn add_matcher(mut self, matcher: impl Into<RequestMatcher>, access: Access) -> Self {
        self.matchers.push((matcher.into(), access));
        self
    }

    /// Sets the rule for requests no matcher selects.
    pub fn any_request(mut self, access: Access) -> Self {
        self.any_request = access;
        self
    }

    /// Returns the rule that applies to a request.
    pub fn access_for(&self, method: &Method, path: &str) -> &Access {
        self.matchers
            .iter()
            .find(|(matcher, _)| matcher.matches(method, path))
            .map(|(_, access)| access)
            .unwrap_or(&self.any_request)
    }
}

impl Default for RequestMatcherAuthorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Authorizer for RequestMatcherAuthorizer {
    fn decide(&self, req: &ServiceRequest, user: Option<&User>) -> AuthorizationDecision {
        // same requoted path the router matches on
        let path = req.match_info().as_str();
        let access = self.access_for(req.method(), path);
        let decision = access.check(user);
        log::debug!("{} {} -> {:?} ({:?})", req.method(), path, decision, access);
        decision
    }
}
