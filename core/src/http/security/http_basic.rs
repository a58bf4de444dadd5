//! HTTP Basic Authentication support (RFC 7617).

use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use base64::prelude::*;

use crate::http::error::AuthError;

/// Username and password decoded from an `Authorization: Basic` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"[PROTECTED]")
            .finish()
    }
}

/// Reads Basic credentials from the request headers.
///
/// - no `Authorization` header, or a scheme other than `Basic`: `Ok(None)`,
///   the request stays anonymous;
/// - a `Basic` token that is not ASCII base64, not UTF-8 once decoded, or
///   has no `:`:
///   `Err(AuthError::BadCredentials)`.
///
/// The scheme is matched case-insensitively. The password may contain `:`.
pub fn extract_credentials(headers: &HeaderMap) -> Result<Option<BasicCredentials>, AuthError> {
    let Some(value) = headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = value.as_bytes().trim_ascii();
    let (scheme, token) = match value.iter().position(|b| *b == b' ') {
        Some(i) => (&value[..i], &value[i + 1..]),
        None => (value, &[][..]),
    };
    if !scheme.eq_ignore_ascii_case(b"Basic") {
        return Ok(None);
    }

    let decoded = BASE64_STANDARD
        .decode(token.trim_ascii())
        .map_err(|_| AuthError::BadCredentials)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::BadCredentials)?;
    let (username, password) = decoded
        .split_once(':')
        .ok_or(AuthError::BadCredentials)?;

    Ok(Some(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    }))
}

/// HTTP Basic challenge configuration.
///
/// When attached to the entry point, 401 responses carry
/// `WWW-Authenticate: Basic realm="<realm>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpBasicConfig {
    realm: String,
}

impl HttpBasicConfig {
    /// Creates a configuration with the default realm "Realm".
    pub fn new() -> Self {
        HttpBasicConfig {
            realm: "Realm".to_string(),
        }
    }

    pub fn realm(mut self, realm: &str) -> Self {
        self.realm = realm.to_string();
        self
    }

    /// Creates the WWW-Authenticate header value.
    pub fn www_authenticate_header(&self) -> String {
        format!("Basic realm=\"{}\"", self.realm)
    }
}

impl Default for HttpBasicConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn basic(raw: &str) -> String {
        format!("Basic {}", BASE64_STANDARD.encode(raw))
    }

    #[test]
    fn test_no_header_is_anonymous() {
        assert_eq!(extract_credentials(&HeaderMap::new()), Ok(None));
    }

    #[test]
    fn test_other_scheme_is_anonymous() {
        assert_eq!(extract_credentials(&headers("Bearer abc.def")), Ok(None));
    }

    #[test]
    fn test_valid_credentials() {
        let creds = extract_credentials(&headers(&basic("admin:secret")))
            .unwrap()
            .unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "secret");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let value = format!("basic {}", BASE64_STANDARD.encode("admin:secret"));
        let creds = extract_credentials(&headers(&value)).unwrap().unwrap();
        assert_eq!(creds.username, "admin");
    }

    #[test]
    fn test_password_may_contain_colon() {
        let creds = extract_credentials(&headers(&basic("admin:a:b:c")))
            .unwrap()
            .unwrap();
        assert_eq!(creds.username, "admin");
        assert_eq!(creds.password, "a:b:c");
    }

    #[test]
    fn test_empty_password() {
        let creds = extract_credentials(&headers(&basic("admin:"))).unwrap().unwrap();
        assert_eq!(creds.password, "");
    }

    #[test]
    fn test_invalid_base64_is_bad_credentials() {
        assert_eq!(
            extract_credentials(&headers("Basic !!!not-base64")),
            Err(AuthError::BadCredentials)
        );
    }

    #[test]
    fn test_non_ascii_token_is_bad_credentials() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Basic \xff\xfe").unwrap(),
        );
        assert_eq!(extract_credentials(&headers), Err(AuthError::BadCredentials));
    }

    #[test]
    fn test_non_ascii_other_scheme_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xff\xfe").unwrap(),
        );
        assert_eq!(extract_credentials(&headers), Ok(None));
    }

    #[test]
    fn test_missing_colon_is_bad_credentials() {
        assert_eq!(
            extract_credentials(&headers(&basic("adminsecret"))),
            Err(AuthError::BadCredentials)
        );
    }

    #[test]
    fn test_bare_scheme_is_bad_credentials() {
        assert_eq!(
            extract_credentials(&headers("Basic")),
            Err(AuthError::BadCredentials)
        );
    }

    #[test]
    fn test_www_authenticate_header() {
        assert_eq!(
            HttpBasicConfig::new().www_authenticate_header(),
            "Basic realm=\"Realm\""
        );
        assert_eq!(
            HttpBasicConfig::new().realm("api").www_authenticate_header(),
            "Basic realm=\"api\""
        );
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = BasicCredentials {
            username: "admin".into(),
            password: "secret".into(),
        };
        assert!(!format!("{:?}", creds).contains("secret"));
    }
}
