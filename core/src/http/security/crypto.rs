//! Password encoding.
//!
//! Stored passwords carry the id of the algorithm that produced them as a
//! `{id}` prefix, e.g. `{bcrypt}$2b$10$...` or `{argon2}$argon2id$...`.
//! [`DelegatingPasswordEncoder`] reads that prefix and hands verification to
//! the matching encoder, so hashes produced by older algorithms keep working
//! while new passwords are written with the current default.

use std::fmt;
use std::str::FromStr;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use derive_more::{Display, Error};

/// Failure while hashing a raw password.
#[derive(Debug, Display, Error)]
pub enum PasswordEncoderError {
    #[display("argon2 hashing failed: {_0}")]
    Argon2(#[error(not(source))] String),
    #[display("bcrypt hashing failed: {_0}")]
    BCrypt(bcrypt::BcryptError),
}

/// Trait for encoding and verifying passwords.
///
/// # Example
/// ```
/// use rest_security_core::http::security::{Argon2PasswordEncoder, PasswordEncoder};
///
/// let encoder = Argon2PasswordEncoder::new();
/// let hash = encoder.encode("my_password").unwrap();
/// assert!(encoder.matches("my_password", &hash));
/// ```
pub trait PasswordEncoder: Send + Sync {
    /// Encodes the raw password.
    fn encode(&self, raw_password: &str) -> Result<String, PasswordEncoderError>;

    /// Verifies a raw password against an encoded password.
    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool;

    /// Returns true if the encoded password should be re-encoded.
    fn upgrade_encoding(&self, _encoded_password: &str) -> bool {
        false
    }
}

/// Argon2id encoder producing PHC strings.
#[derive(Clone)]
pub struct Argon2PasswordEncoder {
    argon2: Argon2<'static>,
}

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Argon2PasswordEncoder {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, PasswordEncoderError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw_password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordEncoderError::Argon2(e.to_string()))
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        match PasswordHash::new(encoded_password) {
            Ok(parsed_hash) => self
                .argon2
                .verify_password(raw_password.as_bytes(), &parsed_hash)
                .is_ok(),
            Err(_) => false,
        }
    }
}

/// BCrypt encoder.
#[derive(Clone)]
pub struct BCryptPasswordEncoder {
    cost: u32,
}

impl BCryptPasswordEncoder {
    /// Creates an encoder with the default cost (10).
    pub fn new() -> Self {
        Self { cost: 10 }
    }

    /// Creates an encoder with a custom cost, clamped to 4..=31.
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BCryptPasswordEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEncoder for BCryptPasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, PasswordEncoderError> {
        bcrypt::hash(raw_password, self.cost).map_err(PasswordEncoderError::BCrypt)
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        bcrypt::verify(raw_password, encoded_password).unwrap_or(false)
    }

    fn upgrade_encoding(&self, encoded_password: &str) -> bool {
        // $2b$10$... : the cost sits between the second and third '$'
        match encoded_password
            .split('$')
            .nth(2)
            .and_then(|cost| cost.parse::<u32>().ok())
        {
            Some(hash_cost) => hash_cost < self.cost,
            None => true,
        }
    }
}

/// Plain-text encoder. Only for tests and fixtures.
#[derive(Clone, Copy, Default)]
pub struct NoOpPasswordEncoder;

impl PasswordEncoder for NoOpPasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, PasswordEncoderError> {
        Ok(raw_password.to_string())
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        raw_password == encoded_password
    }
}

/// Algorithm tag stored in front of an encoded password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncoderId {
    #[default]
    BCrypt,
    Argon2,
    NoOp,
}

impl EncoderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncoderId::BCrypt => "bcrypt",
            EncoderId::Argon2 => "argon2",
            EncoderId::NoOp => "noop",
        }
    }
}

impl fmt::Display for EncoderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown encoder id.
#[derive(Debug, Display, Error, PartialEq, Eq)]
#[display("no password encoder mapped for id \"{id}\"")]
pub struct UnknownEncoderId {
    #[error(not(source))]
    pub id: String,
}

impl FromStr for EncoderId {
    type Err = UnknownEncoderId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bcrypt" => Ok(EncoderId::BCrypt),
            "argon2" => Ok(EncoderId::Argon2),
            "noop" => Ok(EncoderId::NoOp),
            other => Err(UnknownEncoderId {
                id: other.to_string(),
            }),
        }
    }
}

/// Splits `{id}hash` into its tag and hash.
///
/// Returns `None` when the value carries no `{...}` prefix.
pub fn split_encoded(encoded_password: &str) -> Option<(&str, &str)> {
    let rest = encoded_password.strip_prefix('{')?;
    let end = rest.find('}')?;
    Some((&rest[..end], &rest[end + 1..]))
}

/// Encoder that dispatches on the `{id}` prefix of stored passwords.
///
/// New passwords are encoded with the default id (`bcrypt` unless changed).
/// Verification of a value without a prefix, or with an id that is not
/// mapped, never matches.
///
/// # Example
/// ```
/// use rest_security_core::http::security::{DelegatingPasswordEncoder, EncoderId, PasswordEncoder};
///
/// let encoder = DelegatingPasswordEncoder::new().default_encoder(EncoderId::Argon2);
///
/// let hash = encoder.encode("password").unwrap();
/// assert!(hash.starts_with("{argon2}"));
/// assert!(encoder.matches("password", &hash));
/// assert!(encoder.matches("plain", "{noop}plain"));
/// ```
#[derive(Clone)]
pub struct DelegatingPasswordEncoder {
    argon2: Argon2PasswordEncoder,
    bcrypt: BCryptPasswordEncoder,
    noop: NoOpPasswordEncoder,
    default_encoder: EncoderId,
}

impl DelegatingPasswordEncoder {
    pub fn new() -> Self {
        DelegatingPasswordEncoder {
            argon2: Argon2PasswordEncoder::new(),
            bcrypt: BCryptPasswordEncoder::new(),
            noop: NoOpPasswordEncoder,
            default_encoder: EncoderId::default(),
        }
    }

    /// Sets the id used for newly encoded passwords.
    pub fn default_encoder(mut self, id: EncoderId) -> Self {
        self.default_encoder = id;
        self
    }

    /// Replaces the bcrypt delegate, e.g. to change its cost.
    pub fn bcrypt(mut self, encoder: BCryptPasswordEncoder) -> Self {
        self.bcrypt = encoder;
        self
    }

    pub fn get_default_encoder(&self) -> EncoderId {
        self.default_encoder
    }

    /// Encodes with an explicit id instead of the default.
    pub fn encode_with(
        &self,
        id: EncoderId,
        raw_password: &str,
    ) -> Result<String, PasswordEncoderError> {
        let hash = self.delegate(id).encode(raw_password)?;
        Ok(format!("{{{}}}{}", id, hash))
    }

    fn delegate(&self, id: EncoderId) -> &dyn PasswordEncoder {
        match id {
            EncoderId::BCrypt => &self.bcrypt,
            EncoderId::Argon2 => &self.argon2,
            EncoderId::NoOp => &self.noop,
        }
    }
}

impl Default for DelegatingPasswordEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordEncoder for DelegatingPasswordEncoder {
    fn encode(&self, raw_password: &str) -> Result<String, PasswordEncoderError> {
        self.encode_with(self.default_encoder, raw_password)
    }

    fn matches(&self, raw_password: &str, encoded_password: &str) -> bool {
        let Some((id, hash)) = split_encoded(encoded_password) else {
            log::warn!("stored password has no {{id}} prefix");
            return false;
        };
        match id.parse::<EncoderId>() {
            Ok(id) => self.delegate(id).matches(raw_password, hash),
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    fn upgrade_encoding(&self, encoded_password: &str) -> bool {
        match split_encoded(encoded_password) {
            Some((id, hash)) if id == self.default_encoder.as_str() => {
                self.delegate(self.default_encoder).upgrade_encoding(hash)
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argon2_encoder() {
        let encoder = Argon2PasswordEncoder::new();
        let hash = encoder.encode("test_password_123").unwrap();

        assert_ne!(hash, "test_password_123");
        assert!(encoder.matches("test_password_123", &hash));
        assert!(!encoder.matches("wrong_password", &hash));
        assert!(!encoder.matches("test_password_123", "not-a-phc-string"));
    }

    #[test]
    fn test_bcrypt_encoder() {
        let encoder = BCryptPasswordEncoder::with_cost(4);
        let hash = encoder.encode("secret").unwrap();

        assert!(hash.starts_with("$2"));
        assert!(encoder.matches("secret", &hash));
        assert!(!encoder.matches("other", &hash));
        assert!(!encoder.matches("secret", "garbage"));
    }

    #[test]
    fn test_bcrypt_cost_clamped() {
        assert_eq!(BCryptPasswordEncoder::with_cost(1).cost(), 4);
        assert_eq!(BCryptPasswordEncoder::with_cost(40).cost(), 31);
        assert_eq!(BCryptPasswordEncoder::new().cost(), 10);
    }

    #[test]
    fn test_bcrypt_upgrade_encoding() {
        let weak = BCryptPasswordEncoder::with_cost(4);
        let strong = BCryptPasswordEncoder::with_cost(6);
        let hash = weak.encode("secret").unwrap();

        assert!(!weak.upgrade_encoding(&hash));
        assert!(strong.upgrade_encoding(&hash));
        assert!(strong.upgrade_encoding("not-a-bcrypt-hash"));
    }

    #[test]
    fn test_noop_encoder() {
        let encoder = NoOpPasswordEncoder;
        assert_eq!(encoder.encode("plain").unwrap(), "plain");
        assert!(encoder.matches("plain", "plain"));
    }

    #[test]
    fn test_split_encoded() {
        assert_eq!(split_encoded("{noop}secret"), Some(("noop", "secret")));
        assert_eq!(split_encoded("{bcrypt}$2b$10$x"), Some(("bcrypt", "$2b$10$x")));
        assert_eq!(split_encoded("{}"), Some(("", "")));
        assert_eq!(split_encoded("secret"), None);
        assert_eq!(split_encoded("{unterminated"), None);
    }

    #[test]
    fn test_encoder_id_parse() {
        assert_eq!("bcrypt".parse::<EncoderId>(), Ok(EncoderId::BCrypt));
        assert_eq!("argon2".parse::<EncoderId>(), Ok(EncoderId::Argon2));
        assert_eq!("noop".parse::<EncoderId>(), Ok(EncoderId::NoOp));
        assert!("md5".parse::<EncoderId>().is_err());
    }

    #[test]
    fn test_delegating_encodes_with_default_id() {
        let encoder = DelegatingPasswordEncoder::new().bcrypt(BCryptPasswordEncoder::with_cost(4));
        let hash = encoder.encode("password").unwrap();

        assert_eq!(encoder.get_default_encoder(), EncoderId::BCrypt);
        assert!(hash.starts_with("{bcrypt}$2"));
        assert!(encoder.matches("password", &hash));
        assert!(!encoder.matches("wrong", &hash));
    }

    #[test]
    fn test_delegating_verifies_mixed_algorithms() {
        let encoder = DelegatingPasswordEncoder::new().bcrypt(BCryptPasswordEncoder::with_cost(4));
        let bcrypt = encoder.encode_with(EncoderId::BCrypt, "first").unwrap();
        let argon2 = encoder.encode_with(EncoderId::Argon2, "second").unwrap();

        assert!(argon2.starts_with("{argon2}$argon2"));
        assert!(encoder.matches("first", &bcrypt));
        assert!(encoder.matches("second", &argon2));
        assert!(encoder.matches("third", "{noop}third"));
        assert!(!encoder.matches("second", &bcrypt));
    }

    #[test]
    fn test_delegating_rejects_unmapped_values() {
        let encoder = DelegatingPasswordEncoder::new();

        assert!(!encoder.matches("plain", "plain"));
        assert!(!encoder.matches("plain", "{md5}plain"));
        assert!(!encoder.matches("", "{}"));
    }

    #[test]
    fn test_delegating_upgrade_encoding() {
        let encoder = DelegatingPasswordEncoder::new().bcrypt(BCryptPasswordEncoder::with_cost(4));
        let current = encoder.encode("password").unwrap();

        assert!(!encoder.upgrade_encoding(&current));
        assert!(encoder.upgrade_encoding("{noop}password"));
        assert!(encoder.upgrade_encoding("password"));
    }
}
