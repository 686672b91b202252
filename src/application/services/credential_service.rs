//! Password hashing and signed session tokens.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub login: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    /// Bad signature, malformed structure or expired token.
    #[error("invalid or expired token")]
    InvalidToken,
}

/// Credential primitives used by the account service and the auth middleware.
///
/// # Implementations
///
/// - [`JwtCredentialService`] - argon2id password hashes and HS256 tokens
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait CredentialService: Send + Sync {
    /// Hashes a plaintext password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Hashing`] only on library or entropy failure.
    fn hash_password(&self, plain: &str) -> Result<String, CredentialError>;

    /// Verifies a plaintext password against a stored hash.
    ///
    /// An unparsable stored hash is treated as a mismatch.
    fn verify_password(&self, hash: &str, plain: &str) -> bool;

    /// Issues a signed token for the given account.
    fn issue_token(&self, user_id: i64, login: &str) -> Result<String, CredentialError>;

    /// Verifies signature and expiry, returning the embedded claims.
    fn verify_token(&self, token: &str) -> Result<Claims, CredentialError>;
}

/// Production credential service.
///
/// The signing secret and token lifetime are fixed at construction.
pub struct JwtCredentialService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtCredentialService {
    /// Creates a new credential service.
    ///
    /// # Arguments
    ///
    /// - `secret` - HMAC key used to sign and verify tokens
    /// - `ttl` - lifetime of issued tokens
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }
}

impl CredentialService for JwtCredentialService {
    fn hash_password(&self, plain: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::Hashing(e.to_string()))
    }

    fn verify_password(&self, hash: &str, plain: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            tracing::warn!("Stored password hash could not be parsed");
            return false;
        };

        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }

    fn issue_token(&self, user_id: i64, login: &str) -> Result<String, CredentialError> {
        let now = Utc::now();
        let claims = Claims {
            user_id,
            login: login.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| CredentialError::Signing(e.to_string()))
    }

    fn verify_token(&self, token: &str) -> Result<Claims, CredentialError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                CredentialError::InvalidToken
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> JwtCredentialService {
        JwtCredentialService::new(secret, Duration::hours(24))
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let svc = service("test-secret");
        let hash = svc.hash_password("secret123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(svc.verify_password(&hash, "secret123"));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let svc = service("test-secret");
        let hash = svc.hash_password("secret123").unwrap();

        assert!(!svc.verify_password(&hash, "secret124"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let svc = service("test-secret");

        assert_ne!(
            svc.hash_password("secret123").unwrap(),
            svc.hash_password("secret123").unwrap()
        );
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        assert!(!service("test-secret").verify_password("not-a-valid-hash", "secret123"));
    }

    #[test]
    fn test_token_roundtrip() {
        let svc = service("test-secret");
        let token = svc.issue_token(42, "seller").unwrap();
        let claims = svc.verify_token(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.login, "seller");
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let token = service("secret-a").issue_token(1, "seller").unwrap();

        assert!(matches!(
            service("secret-b").verify_token(&token),
            Err(CredentialError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let svc = JwtCredentialService::new("test-secret", Duration::hours(-2));
        let token = svc.issue_token(1, "seller").unwrap();

        assert!(matches!(
            svc.verify_token(&token),
            Err(CredentialError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            service("test-secret").verify_token("not.a.token"),
            Err(CredentialError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let svc = service("test-secret");
        let mut token = svc.issue_token(1, "seller").unwrap();
        token.push('x');

        assert!(svc.verify_token(&token).is_err());
    }
}
