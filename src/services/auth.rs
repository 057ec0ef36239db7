//! Credential service: password hashing and bearer token issue/verification

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// bcrypt cost factor for stored admin passwords
const HASH_COST: u32 = 10;

/// Fixed bearer token lifetime; not configurable per call
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Hash a plaintext password with a per-call salt.
pub fn hash_password(plaintext: &str) -> AppResult<String> {
    hash(plaintext, HASH_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Check a plaintext password against a stored hash.
pub fn verify_password(plaintext: &str, password_hash: &str) -> AppResult<bool> {
    verify(plaintext, password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
}

/// Bearer token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

/// Token issue/verification backed by a symmetric signing secret
#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Issue a signed, self-contained token for an authenticated admin.
    pub fn issue_token(&self, id: i32, username: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            id,
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(TOKEN_TTL_SECS)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Decode and validate a token, distinguishing expiry from other failures.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_salted() {
        let a = hash_password("s3cret").unwrap();
        let b = hash_password("s3cret").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("s3cret", &a).unwrap());
        assert!(verify_password("s3cret", &b).unwrap());
    }

    #[test]
    fn wrong_password_does_not_verify() {
        let h = hash_password("correct horse").unwrap();
        assert!(!verify_password("battery staple", &h).unwrap());
    }

    #[test]
    fn token_round_trips_claims() {
        let auth = AuthService::new("test-secret");
        let token = auth.issue_token(7, "alice").unwrap();
        let claims = auth.validate_token(&token).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        let auth = AuthService::new("test-secret");
        let now = Utc::now();
        let claims = Claims {
            id: 1,
            username: "alice".to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        match auth.validate_token(&token) {
            Err(AppError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {:?}", other.map(|c| c.username)),
        }
    }

    #[test]
    fn wrong_secret_is_rejected_as_invalid() {
        let token = AuthService::new("secret-a").issue_token(1, "alice").unwrap();
        match AuthService::new("secret-b").validate_token(&token) {
            Err(AppError::InvalidToken) => {}
            other => panic!("expected InvalidToken, got {:?}", other.map(|c| c.username)),
        }
    }

    #[test]
    fn tampered_token_is_rejected() {
        let auth = AuthService::new("test-secret");
        let mut token = auth.issue_token(1, "alice").unwrap();
        token.push('x');
        assert!(matches!(
            auth.validate_token(&token),
            Err(AppError::InvalidToken)
        ));
    }
}
