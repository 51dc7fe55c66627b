use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to generate token: {0}")]
    Encode(jsonwebtoken::errors::Error),
    #[error("Invalid token: {0}")]
    Decode(jsonwebtoken::errors::Error),
}

/// Issues and verifies HS256 bearer tokens. There is no refresh or
/// revocation mechanism: a token remains valid until natural expiry.
#[derive(Clone)]
pub struct TokenManager {
    secret: String,
    expire_minutes: i64,
}

impl TokenManager {
    pub fn new(secret: impl Into<String>, expire_minutes: i64) -> Self {
        Self {
            secret: secret.into(),
            expire_minutes,
        }
    }

    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        let exp = (Utc::now() + Duration::minutes(self.expire_minutes)).timestamp();
        let claims = Claims { sub: user_id, exp };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(TokenError::Encode)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(TokenError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_verify_round_trip() {
        let manager = TokenManager::new("test-secret", 60);

        let token = manager.issue(42).unwrap();
        let claims = manager.verify(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let manager = TokenManager::new("test-secret", 60);
        assert!(manager.verify("invalid.token.here").is_err());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = TokenManager::new("secret-a", 60);
        let verifier = TokenManager::new("secret-b", 60);

        let token = issuer.issue(1).unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let manager = TokenManager::new("test-secret", -5);

        let token = manager.issue(1).unwrap();
        assert!(manager.verify(&token).is_err());
    }
}
