use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by an issued token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Identity attached to a request once its token verifies
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub subject: String,
    pub role: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Stateless issuer/verifier for HS256 identity tokens.
///
/// Holds only the keys derived from the process-wide secret; no state is
/// retained between calls.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Sign a token for the given user, valid for the configured window
    pub fn issue(&self, subject: &str, role: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }

    /// Check signature and expiry, returning the embedded identity
    pub fn verify(&self, token: &str) -> Result<AuthContext, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;

        Ok(AuthContext {
            subject: data.claims.sub,
            role: data.claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_verify_roundtrip() {
        let service = TokenService::new(SECRET, 3600);
        let token = service.issue("user-1", "admin").unwrap();

        let ctx = service.verify(&token).unwrap();
        assert_eq!(ctx.subject, "user-1");
        assert_eq!(ctx.role, "admin");
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = TokenService::new(SECRET, 3600);

        assert!(matches!(
            service.verify("not-a-token"),
            Err(TokenError::Invalid(_))
        ));
        assert!(matches!(service.verify(""), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenService::new("other-secret", 3600);
        let verifier = TokenService::new(SECRET, 3600);

        let token = issuer.issue("user-1", "employee").unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = TokenService::new(SECRET, 3600);

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "user-1".to_string(),
            role: "employee".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(service.verify(&token), Err(TokenError::Expired)));
    }
}
