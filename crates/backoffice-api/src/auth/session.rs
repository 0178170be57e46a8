use crate::error::HttpAppError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use backoffice_core::AppError;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // user id at the auth provider
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Authenticated caller, stored in request extensions by the session middleware
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: String,
    pub email: Option<String>,
}

/// Verifies session tokens against the shared secret
#[derive(Clone)]
pub struct SessionVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validate and decode a session token
    pub fn verify(&self, token: &str) -> Result<CallerIdentity, AppError> {
        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!("Session validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::Unauthorized("Session has expired".to_string())
                    }
                    _ => AppError::Unauthorized("Invalid session".to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.sub.trim().is_empty() {
            return Err(AppError::Unauthorized("Invalid session".to_string()));
        }

        Ok(CallerIdentity {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

/// Requires a session; rejects with 401 otherwise.
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .ok_or_else(|| HttpAppError(AppError::Unauthorized("Unauthorized".to_string())))
    }
}

/// Session if present; never rejects.
#[derive(Debug, Clone)]
pub struct MaybeCaller(pub Option<CallerIdentity>);

impl<S> FromRequestParts<S> for MaybeCaller
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeCaller(parts.extensions.get::<CallerIdentity>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as i64
    }

    fn token(secret: &str, sub: &str, exp: i64) -> String {
        let claims = SessionClaims {
            sub: sub.to_string(),
            exp,
            iat: Some(now()),
            email: Some("editor@example.org".to_string()),
            name: None,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn accepts_token_signed_with_shared_secret() {
        let verifier = SessionVerifier::new(SECRET);
        let identity = verifier.verify(&token(SECRET, "user-1", now() + 3600)).unwrap();
        assert_eq!(identity.user_id, "user-1");
        assert_eq!(identity.email.as_deref(), Some("editor@example.org"));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let verifier = SessionVerifier::new(SECRET);
        let other = "fedcba9876543210fedcba9876543210";
        assert!(verifier.verify(&token(other, "user-1", now() + 3600)).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let verifier = SessionVerifier::new(SECRET);
        let err = verifier
            .verify(&token(SECRET, "user-1", now() - 60))
            .unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized: Session has expired");
    }

    #[test]
    fn rejects_blank_subject_and_garbage() {
        let verifier = SessionVerifier::new(SECRET);
        assert!(verifier.verify(&token(SECRET, " ", now() + 3600)).is_err());
        assert!(verifier.verify("not.a.jwt").is_err());
    }
}
