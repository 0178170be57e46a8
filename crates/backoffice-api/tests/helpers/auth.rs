use backoffice_api::auth::SessionClaims;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::time::{SystemTime, UNIX_EPOCH};

pub const TEST_AUTH_SECRET: &str = "test-auth-secret-0123456789abcdef";

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock after epoch")
        .as_secs() as i64
}

fn sign(claims: &SessionClaims, secret: &str) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign session token")
}

fn claims(user_id: &str, exp: i64) -> SessionClaims {
    SessionClaims {
        sub: user_id.to_string(),
        exp,
        iat: Some(now()),
        email: Some(format!("{}@example.org", user_id)),
        name: None,
    }
}

/// `Authorization` header value for a valid one-hour session
pub fn bearer(user_id: &str) -> String {
    format!("Bearer {}", sign(&claims(user_id, now() + 3600), TEST_AUTH_SECRET))
}

pub fn expired_bearer(user_id: &str) -> String {
    format!("Bearer {}", sign(&claims(user_id, now() - 60), TEST_AUTH_SECRET))
}

pub fn forged_bearer(user_id: &str) -> String {
    format!(
        "Bearer {}",
        sign(
            &claims(user_id, now() + 3600),
            "some-other-secret-0123456789abcdef"
        )
    )
}
