use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::role::Role;
use crate::models::Claims;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

/// Builds a token with the claim shape the identity provider issues. The
/// service itself never issues tokens; this mirrors the provider for tests
/// and local tooling.
pub fn issue_token(
    subject: &str,
    role: Role,
    student_id: Option<String>,
    secret: &str,
    ttl: usize,
) -> String {
    let claims = Claims {
        sub: subject.to_string(),
        role: role as u8,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        student_id,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}
