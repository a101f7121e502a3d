//! Bearer-token mint/verify (HS256, shared secret).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Bearer-token TTL in days.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Caller role carried in the token's `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Patient,
}

/// Claims embedded in a bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the caller's prefixed ULID.
    pub id: String,
    /// Caller role, serialized as `type`.
    #[serde(rename = "type")]
    pub role: Role,
    /// Issued-at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}

/// Mint a signed bearer token for the given identity and role.
pub fn mint(secret: &str, id: &str, role: Role) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        id: id.to_string(),
        role,
        iat: now.timestamp(),
        exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| {
        tracing::error!(?err, "failed to mint token");
        ApiError::internal("Failed to mint token")
    })
}

/// Verify a token's signature and expiry against the shared secret.
pub fn verify(secret: &str, token: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::unauthorized("Invalid or expired token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn mint_and_verify_roundtrip() {
        let token = mint(SECRET, "adm_1", Role::Admin).unwrap();
        let claims = verify(SECRET, &token).unwrap();
        assert_eq!(claims.id, "adm_1");
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn role_serializes_as_type_claim() {
        let token = mint(SECRET, "doc_1", Role::Doctor).unwrap();
        // Decode the payload segment without verifying to inspect the raw claim.
        use base64::Engine as _;
        let payload = token.split('.').nth(1).unwrap();
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(payload)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["type"], "doctor");
        assert_eq!(value["id"], "doc_1");
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let token = mint(SECRET, "pat_1", Role::Patient).unwrap();
        assert!(verify("other-secret", &token).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        assert!(verify(SECRET, "not-a-token").is_err());
    }

    #[test]
    fn verify_rejects_expired() {
        let now = Utc::now();
        let claims = Claims {
            id: "adm_old".to_string(),
            role: Role::Admin,
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(verify(SECRET, &token).is_err());
    }
}
