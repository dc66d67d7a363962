//! Bearer-token authentication: claims, token issuance/verification, and the
//! request extractor for the authenticated resident.

use axum::{extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::server::{error::auth::AuthError, error::Error, model::app::AppState};

/// Header carrying the opaque signed token.
pub static ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Fixed validity window for issued tokens.
const TOKEN_VALIDITY_DAYS: i64 = 30;

#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    /// Resident id.
    pub sub: i32,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn new(resident_id: i32) -> Self {
        let now = chrono::Utc::now();
        let expires = now + chrono::Duration::days(TOKEN_VALIDITY_DAYS);

        Self {
            sub: resident_id,
            iat: now.timestamp() as usize,
            exp: expires.timestamp() as usize,
        }
    }
}

/// Issues a signed token carrying the resident id, valid for 30 days.
pub fn issue_token(resident_id: i32, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        &Claims::new(resident_id),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verifies a token's signature and expiry, returning its claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })
}

/// The authenticated resident, extracted from the `x-access-token` header.
///
/// Handlers that require authentication take this as an argument; requests
/// without a valid token are rejected with 401 before the handler runs.
#[derive(Clone, Copy, Debug)]
pub struct CurrentResident {
    pub resident_id: i32,
}

impl FromRequestParts<AppState> for CurrentResident {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Error> {
        let token = parts
            .headers
            .get(ACCESS_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let claims = verify_token(token, &state.jwt_secret)?;

        Ok(CurrentResident {
            resident_id: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static SECRET: &str = "test-secret";

    #[test]
    fn issued_token_round_trips() {
        let token = issue_token(42, SECRET).unwrap();

        let claims = verify_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = issue_token(42, "other-secret").unwrap();

        let result = verify_token(&token, SECRET);

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let result = verify_token("not-a-token", SECRET);

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
