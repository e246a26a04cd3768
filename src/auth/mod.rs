//! Authorization gate.
//!
//! Bearer tokens are verified before a handler runs; handlers receive a
//! typed `Identity` and never see the raw credential. Role-gated routes
//! take the `AdminUser` extractor instead of checking roles inline.

pub mod pin;

use axum::{
    Json,
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::domain::Role;

const TOKEN_TTL_HOURS: i64 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: String,
    pub role: Role,
    pub exp: usize,
    pub iat: usize,
}

/// A verified caller identity. This is all the core trusts; it does not
/// re-verify the credential.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub account_id: Uuid,
    pub role: Role,
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    Forbidden,
    TokenCreation,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing bearer token"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
            AuthError::Forbidden => (StatusCode::FORBIDDEN, "Admin privileges required"),
            AuthError::TokenCreation => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue token")
            }
        };

        tracing::warn!("authentication failed: {:?}", self);
        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}

pub fn issue_token(secret: &str, account_id: Uuid, role: Role) -> Result<String, AuthError> {
    let now = Utc::now();
    let expiration = now + Duration::hours(TOKEN_TTL_HOURS);

    let claims = Claims {
        sub: account_id.to_string(),
        role,
        exp: expiration.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::TokenCreation)
}

pub fn verify_token(secret: &str, token: &str) -> Result<Identity, AuthError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);
    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|_| AuthError::InvalidToken)?;

    let account_id = token_data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::InvalidToken)?;

    Ok(Identity {
        account_id,
        role: token_data.claims.role,
    })
}

/// Extractor for any authenticated caller.
pub struct AuthUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(AuthError::MissingToken)?;

        let identity = verify_token(&state.config.jwt_secret, token)?;
        Ok(AuthUser(identity))
    }
}

/// Extractor for admin-only routes.
pub struct AdminUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;
        if identity.role != Role::Admin {
            return Err(AuthError::Forbidden);
        }
        Ok(AdminUser(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issue_then_verify_roundtrip() {
        let account_id = Uuid::new_v4();
        let token = issue_token(SECRET, account_id, Role::Agent).unwrap();
        let identity = verify_token(SECRET, &token).unwrap();

        assert_eq!(identity.account_id, account_id);
        assert_eq!(identity.role, Role::Agent);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(SECRET, Uuid::new_v4(), Role::Customer).unwrap();
        assert!(matches!(
            verify_token("other-secret", &token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            verify_token(SECRET, "not.a.jwt"),
            Err(AuthError::InvalidToken)
        ));
    }
}
