//! Registration and login.
//!
//! Login is the only place a raw credential is exchanged for an
//! identity; everything past here works with verified bearer tokens.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::AppState;
use crate::auth::{issue_token, pin};
use crate::domain::{Account, AccountStatus, Role};
use crate::error::AppError;
use crate::ports::{AccountRepository, NewAccount};
use crate::validation::{
    sanitize_string, validate_email, validate_name, validate_phone, validate_pin,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub pin: String,
}

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, pending approval", body = Account),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email or phone already registered")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_name(&payload.name).map_err(|e| AppError::Validation(e.to_string()))?;
    validate_email(&payload.email).map_err(|e| AppError::Validation(e.to_string()))?;
    validate_phone(&payload.phone).map_err(|e| AppError::Validation(e.to_string()))?;
    validate_pin(&payload.pin).map_err(|e| AppError::Validation(e.to_string()))?;

    if payload.role == Role::Admin {
        return Err(AppError::Validation(
            "role must be customer or agent".to_string(),
        ));
    }

    let pin_hash = pin::hash_pin(&payload.pin)
        .map_err(|e| AppError::Internal(format!("failed to hash pin: {}", e)))?;

    let account = state
        .accounts
        .insert(NewAccount {
            id: Uuid::new_v4(),
            name: sanitize_string(&payload.name),
            email: sanitize_string(&payload.email),
            phone: sanitize_string(&payload.phone),
            role: payload.role,
            pin_hash,
        })
        .await?;

    tracing::info!(account_id = %account.id, role = ?account.role, "account registered");

    Ok((StatusCode::CREATED, Json(account)))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email_or_phone: String,
    pub pin: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub account: Account,
}

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials or blocked account")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let contact = sanitize_string(&payload.email_or_phone);

    // Unknown contact and wrong PIN produce the same response, so the
    // endpoint cannot be used to probe which contacts exist.
    let account = state
        .accounts
        .find_by_contact(&contact)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_string()))?;

    if !pin::verify_pin(&payload.pin, &account.pin_hash) {
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    }

    if account.status == AccountStatus::Blocked {
        return Err(AppError::Unauthorized("account is blocked".to_string()));
    }

    let token = issue_token(&state.config.jwt_secret, account.id, account.role)
        .map_err(|_| AppError::Internal("failed to issue token".to_string()))?;

    Ok(Json(LoginResponse { token, account }))
}
