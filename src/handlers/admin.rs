//! Account approval and blocking. Admin-only; the `AdminUser` extractor
//! is the role gate.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::AppState;
use crate::auth::AdminUser;
use crate::domain::{Account, AccountStatus};
use crate::error::AppError;
use crate::ports::AccountRepository;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ActivateRequest {
    /// Balance seeded when the account becomes active.
    pub initial_balance: i64,
}

#[utoipa::path(
    post,
    path = "/admin/accounts/{id}/activate",
    params(("id" = Uuid, Path, description = "Account id")),
    request_body = ActivateRequest,
    responses(
        (status = 200, description = "Account activated", body = Account),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Unknown account"),
        (status = 409, description = "Account is not pending approval")
    ),
    security(("bearer_token" = [])),
    tag = "Admin"
)]
pub async fn activate_account(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ActivateRequest>,
) -> Result<Json<Account>, AppError> {
    if payload.initial_balance < 0 {
        return Err(AppError::Validation(
            "initial_balance must be non-negative".to_string(),
        ));
    }

    let account = state.accounts.activate(id, payload.initial_balance).await?;

    tracing::info!(
        account_id = %account.id,
        approved_by = %admin.account_id,
        initial_balance = payload.initial_balance,
        "account activated"
    );

    Ok(Json(account))
}

#[utoipa::path(
    post,
    path = "/admin/accounts/{id}/block",
    params(("id" = Uuid, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account blocked", body = Account),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Unknown account")
    ),
    security(("bearer_token" = [])),
    tag = "Admin"
)]
pub async fn block_account(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Account>, AppError> {
    let account = state
        .accounts
        .set_status(id, AccountStatus::Blocked)
        .await?;

    tracing::info!(
        account_id = %account.id,
        blocked_by = %admin.account_id,
        "account blocked"
    );

    Ok(Json(account))
}
