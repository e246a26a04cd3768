use axum::{Json, extract::State};

use crate::AppState;
use crate::auth::AuthUser;
use crate::domain::{Role, TransactionRecord};
use crate::error::AppError;
use crate::ports::TransferStore;

// Page sizes are presentation policy.
const AGENT_PAGE_SIZE: i64 = 10;
const DEFAULT_PAGE_SIZE: i64 = 20;

#[utoipa::path(
    get,
    path = "/history",
    responses(
        (status = 200, description = "Caller's transactions, most recent first", body = [TransactionRecord]),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_token" = [])),
    tag = "Transfer"
)]
pub async fn history(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<TransactionRecord>>, AppError> {
    let limit = match identity.role {
        Role::Agent => AGENT_PAGE_SIZE,
        _ => DEFAULT_PAGE_SIZE,
    };

    let records = state.store.history_for(identity.account_id, limit).await?;

    Ok(Json(records))
}
