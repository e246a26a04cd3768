use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::AppState;
use crate::auth::AuthUser;
use crate::domain::TransactionRecord;
use crate::error::AppError;
use crate::ports::TransferStore;
use crate::services::transfer::TransferError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequest {
    /// Receiver's email or phone number.
    pub receiver: String,
    /// Amount in the smallest currency unit.
    pub amount: i64,
    pub pin: String,
}

#[utoipa::path(
    post,
    path = "/transfer",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer committed", body = TransactionRecord),
        (status = 400, description = "Malformed amount"),
        (status = 401, description = "PIN verification failed"),
        (status = 404, description = "Receiver not eligible"),
        (status = 405, description = "Self transfer denied"),
        (status = 406, description = "Insufficient balance"),
        (status = 500, description = "Transfer failed, no effect persisted")
    ),
    security(("bearer_token" = [])),
    tag = "Transfer"
)]
pub async fn send_money(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(payload): Json<TransferRequest>,
) -> Result<Json<TransactionRecord>, TransferError> {
    let record = state
        .engine
        .transfer(
            identity.account_id,
            &payload.receiver,
            payload.amount,
            &payload.pin,
        )
        .await?;

    Ok(Json(record))
}

#[utoipa::path(
    get,
    path = "/transactions/{transaction_id}",
    params(
        ("transaction_id" = String, Path, description = "Externally-facing transaction id")
    ),
    responses(
        (status = 200, description = "Transaction record", body = TransactionRecord),
        (status = 404, description = "Unknown transaction id")
    ),
    security(("bearer_token" = [])),
    tag = "Transfer"
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    AuthUser(_identity): AuthUser,
    Path(transaction_id): Path<String>,
) -> Result<Json<TransactionRecord>, AppError> {
    let record = state
        .store
        .find_by_transaction_id(&transaction_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("transaction {} not found", transaction_id)))?;

    Ok(Json(record))
}
