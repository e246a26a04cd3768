//! Transaction record domain entity.
//!
//! A record is written exactly once, at commit time, and never mutated.
//! Counterparty name/contact are stored as snapshots so that a later
//! profile edit cannot rewrite history.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

pub const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct TransactionRecord {
    /// Externally-facing identifier, distinct from account ids.
    pub transaction_id: String,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub sender_name: String,
    pub sender_contact: String,
    pub receiver_name: String,
    pub receiver_contact: String,
    /// Amount credited to the receiver. The sender was debited
    /// `amount + fee`.
    pub amount: i64,
    pub fee: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
