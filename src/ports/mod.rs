//! Port traits for the storage layer.
//!
//! These traits define the storage interface consumed by the transfer
//! engine and the HTTP handlers. Implementations live in `adapters`;
//! tests substitute in-memory instances.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Account, AccountStatus, Role, TransactionRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// The conditional debit found less than the required balance at
    /// commit time.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The generated transaction id already exists in the log.
    #[error("duplicate transaction id")]
    DuplicateTransactionId,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Input for creating an account. Ids are assigned by the caller so the
/// engine and tests control identity.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub pin_hash: String,
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account with `pending` status and zero balance.
    async fn insert(&self, account: NewAccount) -> StoreResult<Account>;

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Account>>;

    /// Look an account up by either contact identifier (email or phone).
    async fn find_by_contact(&self, contact: &str) -> StoreResult<Option<Account>>;

    /// Flip a pending account to active and seed its initial balance.
    async fn activate(&self, id: Uuid, initial_balance: i64) -> StoreResult<Account>;

    async fn set_status(&self, id: Uuid, status: AccountStatus) -> StoreResult<Account>;
}

/// Counterparty details captured at transfer time.
#[derive(Debug, Clone)]
pub struct PartySnapshot {
    pub name: String,
    pub contact: String,
}

/// A fully validated transfer, ready to commit. `amount` is credited to
/// the receiver; `amount + fee` is debited from the sender.
#[derive(Debug, Clone)]
pub struct TransferExecution {
    pub transaction_id: String,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub sender: PartySnapshot,
    pub receiver: PartySnapshot,
    pub amount: i64,
    pub fee: i64,
}

#[async_trait]
pub trait TransferStore: Send + Sync {
    /// Apply one transfer as a single atomic unit: debit the sender,
    /// credit the receiver, append the transaction record. All three
    /// effects commit together or none do.
    ///
    /// The debit must be conditional on the sender's current balance, so
    /// a concurrent transfer that drained the account between validation
    /// and commit aborts with `InsufficientBalance` instead of losing an
    /// update.
    async fn execute(&self, plan: TransferExecution) -> StoreResult<TransactionRecord>;

    /// Records where the account is sender or receiver, most recent
    /// first. Ties on `created_at` break by insertion order.
    async fn history_for(
        &self,
        account_id: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<TransactionRecord>>;

    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> StoreResult<Option<TransactionRecord>>;
}
