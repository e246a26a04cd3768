//! Transfer engine.
//!
//! Validates a transfer request and executes it through the store's
//! atomic unit. Every check runs before any mutation; a rejected request
//! leaves no durable trace. The engine holds no locks of its own, so
//! isolation between concurrent transfers is entirely the store's job.

use rand::Rng;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::pin;
use crate::domain::{AccountStatus, TransactionRecord};
use crate::ports::{
    AccountRepository, PartySnapshot, StoreError, TransferExecution, TransferStore,
};

/// Flat fee charged to the sender on amounts above the threshold.
pub const TRANSFER_FEE: i64 = 5;
pub const FEE_THRESHOLD: i64 = 100;

const TRANSACTION_ID_LEN: usize = 10;
const MAX_ID_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("amount must be a positive integer")]
    InvalidAmount,

    #[error("receiver is not an eligible transfer destination")]
    ReceiverNotEligible,

    #[error("invalid credentials")]
    InvalidCredential,

    #[error("cannot transfer to your own account")]
    SelfTransferDenied,

    #[error("insufficient balance")]
    InsufficientBalance,

    #[error("transfer could not be completed")]
    Failed(#[source] StoreError),
}

#[derive(Clone)]
pub struct TransferEngine {
    accounts: Arc<dyn AccountRepository>,
    store: Arc<dyn TransferStore>,
}

impl TransferEngine {
    pub fn new(accounts: Arc<dyn AccountRepository>, store: Arc<dyn TransferStore>) -> Self {
        Self { accounts, store }
    }

    /// Execute a transfer from the authenticated caller to the account
    /// resolved by `receiver_contact`.
    ///
    /// Preconditions are checked in a fixed order, each with its own
    /// error, before the atomic unit opens:
    /// positive amount, eligible receiver, PIN, no self-transfer,
    /// covering balance.
    pub async fn transfer(
        &self,
        caller_id: Uuid,
        receiver_contact: &str,
        amount: i64,
        supplied_pin: &str,
    ) -> Result<TransactionRecord, TransferError> {
        if amount <= 0 {
            return Err(TransferError::InvalidAmount);
        }

        let receiver = self
            .accounts
            .find_by_contact(receiver_contact)
            .await
            .map_err(TransferError::Failed)?;

        let receiver = match receiver {
            Some(account)
                if account.status == AccountStatus::Active
                    && account.role.can_receive_transfers() =>
            {
                account
            }
            _ => return Err(TransferError::ReceiverNotEligible),
        };

        // A valid token whose account row is gone is treated as a bad
        // credential; nothing has been charged.
        let caller = self
            .accounts
            .find_by_id(caller_id)
            .await
            .map_err(TransferError::Failed)?
            .ok_or(TransferError::InvalidCredential)?;

        if !pin::verify_pin(supplied_pin, &caller.pin_hash) {
            return Err(TransferError::InvalidCredential);
        }

        if caller.id == receiver.id {
            return Err(TransferError::SelfTransferDenied);
        }

        let fee = if amount > FEE_THRESHOLD { TRANSFER_FEE } else { 0 };
        let total_debit = amount
            .checked_add(fee)
            .ok_or(TransferError::InvalidAmount)?;

        // Early rejection with the caller's last observed balance. The
        // conditional debit inside the atomic unit re-checks, so a
        // concurrent spend cannot slip past this.
        if caller.balance < total_debit {
            return Err(TransferError::InsufficientBalance);
        }

        let mut attempts = 0;
        loop {
            let plan = TransferExecution {
                transaction_id: generate_transaction_id(),
                sender_id: caller.id,
                receiver_id: receiver.id,
                sender: PartySnapshot {
                    name: caller.name.clone(),
                    contact: caller.phone.clone(),
                },
                receiver: PartySnapshot {
                    name: receiver.name.clone(),
                    contact: receiver.phone.clone(),
                },
                amount,
                fee,
            };

            match self.store.execute(plan).await {
                Ok(record) => {
                    tracing::info!(
                        transaction_id = %record.transaction_id,
                        amount,
                        fee,
                        "transfer committed"
                    );
                    return Ok(record);
                }
                Err(StoreError::InsufficientBalance) => {
                    return Err(TransferError::InsufficientBalance);
                }
                Err(StoreError::DuplicateTransactionId) if attempts + 1 < MAX_ID_ATTEMPTS => {
                    attempts += 1;
                    tracing::warn!(attempts, "transaction id collision, regenerating");
                }
                Err(err) => return Err(TransferError::Failed(err)),
            }
        }
    }
}

/// Externally-facing transaction id: 10 decimal digits. The log enforces
/// uniqueness; the engine regenerates on conflict.
fn generate_transaction_id() -> String {
    let mut rng = rand::thread_rng();
    (0..TRANSACTION_ID_LEN)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}
