//! Postgres implementation of TransferStore.
//!
//! The transfer unit runs inside one database transaction. Both account
//! rows are locked `FOR UPDATE` in ascending id order, so two transfers
//! over the same pair in opposite directions cannot deadlock. The debit
//! itself is a conditional decrement: it only applies while the balance
//! still covers it, which is what serializes concurrent spends from the
//! same account.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::TransactionRecord;
use crate::ports::{StoreError, StoreResult, TransferExecution, TransferStore};

#[derive(Clone)]
pub struct PostgresTransferStore {
    pool: PgPool,
}

impl PostgresTransferStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransferStore for PostgresTransferStore {
    async fn execute(&self, plan: TransferExecution) -> StoreResult<TransactionRecord> {
        let total_debit = plan.amount + plan.fee;

        let mut tx = self.pool.begin().await?;

        // Deterministic lock order across both rows.
        sqlx::query("SELECT id FROM accounts WHERE id = ANY($1) ORDER BY id FOR UPDATE")
            .bind(vec![plan.sender_id, plan.receiver_id])
            .fetch_all(&mut *tx)
            .await?;

        let debited = sqlx::query(
            "UPDATE accounts SET balance = balance - $1 WHERE id = $2 AND balance >= $1",
        )
        .bind(total_debit)
        .bind(plan.sender_id)
        .execute(&mut *tx)
        .await?;

        if debited.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(StoreError::InsufficientBalance);
        }

        let credited = sqlx::query("UPDATE accounts SET balance = balance + $1 WHERE id = $2")
            .bind(plan.amount)
            .bind(plan.receiver_id)
            .execute(&mut *tx)
            .await?;

        if credited.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(StoreError::NotFound(format!(
                "receiver account {} not found",
                plan.receiver_id
            )));
        }

        let record = sqlx::query_as::<_, TransactionRecord>(
            r#"
            INSERT INTO transactions (
                transaction_id, sender_id, receiver_id,
                sender_name, sender_contact, receiver_name, receiver_contact,
                amount, fee, status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, 'success')
            RETURNING *
            "#,
        )
        .bind(&plan.transaction_id)
        .bind(plan.sender_id)
        .bind(plan.receiver_id)
        .bind(&plan.sender.name)
        .bind(&plan.sender.contact)
        .bind(&plan.receiver.name)
        .bind(&plan.receiver.contact)
        .bind(plan.amount)
        .bind(plan.fee)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::DuplicateTransactionId
            }
            other => StoreError::Database(other),
        })?;

        tx.commit().await?;
        Ok(record)
    }

    async fn history_for(
        &self,
        account_id: Uuid,
        limit: i64,
    ) -> StoreResult<Vec<TransactionRecord>> {
        let records = sqlx::query_as::<_, TransactionRecord>(
            r#"
            SELECT * FROM transactions
            WHERE sender_id = $1 OR receiver_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(account_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> StoreResult<Option<TransactionRecord>> {
        let record = sqlx::query_as::<_, TransactionRecord>(
            "SELECT * FROM transactions WHERE transaction_id = $1",
        )
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
