//! Postgres implementation of AccountRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Account, AccountStatus};
use crate::ports::{AccountRepository, NewAccount, StoreError, StoreResult};

#[derive(Clone)]
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn insert(&self, account: NewAccount) -> StoreResult<Account> {
        let row = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (id, name, email, phone, role, status, balance, pin_hash)
            VALUES ($1, $2, $3, $4, $5, 'pending', 0, $6)
            RETURNING *
            "#,
        )
        .bind(account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.phone)
        .bind(account.role)
        .bind(&account.pin_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict("email or phone already registered".to_string())
            }
            other => StoreError::Database(other),
        })?;

        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Account>> {
        let row = sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn find_by_contact(&self, contact: &str) -> StoreResult<Option<Account>> {
        let row =
            sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1 OR phone = $1")
                .bind(contact)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row)
    }

    async fn activate(&self, id: Uuid, initial_balance: i64) -> StoreResult<Account> {
        let row = sqlx::query_as::<_, Account>(
            r#"
            UPDATE accounts SET status = 'active', balance = $2
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(initial_balance)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(account) => Ok(account),
            None => match self.find_by_id(id).await? {
                Some(_) => Err(StoreError::Conflict(format!(
                    "account {} is not pending approval",
                    id
                ))),
                None => Err(StoreError::NotFound(format!("account {} not found", id))),
            },
        }
    }

    async fn set_status(&self, id: Uuid, status: AccountStatus) -> StoreResult<Account> {
        let row = sqlx::query_as::<_, Account>(
            "UPDATE accounts SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| StoreError::NotFound(format!("account {} not found", id)))
    }
}
