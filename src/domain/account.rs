//! Account domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Agent,
    Admin,
}

impl Role {
    /// Agents and admins hold operational accounts and cannot be paid
    /// through the customer transfer flow.
    pub fn can_receive_transfers(&self) -> bool {
        matches!(self, Role::Customer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "account_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Pending,
    Active,
    Blocked,
}

/// A wallet account. `balance` is in the smallest currency unit and is
/// only ever mutated inside the transfer store's atomic unit (plus the
/// one-time seed on activation).
#[derive(Debug, Clone, FromRow, Serialize, ToSchema)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub status: AccountStatus,
    pub balance: i64,
    #[serde(skip_serializing)]
    pub pin_hash: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_customers_receive_transfers() {
        assert!(Role::Customer.can_receive_transfers());
        assert!(!Role::Agent.can_receive_transfers());
        assert!(!Role::Admin.can_receive_transfers());
    }

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Agent).unwrap(), "\"agent\"");
        assert_eq!(
            serde_json::to_string(&AccountStatus::Pending).unwrap(),
            "\"pending\""
        );
    }
}
