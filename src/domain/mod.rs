pub mod account;
pub mod transaction;

pub use account::{Account, AccountStatus, Role};
pub use transaction::TransactionRecord;
