pub mod postgres_account_repository;
pub mod postgres_transfer_store;

pub use postgres_account_repository::PostgresAccountRepository;
pub use postgres_transfer_store::PostgresTransferStore;
