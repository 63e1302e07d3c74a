//! External concerns: database, in-memory storage, crypto

pub mod crypto;
pub mod database;
pub mod storage;

pub use database::{init_database, DatabaseConfig, SeaOrmBillRepository};
pub use storage::InMemoryBillRepository;
