//! # PowerBill
//!
//! Slab-tariff electricity billing service with a REST API.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the tariff calculator and repository traits
//! - **application**: Business logic and use cases (bill lifecycle)
//! - **infrastructure**: External concerns (database, in-memory storage, crypto)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Cross-cutting error types and shutdown handling

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, InMemoryBillRepository, SeaOrmBillRepository};

// Re-export API router
pub use interfaces::http::create_api_router;
