//! Core business entities, types and traits

pub mod bill;
pub mod tariff;

pub use bill::{Bill, BillFilter, BillRepository, BillStats, BillStatus, ConnectionType};
pub use tariff::{compute_amount, rate_sheet, RateSlab};

pub use crate::shared::errors::{DomainError, DomainResult};
