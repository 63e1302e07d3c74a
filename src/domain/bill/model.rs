//! Bill domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::shared::errors::DomainError;

/// Type of electricity connection, determines the tariff slab table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionType {
    Domestic,
    Commercial,
    Industrial,
}

impl ConnectionType {
    /// Parse a connection type from its wire representation.
    ///
    /// Anything outside the three known values is a data error and fails
    /// before the tariff calculator is ever invoked.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "domestic" => Ok(Self::Domestic),
            "commercial" => Ok(Self::Commercial),
            "industrial" => Ok(Self::Industrial),
            other => Err(DomainError::InvalidConnectionType(other.to_string())),
        }
    }
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domestic => write!(f, "domestic"),
            Self::Commercial => write!(f, "commercial"),
            Self::Industrial => write!(f, "industrial"),
        }
    }
}

/// Payment status of a bill
///
/// Starts at `NotPaid`; moves to `Paid` via payment confirmation or manual
/// override and never transitions back automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillStatus {
    NotPaid,
    Paid,
}

impl Default for BillStatus {
    fn default() -> Self {
        Self::NotPaid
    }
}

impl BillStatus {
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Not Paid" => Ok(Self::NotPaid),
            "Paid" => Ok(Self::Paid),
            other => Err(DomainError::Validation {
                field: "status",
                message: format!("unknown bill status: {}", other),
            }),
        }
    }
}

impl std::fmt::Display for BillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPaid => write!(f, "Not Paid"),
            Self::Paid => write!(f, "Paid"),
        }
    }
}

/// An electricity bill
#[derive(Debug, Clone)]
pub struct Bill {
    /// Unique bill ID, assigned at creation
    pub bill_id: String,
    /// Owning user, every read and mutation is scoped by it
    pub owner_id: String,
    pub consumer_name: String,
    /// Not unique: a meter accumulates many historical bills
    pub meter_number: String,
    pub connection_type: ConnectionType,
    pub units_consumed: i32,
    /// Amount computed by the tariff calculator at creation time.
    /// Cached, never recomputed even if tariff rates change later.
    pub amount: Decimal,
    pub status: BillStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Optional, composable filters for listing bills
#[derive(Debug, Clone, Default)]
pub struct BillFilter {
    /// Case-insensitive substring match on consumer name or meter number
    pub search: Option<String>,
    pub status: Option<BillStatus>,
    pub connection_type: Option<ConnectionType>,
}

/// Aggregate statistics over all bills of one owner
#[derive(Debug, Clone, PartialEq)]
pub struct BillStats {
    pub total_bills: u32,
    pub paid_bills: u32,
    pub unpaid_bills: u32,
    pub total_amount: Decimal,
}

// ── Tests ──────────────────────────────────────────────────────
