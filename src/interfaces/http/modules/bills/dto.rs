//! Bill DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Bill, BillFilter, BillStats, BillStatus, ConnectionType};
use crate::shared::errors::DomainResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenerateBillRequest {
    #[validate(length(min = 1, max = 255, message = "consumer name is required"))]
    pub consumer_name: String,
    #[validate(length(min = 1, max = 64, message = "meter number is required"))]
    pub meter_number: String,
    /// One of `domestic`, `commercial`, `industrial`
    #[validate(length(min = 1, max = 20, message = "connection type is required"))]
    pub connection_type: String,
    #[validate(range(min = 0, message = "units consumed must be non-negative"))]
    pub units_consumed: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BillDto {
    pub bill_id: String,
    pub consumer_name: String,
    pub meter_number: String,
    pub connection_type: String,
    pub units_consumed: i32,
    #[schema(value_type = String, example = "575.00")]
    pub amount: Decimal,
    /// `Not Paid` or `Paid`
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Bill> for BillDto {
    fn from(bill: Bill) -> Self {
        Self {
            bill_id: bill.bill_id,
            consumer_name: bill.consumer_name,
            meter_number: bill.meter_number,
            connection_type: bill.connection_type.to_string(),
            units_consumed: bill.units_consumed,
            amount: bill.amount,
            status: bill.status.to_string(),
            created_at: bill.created_at,
            updated_at: bill.updated_at,
        }
    }
}

/// Query parameters for listing bills. All filters are optional and
/// combine with AND semantics.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListBillsQuery {
    /// Filter by payment status: `Not Paid` or `Paid`
    pub status: Option<String>,
    /// Filter by connection type: `domestic`, `commercial` or `industrial`
    pub connection_type: Option<String>,
    /// Case-insensitive substring match on consumer name or meter number
    pub search: Option<String>,
}

impl ListBillsQuery {
    pub fn into_filter(self) -> DomainResult<BillFilter> {
        let status = self.status.as_deref().map(BillStatus::parse).transpose()?;
        let connection_type = self
            .connection_type
            .as_deref()
            .map(ConnectionType::parse)
            .transpose()?;
        let search = self
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(BillFilter {
            search,
            status,
            connection_type,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BillStatsDto {
    pub total_bills: u32,
    pub paid_bills: u32,
    pub unpaid_bills: u32,
    #[schema(value_type = String, example = "1250.00")]
    pub total_amount: Decimal,
}

impl From<BillStats> for BillStatsDto {
    fn from(stats: BillStats) -> Self {
        Self {
            total_bills: stats.total_bills,
            paid_bills: stats.paid_bills,
            unpaid_bills: stats.unpaid_bills,
            total_amount: stats.total_amount,
        }
    }
}

/// Outcome reported by the payment gateway for a bill.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PaymentResultRequest {
    pub succeeded: bool,
    /// Gateway-supplied failure reason, ignored on success
    #[validate(length(max = 255))]
    pub reason: Option<String>,
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_yields_empty_filter() {
        let filter = ListBillsQuery::default().into_filter().unwrap();
        assert!(filter.search.is_none());
        assert!(filter.status.is_none());
        assert!(filter.connection_type.is_none());
    }

    #[test]
    fn query_values_are_parsed() {
        let query = ListBillsQuery {
            status: Some("Paid".to_string()),
            connection_type: Some("domestic".to_string()),
            search: Some("  mtr-42  ".to_string()),
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.status, Some(BillStatus::Paid));
        assert_eq!(filter.connection_type, Some(ConnectionType::Domestic));
        assert_eq!(filter.search.as_deref(), Some("mtr-42"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let query = ListBillsQuery {
            status: Some("Overdue".to_string()),
            ..Default::default()
        };
        assert!(query.into_filter().is_err());
    }

    #[test]
    fn blank_search_is_dropped() {
        let query = ListBillsQuery {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        let filter = query.into_filter().unwrap();
        assert!(filter.search.is_none());
    }
}
