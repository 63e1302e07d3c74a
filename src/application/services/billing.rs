//! Bill lifecycle service
//!
//! Orchestrates the tariff calculator and the bill store: builds a bill
//! from validated input, persists it, and drives status transitions.
//! Every operation takes the owner ID explicitly; the service holds no
//! session state.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::tariff::compute_amount;
use crate::domain::{
    Bill, BillFilter, BillRepository, BillStats, BillStatus, ConnectionType,
};
use crate::shared::errors::{DomainError, DomainResult};

/// Validated input for generating a bill
#[derive(Debug, Clone)]
pub struct GenerateBill {
    pub consumer_name: String,
    pub meter_number: String,
    pub connection_type: String,
    pub units_consumed: i64,
}

pub struct BillingService {
    bills: Arc<dyn BillRepository>,
}

impl BillingService {
    pub fn new(bills: Arc<dyn BillRepository>) -> Self {
        Self { bills }
    }

    /// Create a bill from form input.
    ///
    /// Validation runs before the calculator and before any store call.
    /// The amount is computed once here and cached on the bill.
    pub async fn generate_bill(&self, owner_id: &str, input: GenerateBill) -> DomainResult<Bill> {
        let consumer_name = input.consumer_name.trim();
        if consumer_name.is_empty() {
            return Err(DomainError::validation(
                "consumer_name",
                "consumer name must not be empty",
            ));
        }

        let meter_number = input.meter_number.trim();
        if meter_number.is_empty() {
            return Err(DomainError::validation(
                "meter_number",
                "meter number must not be empty",
            ));
        }

        let connection_type = ConnectionType::parse(input.connection_type.trim()).map_err(
            |_| DomainError::validation(
                "connection_type",
                "connection type must be domestic, commercial or industrial",
            ),
        )?;

        if input.units_consumed < 0 {
            return Err(DomainError::validation(
                "units_consumed",
                "units consumed must be a non-negative integer",
            ));
        }
        let units = i32::try_from(input.units_consumed).map_err(|_| {
            DomainError::validation("units_consumed", "units consumed is out of range")
        })?;

        let amount = compute_amount(units as u32, connection_type);
        let now = Utc::now();

        let bill = Bill {
            bill_id: Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            consumer_name: consumer_name.to_string(),
            meter_number: meter_number.to_string(),
            connection_type,
            units_consumed: units,
            amount,
            status: BillStatus::NotPaid,
            created_at: now,
            updated_at: now,
        };

        let stored = self.bills.insert(bill).await?;
        info!(
            bill_id = stored.bill_id.as_str(),
            units,
            amount = %stored.amount,
            connection_type = %stored.connection_type,
            "Bill generated"
        );
        Ok(stored)
    }

    /// List the owner's bills, newest first. Filters are optional and
    /// composable; an empty result is not an error.
    pub async fn list_bills(&self, owner_id: &str, filter: BillFilter) -> DomainResult<Vec<Bill>> {
        self.bills.find_by_owner(owner_id, &filter).await
    }

    /// Exact meter-number search (trimmed), scoped to the owner.
    pub async fn find_by_meter(
        &self,
        owner_id: &str,
        meter_number: &str,
    ) -> DomainResult<Vec<Bill>> {
        let meter_number = meter_number.trim();
        if meter_number.is_empty() {
            return Err(DomainError::validation(
                "meter_number",
                "meter number must not be empty",
            ));
        }
        self.bills.find_by_meter(owner_id, meter_number).await
    }

    pub async fn get_bill(&self, owner_id: &str, bill_id: &str) -> DomainResult<Bill> {
        self.bills
            .find_by_id(owner_id, bill_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Bill",
                field: "bill_id",
                value: bill_id.to_string(),
            })
    }

    /// Mark a bill as paid. Idempotent: paying an already-paid bill
    /// succeeds without touching the record.
    pub async fn mark_paid(&self, owner_id: &str, bill_id: &str) -> DomainResult<()> {
        self.bills
            .update_status(owner_id, bill_id, BillStatus::Paid)
            .await?;
        info!(bill_id, "Bill marked as paid");
        Ok(())
    }

    /// Record the outcome reported by the payment collaborator.
    ///
    /// Success marks the bill paid; failure surfaces the gateway's reason
    /// to the caller unchanged. No retries here, the user retries.
    pub async fn confirm_payment(
        &self,
        owner_id: &str,
        bill_id: &str,
        succeeded: bool,
        reason: Option<String>,
    ) -> DomainResult<()> {
        if !succeeded {
            let reason = reason.unwrap_or_else(|| "payment was not completed".to_string());
            info!(bill_id, reason = reason.as_str(), "Payment failed");
            return Err(DomainError::PaymentFailed(reason));
        }
        self.mark_paid(owner_id, bill_id).await
    }

    pub async fn delete_bill(&self, owner_id: &str, bill_id: &str) -> DomainResult<()> {
        self.bills.delete(owner_id, bill_id).await?;
        info!(bill_id, "Bill deleted");
        Ok(())
    }

    /// Aggregate statistics computed from the full list, not a DB
    /// aggregate. Fine at consumer scale.
    pub async fn bill_stats(&self, owner_id: &str) -> DomainResult<BillStats> {
        let bills = self
            .bills
            .find_by_owner(owner_id, &BillFilter::default())
            .await?;

        let total_bills = bills.len() as u32;
        let paid_bills = bills
            .iter()
            .filter(|b| b.status == BillStatus::Paid)
            .count() as u32;
        let total_amount = bills.iter().map(|b| b.amount).sum();

        Ok(BillStats {
            total_bills,
            paid_bills,
            unpaid_bills: total_bills - paid_bills,
            total_amount,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::memory::InMemoryBillRepository;
    use rust_decimal::Decimal;

    fn service() -> BillingService {
        BillingService::new(Arc::new(InMemoryBillRepository::new()))
    }

    fn input(name: &str, meter: &str, ct: &str, units: i64) -> GenerateBill {
        GenerateBill {
            consumer_name: name.to_string(),
            meter_number: meter.to_string(),
            connection_type: ct.to_string(),
            units_consumed: units,
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn generate_bill_computes_and_caches_amount() {
        let svc = service();
        let bill = svc
            .generate_bill("owner-1", input("Asha", "MTR-001", "domestic", 150))
            .await
            .unwrap();

        assert_eq!(bill.owner_id, "owner-1");
        assert_eq!(bill.units_consumed, 150);
        assert_eq!(bill.connection_type, ConnectionType::Domestic);
        // 100*3.5 + 50*4.5
        assert_eq!(bill.amount, dec("575.00"));
        assert_eq!(bill.status, BillStatus::NotPaid);
        assert!(!bill.bill_id.is_empty());
    }

    #[tokio::test]
    async fn generate_bill_trims_string_fields() {
        let svc = service();
        let bill = svc
            .generate_bill("owner-1", input("  Asha  ", " MTR-001 ", "domestic", 10))
            .await
            .unwrap();
        assert_eq!(bill.consumer_name, "Asha");
        assert_eq!(bill.meter_number, "MTR-001");
    }

    #[tokio::test]
    async fn generate_bill_rejects_negative_units_without_persisting() {
        let repo = Arc::new(InMemoryBillRepository::new());
        let svc = BillingService::new(repo.clone());

        let err = svc
            .generate_bill("owner-1", input("Asha", "MTR-001", "domestic", -5))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation { field: "units_consumed", .. }
        ));

        let bills = repo
            .find_by_owner("owner-1", &BillFilter::default())
            .await
            .unwrap();
        assert!(bills.is_empty());
    }

    #[tokio::test]
    async fn generate_bill_rejects_units_above_i32_max_without_persisting() {
        let repo = Arc::new(InMemoryBillRepository::new());
        let svc = BillingService::new(repo.clone());

        // would wrap negative if narrowed with a plain cast
        let err = svc
            .generate_bill("owner-1", input("Asha", "MTR-001", "domestic", 3_000_000_000))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation { field: "units_consumed", .. }
        ));

        let bills = repo
            .find_by_owner("owner-1", &BillFilter::default())
            .await
            .unwrap();
        assert!(bills.is_empty());
    }

    #[tokio::test]
    async fn generate_bill_accepts_i32_max_units() {
        let svc = service();
        let bill = svc
            .generate_bill("owner-1", input("Asha", "MTR-001", "industrial", i32::MAX as i64))
            .await
            .unwrap();
        assert_eq!(bill.units_consumed, i32::MAX);
        assert!(bill.amount > Decimal::ZERO);
    }

    #[tokio::test]
    async fn generate_bill_rejects_blank_fields() {
        let svc = service();
        let err = svc
            .generate_bill("owner-1", input("   ", "MTR-001", "domestic", 10))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation { field: "consumer_name", .. }
        ));

        let err = svc
            .generate_bill("owner-1", input("Asha", "", "domestic", 10))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation { field: "meter_number", .. }
        ));
    }

    #[tokio::test]
    async fn generate_bill_rejects_unknown_connection_type() {
        let svc = service();
        let err = svc
            .generate_bill("owner-1", input("Asha", "MTR-001", "agricultural", 10))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Validation { field: "connection_type", .. }
        ));
    }

    #[tokio::test]
    async fn round_trip_preserves_bill_fields() {
        let svc = service();
        let created = svc
            .generate_bill("owner-1", input("Asha", "MTR-001", "commercial", 300))
            .await
            .unwrap();

        let listed = svc
            .list_bills("owner-1", BillFilter::default())
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].amount, created.amount);
        assert_eq!(listed[0].amount, dec("2050.00"));
        assert_eq!(listed[0].units_consumed, 300);
        assert_eq!(listed[0].connection_type, ConnectionType::Commercial);
    }

    #[tokio::test]
    async fn list_bills_status_filter_only_matches_that_status() {
        let svc = service();
        let paid = svc
            .generate_bill("owner-1", input("A", "M-1", "domestic", 10))
            .await
            .unwrap();
        svc.generate_bill("owner-1", input("B", "M-2", "domestic", 20))
            .await
            .unwrap();
        svc.mark_paid("owner-1", &paid.bill_id).await.unwrap();

        let filter = BillFilter {
            status: Some(BillStatus::Paid),
            ..Default::default()
        };
        let bills = svc.list_bills("owner-1", filter).await.unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].bill_id, paid.bill_id);
        assert_eq!(bills[0].status, BillStatus::Paid);
    }

    #[tokio::test]
    async fn list_bills_search_is_case_insensitive_substring() {
        let svc = service();
        svc.generate_bill("owner-1", input("Asha Kumar", "MTR-9", "domestic", 10))
            .await
            .unwrap();
        svc.generate_bill("owner-1", input("Ravi", "KMX-4", "domestic", 10))
            .await
            .unwrap();

        let filter = BillFilter {
            search: Some("KUMAR".to_string()),
            ..Default::default()
        };
        let bills = svc.list_bills("owner-1", filter).await.unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].consumer_name, "Asha Kumar");

        // matches meter number too
        let filter = BillFilter {
            search: Some("kmx".to_string()),
            ..Default::default()
        };
        let bills = svc.list_bills("owner-1", filter).await.unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].meter_number, "KMX-4");
    }

    #[tokio::test]
    async fn list_bills_filters_compose() {
        let svc = service();
        svc.generate_bill("owner-1", input("Asha", "M-1", "domestic", 10))
            .await
            .unwrap();
        let target = svc
            .generate_bill("owner-1", input("Asha", "M-2", "commercial", 10))
            .await
            .unwrap();

        let filter = BillFilter {
            search: Some("asha".to_string()),
            connection_type: Some(ConnectionType::Commercial),
            status: Some(BillStatus::NotPaid),
        };
        let bills = svc.list_bills("owner-1", filter).await.unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].bill_id, target.bill_id);
    }

    #[tokio::test]
    async fn list_bills_empty_match_is_ok_not_error() {
        let svc = service();
        let bills = svc
            .list_bills("owner-1", BillFilter::default())
            .await
            .unwrap();
        assert!(bills.is_empty());
    }

    #[tokio::test]
    async fn find_by_meter_is_owner_scoped_and_newest_first() {
        let svc = service();
        let first = svc
            .generate_bill("owner-1", input("Asha", "MTR-7", "domestic", 10))
            .await
            .unwrap();
        let second = svc
            .generate_bill("owner-1", input("Asha", "MTR-7", "domestic", 20))
            .await
            .unwrap();
        // same meter, different owner: must not leak
        svc.generate_bill("owner-2", input("Ravi", "MTR-7", "domestic", 30))
            .await
            .unwrap();

        let bills = svc.find_by_meter("owner-1", " MTR-7 ").await.unwrap();
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[0].bill_id, second.bill_id);
        assert_eq!(bills[1].bill_id, first.bill_id);
        assert!(bills.iter().all(|b| b.owner_id == "owner-1"));
    }

    #[tokio::test]
    async fn mark_paid_is_idempotent() {
        let svc = service();
        let bill = svc
            .generate_bill("owner-1", input("Asha", "M-1", "domestic", 10))
            .await
            .unwrap();

        svc.mark_paid("owner-1", &bill.bill_id).await.unwrap();
        let after_first = svc.get_bill("owner-1", &bill.bill_id).await.unwrap();
        assert_eq!(after_first.status, BillStatus::Paid);

        // second call succeeds and leaves the record unchanged
        svc.mark_paid("owner-1", &bill.bill_id).await.unwrap();
        let after_second = svc.get_bill("owner-1", &bill.bill_id).await.unwrap();
        assert_eq!(after_second.status, BillStatus::Paid);
        assert_eq!(after_second.updated_at, after_first.updated_at);
    }

    #[tokio::test]
    async fn mark_paid_refreshes_updated_at_on_transition() {
        let svc = service();
        let bill = svc
            .generate_bill("owner-1", input("Asha", "M-1", "domestic", 10))
            .await
            .unwrap();
        svc.mark_paid("owner-1", &bill.bill_id).await.unwrap();
        let paid = svc.get_bill("owner-1", &bill.bill_id).await.unwrap();
        assert!(paid.updated_at > bill.updated_at);
        assert_eq!(paid.created_at, bill.created_at);
    }

    #[tokio::test]
    async fn mark_paid_unknown_bill_is_not_found() {
        let svc = service();
        let err = svc.mark_paid("owner-1", "missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn confirm_payment_failure_surfaces_gateway_reason() {
        let svc = service();
        let bill = svc
            .generate_bill("owner-1", input("Asha", "M-1", "domestic", 10))
            .await
            .unwrap();

        let err = svc
            .confirm_payment(
                "owner-1",
                &bill.bill_id,
                false,
                Some("card declined".to_string()),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::PaymentFailed(ref reason) if reason == "card declined"
        ));

        // bill stays unpaid
        let unchanged = svc.get_bill("owner-1", &bill.bill_id).await.unwrap();
        assert_eq!(unchanged.status, BillStatus::NotPaid);
    }

    #[tokio::test]
    async fn confirm_payment_success_marks_paid() {
        let svc = service();
        let bill = svc
            .generate_bill("owner-1", input("Asha", "M-1", "domestic", 10))
            .await
            .unwrap();
        svc.confirm_payment("owner-1", &bill.bill_id, true, None)
            .await
            .unwrap();
        let paid = svc.get_bill("owner-1", &bill.bill_id).await.unwrap();
        assert_eq!(paid.status, BillStatus::Paid);
    }

    #[tokio::test]
    async fn delete_bill_removes_record_and_rejects_foreign_owner() {
        let svc = service();
        let bill = svc
            .generate_bill("owner-1", input("Asha", "M-1", "domestic", 10))
            .await
            .unwrap();

        // someone else's delete behaves like a missing bill
        let err = svc.delete_bill("owner-2", &bill.bill_id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        svc.delete_bill("owner-1", &bill.bill_id).await.unwrap();
        let err = svc.get_bill("owner-1", &bill.bill_id).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn bill_stats_aggregates_the_full_list() {
        let svc = service();
        let a = svc
            .generate_bill("owner-1", input("A", "M-1", "domestic", 100))
            .await
            .unwrap();
        svc.generate_bill("owner-1", input("B", "M-2", "industrial", 50))
            .await
            .unwrap();
        svc.mark_paid("owner-1", &a.bill_id).await.unwrap();

        let stats = svc.bill_stats("owner-1").await.unwrap();
        assert_eq!(stats.total_bills, 2);
        assert_eq!(stats.paid_bills, 1);
        assert_eq!(stats.unpaid_bills, 1);
        // 350.00 + 400.00
        assert_eq!(stats.total_amount, dec("750.00"));
    }
}
