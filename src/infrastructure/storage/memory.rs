//! In-memory bill repository for development and testing

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{Bill, BillFilter, BillRepository, BillStatus};
use crate::shared::errors::{DomainError, DomainResult};

/// In-memory repository backed by a concurrent map. Behaves like the
/// SQL implementation, including owner scoping and newest-first ordering.
pub struct InMemoryBillRepository {
    bills: DashMap<String, Bill>,
}

impl InMemoryBillRepository {
    pub fn new() -> Self {
        Self {
            bills: DashMap::new(),
        }
    }

    fn not_found(bill_id: &str) -> DomainError {
        DomainError::NotFound {
            entity: "Bill",
            field: "bill_id",
            value: bill_id.to_string(),
        }
    }

    fn matches(bill: &Bill, filter: &BillFilter) -> bool {
        if let Some(status) = filter.status {
            if bill.status != status {
                return false;
            }
        }
        if let Some(connection_type) = filter.connection_type {
            if bill.connection_type != connection_type {
                return false;
            }
        }
        if let Some(term) = &filter.search {
            let term = term.trim().to_lowercase();
            if !term.is_empty()
                && !bill.consumer_name.to_lowercase().contains(&term)
                && !bill.meter_number.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        true
    }

    fn sorted_newest_first(mut bills: Vec<Bill>) -> Vec<Bill> {
        bills.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bills
    }
}

impl Default for InMemoryBillRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BillRepository for InMemoryBillRepository {
    async fn insert(&self, bill: Bill) -> DomainResult<Bill> {
        if self.bills.contains_key(&bill.bill_id) {
            return Err(DomainError::Conflict(format!(
                "bill {} already exists",
                bill.bill_id
            )));
        }
        self.bills.insert(bill.bill_id.clone(), bill.clone());
        Ok(bill)
    }

    async fn find_by_owner(&self, owner_id: &str, filter: &BillFilter) -> DomainResult<Vec<Bill>> {
        let bills = self
            .bills
            .iter()
            .map(|e| e.value().clone())
            .filter(|b| b.owner_id == owner_id && Self::matches(b, filter))
            .collect();
        Ok(Self::sorted_newest_first(bills))
    }

    async fn find_by_meter(&self, owner_id: &str, meter_number: &str) -> DomainResult<Vec<Bill>> {
        let bills = self
            .bills
            .iter()
            .map(|e| e.value().clone())
            .filter(|b| b.owner_id == owner_id && b.meter_number == meter_number)
            .collect();
        Ok(Self::sorted_newest_first(bills))
    }

    async fn find_by_id(&self, owner_id: &str, bill_id: &str) -> DomainResult<Option<Bill>> {
        Ok(self
            .bills
            .get(bill_id)
            .filter(|b| b.owner_id == owner_id)
            .map(|b| b.clone()))
    }

    async fn update_status(
        &self,
        owner_id: &str,
        bill_id: &str,
        status: BillStatus,
    ) -> DomainResult<()> {
        let Some(mut bill) = self.bills.get_mut(bill_id) else {
            return Err(Self::not_found(bill_id));
        };
        if bill.owner_id != owner_id {
            return Err(Self::not_found(bill_id));
        }
        if bill.status == status {
            return Ok(());
        }
        bill.status = status;
        bill.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, owner_id: &str, bill_id: &str) -> DomainResult<()> {
        let owned = self
            .bills
            .get(bill_id)
            .map(|b| b.owner_id == owner_id)
            .unwrap_or(false);
        if !owned {
            return Err(Self::not_found(bill_id));
        }
        self.bills.remove(bill_id);
        Ok(())
    }
}
