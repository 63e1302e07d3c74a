//! Bill repository interface

use async_trait::async_trait;

use super::model::{Bill, BillFilter, BillStatus};
use crate::shared::errors::DomainResult;

/// Persistence boundary for bills.
///
/// Every read and mutation is scoped to the owning user; a bill belonging
/// to someone else behaves exactly like a missing bill.
#[async_trait]
pub trait BillRepository: Send + Sync {
    async fn insert(&self, bill: Bill) -> DomainResult<Bill>;

    /// List bills of one owner, newest first, with optional filters.
    async fn find_by_owner(&self, owner_id: &str, filter: &BillFilter) -> DomainResult<Vec<Bill>>;

    /// Exact meter-number match scoped to the owner, newest first.
    async fn find_by_meter(&self, owner_id: &str, meter_number: &str) -> DomainResult<Vec<Bill>>;

    async fn find_by_id(&self, owner_id: &str, bill_id: &str) -> DomainResult<Option<Bill>>;

    /// Set the bill status, refreshing `updated_at` on an actual transition.
    /// Setting a status the bill already has is a successful no-op.
    async fn update_status(
        &self,
        owner_id: &str,
        bill_id: &str,
        status: BillStatus,
    ) -> DomainResult<()>;

    async fn delete(&self, owner_id: &str, bill_id: &str) -> DomainResult<()>;
}
