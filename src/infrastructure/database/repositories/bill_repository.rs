//! SeaORM implementation of BillRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use crate::domain::{Bill, BillFilter, BillRepository, BillStatus, ConnectionType};
use crate::infrastructure::database::entities::bill;
use crate::shared::errors::{DomainError, DomainResult};

// ── Conversion helpers ──────────────────────────────────────────

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::StoreUnavailable(e.to_string())
}

fn not_found(bill_id: &str) -> DomainError {
    DomainError::NotFound {
        entity: "Bill",
        field: "bill_id",
        value: bill_id.to_string(),
    }
}

fn entity_to_domain(m: bill::Model) -> Bill {
    Bill {
        bill_id: m.bill_id,
        owner_id: m.owner_id,
        consumer_name: m.consumer_name,
        meter_number: m.meter_number,
        connection_type: match m.connection_type {
            bill::ConnectionType::Domestic => ConnectionType::Domestic,
            bill::ConnectionType::Commercial => ConnectionType::Commercial,
            bill::ConnectionType::Industrial => ConnectionType::Industrial,
        },
        units_consumed: m.units_consumed,
        amount: m.amount,
        status: match m.status {
            bill::BillStatus::NotPaid => BillStatus::NotPaid,
            bill::BillStatus::Paid => BillStatus::Paid,
        },
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn connection_type_to_entity(ct: ConnectionType) -> bill::ConnectionType {
    match ct {
        ConnectionType::Domestic => bill::ConnectionType::Domestic,
        ConnectionType::Commercial => bill::ConnectionType::Commercial,
        ConnectionType::Industrial => bill::ConnectionType::Industrial,
    }
}

fn status_to_entity(status: BillStatus) -> bill::BillStatus {
    match status {
        BillStatus::NotPaid => bill::BillStatus::NotPaid,
        BillStatus::Paid => bill::BillStatus::Paid,
    }
}

// ── SeaOrmBillRepository ────────────────────────────────────────

pub struct SeaOrmBillRepository {
    db: DatabaseConnection,
}

impl SeaOrmBillRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BillRepository for SeaOrmBillRepository {
    async fn insert(&self, b: Bill) -> DomainResult<Bill> {
        let model = bill::ActiveModel {
            bill_id: Set(b.bill_id),
            owner_id: Set(b.owner_id),
            consumer_name: Set(b.consumer_name),
            meter_number: Set(b.meter_number),
            connection_type: Set(connection_type_to_entity(b.connection_type)),
            units_consumed: Set(b.units_consumed),
            amount: Set(b.amount),
            status: Set(status_to_entity(b.status)),
            created_at: Set(b.created_at),
            updated_at: Set(b.updated_at),
        };
        let stored = model.insert(&self.db).await.map_err(db_err)?;
        info!("Bill saved: {} ({})", stored.bill_id, stored.meter_number);
        Ok(entity_to_domain(stored))
    }

    async fn find_by_owner(&self, owner_id: &str, filter: &BillFilter) -> DomainResult<Vec<Bill>> {
        let mut query = bill::Entity::find().filter(bill::Column::OwnerId.eq(owner_id));

        if let Some(status) = filter.status {
            query = query.filter(bill::Column::Status.eq(status_to_entity(status)));
        }
        if let Some(ct) = filter.connection_type {
            query = query.filter(bill::Column::ConnectionType.eq(connection_type_to_entity(ct)));
        }
        if let Some(term) = &filter.search {
            let term = term.trim().to_lowercase();
            if !term.is_empty() {
                let pattern = format!("%{}%", term);
                query = query.filter(
                    Condition::any()
                        .add(
                            Expr::expr(Func::lower(Expr::col(bill::Column::ConsumerName)))
                                .like(pattern.clone()),
                        )
                        .add(
                            Expr::expr(Func::lower(Expr::col(bill::Column::MeterNumber)))
                                .like(pattern),
                        ),
                );
            }
        }

        let models = query
            .order_by_desc(bill::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn find_by_meter(&self, owner_id: &str, meter_number: &str) -> DomainResult<Vec<Bill>> {
        let models = bill::Entity::find()
            .filter(bill::Column::OwnerId.eq(owner_id))
            .filter(bill::Column::MeterNumber.eq(meter_number))
            .order_by_desc(bill::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn find_by_id(&self, owner_id: &str, bill_id: &str) -> DomainResult<Option<Bill>> {
        let model = bill::Entity::find_by_id(bill_id)
            .filter(bill::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn update_status(
        &self,
        owner_id: &str,
        bill_id: &str,
        status: BillStatus,
    ) -> DomainResult<()> {
        let existing = bill::Entity::find_by_id(bill_id)
            .filter(bill::Column::OwnerId.eq(owner_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(not_found(bill_id));
        };

        let target = status_to_entity(status);
        if existing.status == target {
            // no-op transition, nothing to write
            return Ok(());
        }

        let mut model: bill::ActiveModel = existing.into();
        model.status = Set(target);
        model.updated_at = Set(Utc::now());
        model.update(&self.db).await.map_err(db_err)?;

        info!("Bill {} status set to {}", bill_id, status);
        Ok(())
    }

    async fn delete(&self, owner_id: &str, bill_id: &str) -> DomainResult<()> {
        let result = bill::Entity::delete_many()
            .filter(bill::Column::BillId.eq(bill_id))
            .filter(bill::Column::OwnerId.eq(owner_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(not_found(bill_id));
        }
        info!("Bill deleted: {}", bill_id);
        Ok(())
    }
}
