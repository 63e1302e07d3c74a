//! Bill entity for database

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Connection type, determines the tariff slab table
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ConnectionType {
    #[sea_orm(string_value = "domestic")]
    Domestic,
    #[sea_orm(string_value = "commercial")]
    Commercial,
    #[sea_orm(string_value = "industrial")]
    Industrial,
}

/// Payment status of a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum BillStatus {
    #[sea_orm(string_value = "Not Paid")]
    NotPaid,
    #[sea_orm(string_value = "Paid")]
    Paid,
}

/// Bill model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bills")]
pub struct Model {
    /// Unique bill ID (UUID), assigned at creation
    #[sea_orm(primary_key, auto_increment = false)]
    pub bill_id: String,

    /// Owning user; all reads and mutations are scoped by it
    pub owner_id: String,

    pub consumer_name: String,

    /// Meter identifier; a meter can have many historical bills
    pub meter_number: String,

    pub connection_type: ConnectionType,

    pub units_consumed: i32,

    /// Amount cached from the tariff calculator at creation time
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,

    pub status: BillStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
