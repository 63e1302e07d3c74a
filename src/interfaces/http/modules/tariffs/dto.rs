//! Tariff DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{rate_sheet, ConnectionType, RateSlab};

#[derive(Debug, Serialize, ToSchema)]
pub struct SlabDto {
    /// First unit this rate applies to (1-based)
    pub from_units: u32,
    /// Last unit this rate applies to, absent for the open-ended slab
    pub to_units: Option<u32>,
    #[schema(value_type = String, example = "3.5")]
    pub rate_per_unit: Decimal,
}

impl From<RateSlab> for SlabDto {
    fn from(slab: RateSlab) -> Self {
        Self {
            from_units: slab.from_units,
            to_units: slab.to_units,
            rate_per_unit: slab.rate,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TariffDto {
    pub connection_type: String,
    pub slabs: Vec<SlabDto>,
}

impl TariffDto {
    pub fn for_connection_type(connection_type: ConnectionType) -> Self {
        Self {
            connection_type: connection_type.to_string(),
            slabs: rate_sheet(connection_type)
                .into_iter()
                .map(SlabDto::from)
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CostPreviewRequest {
    /// One of `domestic`, `commercial`, `industrial`
    #[validate(length(min = 1, max = 20, message = "connection type is required"))]
    pub connection_type: String,
    #[validate(range(min = 0, message = "units must be non-negative"))]
    pub units: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CostPreviewResponse {
    pub connection_type: String,
    pub units: u32,
    #[schema(value_type = String, example = "575.00")]
    pub amount: Decimal,
}
