//! Tariff module: published rate sheets and cost preview

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
