pub mod model;
pub mod repository;

pub use model::{Bill, BillFilter, BillStats, BillStatus, ConnectionType};
pub use repository::BillRepository;
