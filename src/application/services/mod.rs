pub mod billing;

pub use billing::{BillingService, GenerateBill};
