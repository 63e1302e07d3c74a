//! Database entities module

pub mod bill;
pub mod user;

pub use bill::Entity as Bill;
pub use user::Entity as User;
