pub mod auth;
pub mod bills;
pub mod health;
pub mod tariffs;
