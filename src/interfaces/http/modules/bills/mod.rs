//! Bill management module: generation, listing, payment, deletion

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
