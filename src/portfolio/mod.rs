mod aggregate;
mod error;
mod models;
mod service;

pub use aggregate::*;
pub use error::*;
pub use models::*;
pub use service::*;
