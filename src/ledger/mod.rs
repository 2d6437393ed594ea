//! Decoding of the semicolon-delimited holdings ledger into [`Holding`] rows.
//!
//! [`Holding`]: crate::models::Holding

mod decode;
mod error;

pub use decode::*;
pub use error::*;
