pub mod clock;
pub mod config;
pub mod format;
pub mod ledger;
pub mod models;
pub mod portfolio;
