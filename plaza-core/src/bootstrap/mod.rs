//! Bootstrap module for initializing the Plaza server
//!
//! Handles configuration loading and database initialization; service
//! wiring lives in the binary crate.

pub mod config;
pub mod database;

pub use config::load_config;
pub use database::init_database;
