//! # termsync-storage
//!
//! SQLite persistence layer for default-term synchronisation.
//! Write-serialized single connection, `PRAGMA user_version` migrations,
//! per-table query modules, and a toggleable relation uniqueness trigger.

pub mod connection;
pub mod engine;
pub mod migrations;
pub mod queries;

pub use connection::DatabaseManager;
pub use engine::TermsStorageEngine;
