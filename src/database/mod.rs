//! SessionVault database layer.
//!
//! Provides SQLite connection management and schema migrations for the
//! durable store's SQLite backend.

pub mod connection;
pub mod migrations;

pub use connection::Database;
