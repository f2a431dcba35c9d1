//! Database layer - connection pool, schema bootstrap, repositories
//!
//! - Connection pool (max 5 connections by default)
//! - One parameterized statement per store operation
//! - Rely on affected-row counts for existence, no check-then-write

pub mod pool;
pub mod repos;
pub mod schema;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::PgProductStore;
pub use schema::{ensure_schema, reset_table};
