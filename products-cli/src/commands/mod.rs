//! Command implementations for the products CLI

pub mod serve;

pub use serve::run_serve;
