//! Domain models with validation at construction
//!
//! Request input is validated before it reaches a store.
//! Invalid input returns ValidationError, not panic.

pub mod pagination;
pub mod product;
pub mod validation;

pub use pagination::{Page, PageParams};
pub use product::{Product, ProductDraft, ProductInput, ProductName};
pub use validation::ValidationError;
