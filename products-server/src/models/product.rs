//! Product record and request input
//!
//! `price` travels as a JSON number and is stored as `NUMERIC(10,2)`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Decimal places kept for prices, matching `NUMERIC(10,2)`.
pub const PRICE_SCALE: u32 = 2;

/// One row of the `products` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// Create/update request body.
///
/// Any `id` in the body is ignored: the store assigns ids on create and the
/// path selects the row on update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub name: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl ProductInput {
    /// Validate the body into a draft ready for a store.
    pub fn validate(self) -> Result<ProductDraft, ValidationError> {
        Ok(ProductDraft {
            name: ProductName::new(&self.name)?,
            price: normalize_price(self.price),
        })
    }
}

/// Validated name and price for create/update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: ProductName,
    pub price: Decimal,
}

impl ProductDraft {
    /// Materialize a record with the given id.
    pub fn into_product(self, id: i32) -> Product {
        Product {
            id,
            name: self.name.into_string(),
            price: self.price,
        }
    }
}

/// Validated product name (non-empty)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductName(String);

impl ProductName {
    /// Create a product name.
    ///
    /// # Example
    /// ```
    /// use products_server::models::ProductName;
    ///
    /// assert!(ProductName::new("test product").is_ok());
    /// assert!(ProductName::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Round to two places the way PostgreSQL rounds into `NUMERIC(10,2)`.
pub fn normalize_price(price: Decimal) -> Decimal {
    price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
