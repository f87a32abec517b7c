use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// Lookups by identifier distinguish "no such product" (`Ok(None)` /
/// `Ok(false)`) from a store failure (`Err`). Identifiers may be given with
/// or without their `product:` prefix; returned products are canonical.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product joined with its related brands, in stable order
    async fn list_with_brands(&self) -> ProductResult<Vec<Product>>;

    /// Number of products as reported by the store, `None` when the store
    /// produced no usable count
    async fn count(&self) -> ProductResult<Option<u64>>;

    /// Get a product (with brands) by identifier
    async fn get_by_id(&self, id: &str) -> ProductResult<Option<Product>>;

    /// Insert a new product; the store assigns the identifier
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Write only the fields present in `patch` and return the stored result
    async fn merge(&self, id: &str, patch: UpdateProduct) -> ProductResult<Option<Product>>;

    /// Delete a product and its brand relations
    async fn delete(&self, id: &str) -> ProductResult<bool>;
}
