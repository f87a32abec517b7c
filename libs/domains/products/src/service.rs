//! Product Service - Business logic layer
//!
//! Applies the catalog's error policy on top of a [`ProductRepository`]:
//! listing and creating surface store failures, while single-product reads,
//! updates and deletes report them as "not found".

use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Pagination, Product, ProductPage, UpdateProduct, paginate};
use crate::normalize::clean_identifier;
use crate::repository::ProductRepository;

/// Authoritative total for a listing.
///
/// A usable store count wins unless it is smaller than what was actually
/// fetched; with no usable count the fetched length is the total.
pub fn resolve_total(count: Option<u64>, fetched: usize) -> u64 {
    let fetched = fetched as u64;
    count.map_or(fetched, |count| count.max(fetched))
}

/// Product service providing business logic operations
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List products with their brands, then slice to the requested window
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> ProductResult<ProductPage> {
        let products = self.repository.list_with_brands().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to list products");
        })?;

        let count = match self.repository.count().await {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, "Product count failed, using fetched length");
                None
            }
        };

        let total = resolve_total(count, products.len());
        let data = paginate(products, limit, offset);

        Ok(ProductPage {
            data,
            pagination: Pagination::new(total, limit, offset),
        })
    }

    /// Get a product by ID; `None` when absent or when the lookup fails
    #[instrument(skip(self))]
    pub async fn get_product_by_id(&self, id: &str) -> Option<Product> {
        let id = clean_identifier(id);
        if id.is_empty() {
            return None;
        }

        match self.repository.get_by_id(&id).await {
            Ok(Some(product)) => Some(product),
            Ok(None) => {
                info!(product_id = %id, "Product not found");
                None
            }
            Err(e) => {
                warn!(product_id = %id, error = %e, "Product lookup failed, reporting not found");
                None
            }
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to create product");
        })
    }

    /// Merge `patch` into an existing product.
    ///
    /// `Ok(None)` when the product does not exist, disappeared before the
    /// write, or the write failed. Only invalid input is an error.
    #[instrument(skip(self, patch))]
    pub async fn update_product(
        &self,
        id: &str,
        patch: UpdateProduct,
    ) -> ProductResult<Option<Product>> {
        patch
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let Some(existing) = self.get_product_by_id(id).await else {
            return Ok(None);
        };

        if patch.is_empty() {
            return Ok(Some(existing));
        }

        match self.repository.merge(&existing.id, patch).await {
            Ok(Some(mut updated)) => {
                updated.brands = existing.brands;
                info!(product_id = %updated.id, "Product updated");
                Ok(Some(updated))
            }
            Ok(None) => {
                info!(product_id = %existing.id, "Product removed before update");
                Ok(None)
            }
            Err(e) => {
                warn!(product_id = %existing.id, error = %e, "Product update failed, reporting not found");
                Ok(None)
            }
        }
    }

    /// Delete a product; `false` when absent or when the delete failed
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> bool {
        let Some(existing) = self.get_product_by_id(id).await else {
            return false;
        };

        match self.repository.delete(&existing.id).await {
            Ok(deleted) => deleted,
            Err(e) => {
                warn!(product_id = %existing.id, error = %e, "Product delete failed");
                false
            }
        }
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
