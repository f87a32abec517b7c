//! Products Domain
//!
//! Product catalog over a MongoDB store, with brands attached through a
//! `product_brand` relation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Pagination, not-found/failure policy
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Normalize  │  ← Raw documents → canonical Product
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use database::{ConnectionManager, mongodb::{MongoConnector, StoreConfig}};
//! use domain_products::{handlers, MongoProductRepository, ProductService};
//!
//! let config = StoreConfig::new("mongodb://localhost:27017", "catalog");
//! let connections = Arc::new(ConnectionManager::new(MongoConnector::new(config)));
//!
//! let service = ProductService::new(MongoProductRepository::new(connections));
//! let router: axum::Router = handlers::router(service);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod normalize;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    Brand, CreateProduct, PageQuery, Pagination, Product, ProductPage, UpdateProduct, paginate,
};
pub use mongodb::MongoProductRepository;
pub use normalize::{clean_identifier, to_canonical_product};
pub use repository::ProductRepository;
pub use service::ProductService;
