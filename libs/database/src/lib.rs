//! Store connectivity for the catalog service
//!
//! Provides the connection lifecycle shared by every repository: a
//! [`ConnectionManager`] that lazily establishes one authenticated store
//! handle, hands out clones of it, and can tear it down so a later
//! `acquire()` reconnects.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector, config and health checks
//! - `config` - `core_config::FromEnv` support for [`mongodb::StoreConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::ConnectionManager;
//! use database::mongodb::{MongoConnector, StoreConfig};
//!
//! let config = StoreConfig::new("mongodb://localhost:27017", "catalog");
//! let manager = ConnectionManager::new(MongoConnector::new(config));
//!
//! let handle = manager.acquire().await?;
//! let products = handle.database().collection::<Document>("product");
//!
//! manager.release().await;
//! ```

pub mod common;
pub mod manager;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{ConnectionError, RetryConfig};
pub use manager::{ConnectionManager, ConnectionState, Connector};
