//! MongoDB store connector and utilities
//!
//! The catalog lives in three collections of one database: `product`,
//! `brands`, and the `product_brand` relation edges.

mod config;
mod connector;
mod health;

pub use config::StoreConfig;
pub use connector::{MongoConnector, StoreHandle, client_options, connect_from_config};
pub use health::{HealthStatus, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
