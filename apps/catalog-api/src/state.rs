//! Application state management

use database::{ConnectionManager, mongodb::MongoConnector};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// The single store connection shared by every request
    pub connections: Arc<ConnectionManager<MongoConnector>>,
}
