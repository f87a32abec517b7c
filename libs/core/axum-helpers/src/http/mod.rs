//! HTTP middleware shared by the services.

pub mod cors;
pub mod timing;

pub use cors::cors_layer;
pub use timing::server_timing;
