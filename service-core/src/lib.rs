//! service-core: Shared infrastructure for health-monitor services.
pub mod config;
pub mod error;
pub mod observability;

pub use axum;
pub use mongodb;
pub use serde;
pub use tracing;
pub use validator;
