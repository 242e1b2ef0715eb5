//! Ser Recicla server
//!
//! Wires configuration, storage and the REST router together and runs the
//! HTTP server with graceful shutdown.

pub mod services;
pub mod startup;

// Re-export main components
pub use services::{init_logging, rest_config, ServiceContainer};
pub use startup::Server;
