//! # Ser Recicla REST API
//!
//! HTTP endpoints for the recycling-delivery application: account signup and
//! session handling, delivery registration and listing, and the statistics
//! report computed by `recicla_core::aggregate`.
//!
//! ## Architecture
//!
//! Handlers receive their dependencies through context structs holding
//! repository trait objects from `recicla-interfaces`, so the router can be
//! driven by any storage backend. Tests run it against an in-memory SQLite
//! database.
//!
//! ## Example
//!
//! ```rust,no_run
//! use recicla_rest_api::{create_rest_app, AppConfig, AppContext};
//! use recicla_web::{AuthConfig, JwtManager, SessionCookie};
//! use std::sync::Arc;
//!
//! # async fn example(repositories: Arc<dyn recicla_interfaces::RepositoryFactory>) -> Result<(), Box<dyn std::error::Error>> {
//! let auth = AuthConfig::default();
//! let cookie = SessionCookie::new(auth.cookie_name.clone(), auth.token_expiry, false);
//! let context = AppContext::new(repositories, Arc::new(JwtManager::new(auth)), cookie, 10);
//!
//! let app = create_rest_app(context, AppConfig::default());
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod context;
pub mod errors;
pub mod handlers;
pub mod models;

// Re-export commonly used types
pub use app::{create_rest_app, AppConfig, AppContext};
pub use context::{AccountsContext, DeliveriesContext, SystemContext};
pub use errors::{RestError, RestResult};
pub use models::*;
