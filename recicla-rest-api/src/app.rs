//! Main application configuration and router setup

use axum::{
    extract::FromRef,
    middleware,
    routing::{get, post},
    Router,
};
use recicla_interfaces::RepositoryFactory;
use recicla_web::{
    cors_layer_with_config, error_handler_middleware, handle_not_found, optional_auth_middleware,
    request_id_middleware, CorsConfig, JwtManager, SessionCookie,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{
    context::{AccountsContext, DeliveriesContext, SystemContext},
    handlers,
};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Enable CORS middleware
    pub enable_cors: bool,
    /// Enable request ID tracking
    pub enable_request_id: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// API path prefix
    pub api_prefix: String,
    pub cors: CorsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            enable_request_id: true,
            enable_tracing: true,
            api_prefix: "/api".to_string(),
            cors: CorsConfig::default(),
        }
    }
}

/// Application context containing all dependencies
#[derive(Clone, FromRef)]
pub struct AppContext {
    pub accounts: AccountsContext,
    pub deliveries: DeliveriesContext,
    pub system: SystemContext,
}

impl AppContext {
    pub fn new(
        repositories: Arc<dyn RepositoryFactory>,
        jwt_manager: Arc<JwtManager>,
        session_cookie: SessionCookie,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            accounts: AccountsContext::new(repositories.clone(), jwt_manager, session_cookie, bcrypt_cost),
            deliveries: DeliveriesContext::new(repositories.clone()),
            system: SystemContext::new(repositories),
        }
    }
}

/// Create the complete REST API application
pub fn create_rest_app(context: AppContext, config: AppConfig) -> Router {
    let jwt_manager = context.accounts.jwt_manager.clone();

    let api = create_api_router()
        .layer(middleware::from_fn_with_state(jwt_manager, optional_auth_middleware));

    let app = Router::new()
        // Health endpoint (no prefix)
        .route("/health", get(handlers::health_check));

    // axum cannot nest at the root, so an empty or "/" prefix mounts the routes directly
    let app = match config.api_prefix.trim_end_matches('/') {
        "" => app.merge(api),
        prefix => app.nest(prefix, api),
    };

    let mut app = app
        .fallback(handle_not_found)
        .with_state(context);

    // Layers wrap everything added before them, so the last one runs first
    if config.enable_cors {
        app = app.layer(cors_layer_with_config(config.cors.clone()));
    }

    if config.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    app = app.layer(middleware::from_fn(error_handler_middleware));

    if config.enable_request_id {
        app = app.layer(middleware::from_fn(request_id_middleware));
    }

    app
}

/// Routes nested under the API prefix
fn create_api_router() -> Router<AppContext> {
    Router::new()
        // Account endpoints
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/login", post(handlers::login))
        .route("/auth/logout", post(handlers::logout))
        .route("/auth/user", get(handlers::current_user))
        // Delivery records
        .route(
            "/entregas",
            get(handlers::list_deliveries).post(handlers::create_delivery),
        )
        // Aggregated statistics
        .route("/estatisticas", get(handlers::get_statistics))
}
