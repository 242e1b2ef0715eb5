//! Service wiring and logging setup

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer};

use recicla_config::{LogFormat, LoggingConfig, ReciclaConfig};
use recicla_interfaces::RepositoryFactory;
use recicla_rest_api::{AppConfig, AppContext};
use recicla_web::{AuthConfig as JwtConfig, CorsConfig as WebCorsConfig, JwtManager, SessionCookie};

/// Service container holding the shared application dependencies
#[derive(Clone)]
pub struct ServiceContainer {
    pub repositories: Arc<dyn RepositoryFactory>,
    pub jwt_manager: Arc<JwtManager>,
    pub session_cookie: SessionCookie,
    pub bcrypt_cost: u32,
}

impl ServiceContainer {
    /// Open the database and build the services from configuration
    pub async fn new(config: &ReciclaConfig) -> Result<Self> {
        let storage_config = storage_config(config);
        tracing::info!(
            url = %storage_config.url,
            max_connections = storage_config.max_connections,
            "Connecting to database"
        );

        let factory = recicla_storage::connect(storage_config, config.database.run_migrations)
            .await
            .context("Failed to initialize database")?;

        let jwt_config = jwt_config(config);
        let session_cookie = SessionCookie::new(
            jwt_config.cookie_name.clone(),
            jwt_config.token_expiry,
            config.auth.secure_cookie,
        );

        Ok(Self {
            repositories: Arc::new(factory),
            jwt_manager: Arc::new(JwtManager::new(jwt_config)),
            session_cookie,
            bcrypt_cost: config.auth.bcrypt_cost,
        })
    }

    /// Create the REST API context from the service container
    pub fn rest_context(&self) -> AppContext {
        AppContext::new(
            self.repositories.clone(),
            self.jwt_manager.clone(),
            self.session_cookie.clone(),
            self.bcrypt_cost,
        )
    }
}

/// REST router settings derived from the server configuration
pub fn rest_config(config: &ReciclaConfig) -> AppConfig {
    let server = &config.server;
    AppConfig {
        enable_cors: server.enable_cors,
        enable_request_id: server.enable_request_id,
        enable_tracing: server.enable_tracing,
        api_prefix: server.api_prefix.clone(),
        cors: WebCorsConfig {
            allowed_origins: server.cors.allowed_origins.clone(),
            allow_credentials: server.cors.allow_credentials,
            max_age: Some(server.cors.max_age),
            ..WebCorsConfig::default()
        },
    }
}

fn storage_config(config: &ReciclaConfig) -> recicla_storage::DatabaseConfig {
    recicla_storage::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        connection_timeout: config.database.connection_timeout,
    }
}

fn jwt_config(config: &ReciclaConfig) -> JwtConfig {
    let auth = &config.auth;
    JwtConfig {
        jwt_secret: auth.jwt_secret.clone(),
        jwt_issuer: auth.issuer.clone(),
        jwt_audience: auth.audience.clone(),
        token_expiry: auth.token_expiration,
        cookie_name: auth.cookie_name.clone(),
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. When a log file is
/// configured the returned guard must be held until shutdown so buffered
/// lines are flushed.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info,sqlx=warn", config.level)));

    let mut layers = vec![console_layer(config.format)];
    let mut guard = None;

    if let Some(file) = &config.file {
        let (writer, file_guard) = file_writer(Path::new(file))?;
        layers.push(fmt::layer().with_writer(writer).with_ansi(false).boxed());
        guard = Some(file_guard);
    }

    if tracing_subscriber::registry().with(filter).with(layers).try_init().is_err() {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    tracing::info!(level = %config.level, "Logging initialized");
    Ok(guard)
}

fn console_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    match format {
        LogFormat::Json => fmt::layer().json().with_current_span(true).boxed(),
        LogFormat::Compact => fmt::layer().compact().boxed(),
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
        LogFormat::Text => fmt::layer().with_target(false).boxed(),
    }
}

fn file_writer(path: &Path) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path '{}' has no file name", path.display()))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(directory)
        .with_context(|| format!("Failed to create log directory '{}'", directory.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    Ok(tracing_appender::non_blocking(appender))
}
