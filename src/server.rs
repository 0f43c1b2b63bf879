//! HTTP server initialization and runtime setup.
//!
//! Handles store and cache construction, migrations, and the Axum server
//! lifecycle including graceful shutdown.

use crate::config::{Config, StoreBackend};
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{MemoryMappingRepository, PgMappingRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result, anyhow};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Mapping store plus the pool behind it, if any, so it can be closed at shutdown.
pub struct StoreHandle {
    pub store: Arc<dyn MappingRepository>,
    pub pool: Option<PgPool>,
}

impl StoreHandle {
    /// Releases the underlying connections.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
            tracing::info!("Database pool closed");
        }
    }
}

/// Connects the configured mapping store.
///
/// For Postgres, connection establishment is bounded by
/// `STORE_CONNECT_TIMEOUT` and pending migrations are applied.
///
/// # Errors
///
/// Returns an error if the connection times out or fails, or a migration fails.
pub async fn connect_store(config: &Config) -> Result<StoreHandle> {
    let database_url = match (config.store_backend, &config.database_url) {
        (StoreBackend::Memory, _) => {
            tracing::warn!("Using in-memory store; mappings are lost on restart");
            return Ok(StoreHandle {
                store: Arc::new(MemoryMappingRepository::new()),
                pool: None,
            });
        }
        (StoreBackend::Postgres, Some(url)) => url,
        (StoreBackend::Postgres, None) => {
            return Err(anyhow!("DATABASE_URL is required for the postgres store backend"));
        }
    };

    let connect_timeout = config.store_connect_timeout();
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(connect_timeout)
        .idle_timeout(Some(Duration::from_secs(config.db_idle_timeout)))
        .max_lifetime(Some(Duration::from_secs(config.db_max_lifetime)));

    let pool = tokio::time::timeout(connect_timeout, options.connect(database_url))
        .await
        .map_err(|_| {
            anyhow!(
                "Timed out connecting to database after {}s",
                connect_timeout.as_secs()
            )
        })?
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let store = PgMappingRepository::new(Arc::new(pool.clone()), config.store_operation_timeout());

    Ok(StoreHandle {
        store: Arc::new(store),
        pool: Some(pool),
    })
}

/// Connects Redis when configured, falling back to [`NullCache`].
pub async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Serves until SIGINT or SIGTERM, then drains in-flight requests and
/// closes the store.
///
/// # Errors
///
/// Returns an error if the store cannot be reached, the listener cannot
/// bind, or the server fails at runtime.
pub async fn run(config: Config) -> Result<()> {
    let handle = connect_store(&config).await?;
    let cache = connect_cache(&config).await;

    let state = AppState::new(handle.store.clone(), cache, &config);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    handle.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
