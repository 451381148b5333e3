//! HTTP server configuration object and helpers.

use std::io;
use std::net::SocketAddr;

use tracing::info;
use users_backend::config::{ServiceSettings, StoreProfile};
use users_backend::outbound::persistence::{DbPool, run_migrations};

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration served from the in-memory store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool so users persist in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Resolve the configured store profile.
    ///
    /// The `postgres` profile applies pending migrations and opens the pool
    /// before the listener binds, so a bad `DATABASE_URL` fails startup
    /// instead of the first request.
    ///
    /// # Errors
    /// Returns [`io::Error`] when migrations or pool construction fail.
    pub async fn from_settings(settings: &ServiceSettings) -> io::Result<Self> {
        let config = Self::new(settings.bind_addr);
        match settings.store {
            StoreProfile::Memory => {
                info!("using in-memory user store; records are lost on restart");
                Ok(config)
            }
            StoreProfile::Postgres => {
                run_migrations(&settings.database_url)
                    .await
                    .map_err(io::Error::other)?;
                info!("database migrations applied");
                let pool = DbPool::new(settings.pool_config())
                    .await
                    .map_err(io::Error::other)?;
                info!(
                    max_connections = settings.db_max_connections,
                    "using PostgreSQL user store"
                );
                Ok(config.with_db_pool(pool))
            }
        }
    }
}
