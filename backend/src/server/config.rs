//! Runtime settings and the server configuration built from them.

use members_api::middleware::ApiKey;
use members_api::outbound::persistence::{DbPool, PoolConfig};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Settings loaded from `MEMBERS_*` environment variables, CLI flags, or a
/// config file.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MEMBERS")]
pub struct MembersSettings {
    /// PostgreSQL connection string. Unset runs on the in-process store.
    pub database_url: Option<String>,
    /// Shared secret accepted in the `x-api-key` header.
    pub api_key: Option<String>,
    /// Listen address.
    pub host: Option<String>,
    /// Listen port.
    pub port: Option<u16>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl MembersSettings {
    /// Listen address, falling back to all interfaces.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host
            .as_deref()
            .map(str::trim)
            .filter(|host| !host.is_empty())
            .unwrap_or(DEFAULT_HOST)
    }

    /// Listen port, falling back to 8080.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Database URL when one is configured and non-blank.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool configuration for [`Self::database_url`].
    #[must_use]
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url().map(|url| {
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
        })
    }

    /// Configured shared secret; blank values count as unset.
    #[must_use]
    pub fn api_key(&self) -> Option<ApiKey> {
        self.api_key.clone().and_then(ApiKey::new)
    }
}

impl std::fmt::Debug for MembersSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembersSettings")
            .field("database_url", &self.database_url().map(|_| "<redacted>"))
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host())
            .field("port", &self.port())
            .field("pool_max_size", &self.pool_max_size)
            .finish()
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) api_key: Option<ApiKey>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration listening on `host:port`.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, api_key: Option<ApiKey>) -> Self {
        Self {
            host: host.into(),
            port,
            api_key,
            db_pool: None,
        }
    }

    /// Attach a database pool; without one the in-process store is used.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
