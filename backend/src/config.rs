//! Process settings loaded via OrthoConfig.
//!
//! Values come from `TRACKER_*` environment variables, command-line flags,
//! or a configuration file, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;

/// Settings for the tracker server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRACKER")]
pub struct TrackerSettings {
    /// PostgreSQL connection URL. Required to start the server.
    pub database_url: Option<String>,
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<SocketAddr>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Connections kept open while idle.
    pub pool_min_idle: Option<u32>,
    /// Apply pending schema migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

/// Raised when a setting needed at startup is absent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required setting {name}")]
pub struct MissingSetting {
    name: &'static str,
}

impl TrackerSettings {
    /// Return the database URL.
    ///
    /// # Errors
    ///
    /// Returns [`MissingSetting`] when neither `TRACKER_DATABASE_URL` nor the
    /// matching flag or file key was provided.
    pub fn database_url(&self) -> Result<&str, MissingSetting> {
        self.database_url.as_deref().ok_or(MissingSetting {
            name: "TRACKER_DATABASE_URL",
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    pub fn pool_min_idle(&self) -> u32 {
        self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)
    }

    /// Build the pool configuration from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`MissingSetting`] when the database URL is absent.
    pub fn pool_config(&self) -> Result<PoolConfig, MissingSetting> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size())
            .with_min_idle(Some(self.pool_min_idle())))
    }
}
