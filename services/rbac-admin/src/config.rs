use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_BIND: &str = "0.0.0.0:4000";
pub const DEFAULT_METRICS_BIND: &str = "0.0.0.0:9090";
pub const DEFAULT_PG_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_PG_ACQUIRE_TIMEOUT_MS: u64 = 5_000;

// Admin service configuration sourced from environment variables, optionally
// overridden by a YAML file.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    pub storage: StorageBackend,
    pub postgres: Option<PostgresConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            other => bail!("unknown storage backend: {other}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_ms: u64,
}

#[derive(Debug, Default, Deserialize)]
struct AdminConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    storage: Option<StorageBackend>,
    postgres: Option<PostgresConfigOverride>,
}

#[derive(Debug, Default, Deserialize)]
struct PostgresConfigOverride {
    url: Option<String>,
    max_connections: Option<u32>,
    acquire_timeout_ms: Option<u64>,
}

impl AdminConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("RBAC_ADMIN_BIND")
            .unwrap_or_else(|_| DEFAULT_BIND.to_string())
            .parse()
            .with_context(|| "parse RBAC_ADMIN_BIND")?;
        let metrics_bind = std::env::var("RBAC_ADMIN_METRICS_BIND")
            .unwrap_or_else(|_| DEFAULT_METRICS_BIND.to_string())
            .parse()
            .with_context(|| "parse RBAC_ADMIN_METRICS_BIND")?;
        let storage = match std::env::var("RBAC_ADMIN_STORAGE") {
            Ok(value) => value.parse().with_context(|| "parse RBAC_ADMIN_STORAGE")?,
            Err(_) => StorageBackend::Memory,
        };
        let postgres = match std::env::var("RBAC_ADMIN_POSTGRES_URL") {
            Ok(url) => Some(PostgresConfig {
                url,
                max_connections: env_number(
                    "RBAC_ADMIN_POSTGRES_MAX_CONNECTIONS",
                    DEFAULT_PG_MAX_CONNECTIONS,
                )?,
                acquire_timeout_ms: env_number(
                    "RBAC_ADMIN_POSTGRES_ACQUIRE_TIMEOUT_MS",
                    DEFAULT_PG_ACQUIRE_TIMEOUT_MS,
                )?,
            }),
            Err(_) => None,
        };
        Ok(Self {
            bind_addr,
            metrics_bind,
            storage,
            postgres,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("RBAC_ADMIN_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read RBAC_ADMIN_CONFIG: {path}"))?;
            config.apply_yaml(&contents)?;
        }
        Ok(config)
    }

    /// Overlay the fields present in a YAML document onto this config.
    pub fn apply_yaml(&mut self, contents: &str) -> Result<()> {
        let override_cfg: AdminConfigOverride =
            serde_yaml::from_str(contents).with_context(|| "parse admin config yaml")?;
        if let Some(value) = override_cfg.bind_addr {
            self.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
        }
        if let Some(value) = override_cfg.metrics_bind {
            self.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
        }
        if let Some(value) = override_cfg.storage {
            self.storage = value;
        }
        if let Some(pg) = override_cfg.postgres {
            let current = self.postgres.take();
            let url = match (pg.url, current.as_ref()) {
                (Some(url), _) => url,
                (None, Some(existing)) => existing.url.clone(),
                (None, None) => bail!("postgres.url is required when overriding postgres"),
            };
            self.postgres = Some(PostgresConfig {
                url,
                max_connections: pg
                    .max_connections
                    .or(current.as_ref().map(|c| c.max_connections))
                    .unwrap_or(DEFAULT_PG_MAX_CONNECTIONS),
                acquire_timeout_ms: pg
                    .acquire_timeout_ms
                    .or(current.as_ref().map(|c| c.acquire_timeout_ms))
                    .unwrap_or(DEFAULT_PG_ACQUIRE_TIMEOUT_MS),
            });
        }
        Ok(())
    }
}

fn env_number<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value.parse().with_context(|| format!("parse {key}")),
        Err(_) => Ok(default),
    }
}
