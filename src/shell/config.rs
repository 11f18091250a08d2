// Process configuration read from `ROTA_*` environment variables, with a
// `.env` file honoured when present. Every field has a default.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::modules::dashboard::feed::FeedSettings;
use crate::shared::core::directory::{Employee, TenantSettings};
use crate::shared::infrastructure::database::{PoolConfig, Tables};

pub const ENV_PREFIX: &str = "ROTA_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
    #[serde(default = "default_statement_timeout_ms")]
    pub statement_timeout_ms: u64,
    #[serde(default = "default_relay_interval_ms")]
    pub relay_interval_ms: u64,
    #[serde(default = "default_relay_batch_size")]
    pub relay_batch_size: usize,
    #[serde(default = "default_heartbeat_secs")]
    pub heartbeat_secs: u64,
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
    /// JSON file with the tenants and employees to start from.
    #[serde(default)]
    pub seed_file: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> usize {
    16
}

fn default_acquire_timeout_ms() -> u64 {
    5_000
}

fn default_statement_timeout_ms() -> u64 {
    30_000
}

fn default_relay_interval_ms() -> u64 {
    1_000
}

fn default_relay_batch_size() -> usize {
    100
}

fn default_heartbeat_secs() -> u64 {
    30
}

fn default_refresh_secs() -> u64 {
    10
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed(ENV_PREFIX)
            .from_env()
            .context("invalid ROTA_* configuration")
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn pool(&self) -> PoolConfig {
        PoolConfig {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_millis(self.acquire_timeout_ms),
            statement_timeout: Duration::from_millis(self.statement_timeout_ms),
        }
    }

    pub fn feed(&self) -> FeedSettings {
        FeedSettings {
            heartbeat_interval: Duration::from_secs(self.heartbeat_secs.max(1)),
            refresh_interval: Duration::from_secs(self.refresh_secs.max(1)),
        }
    }

    pub fn relay_interval(&self) -> Duration {
        Duration::from_millis(self.relay_interval_ms.max(1))
    }

    /// Starting tables: the seed file when configured, empty otherwise.
    pub fn initial_tables(&self) -> anyhow::Result<Tables> {
        match &self.seed_file {
            Some(path) => load_seed(Path::new(path)),
            None => Ok(Tables::default()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub tenants: Vec<TenantSettings>,
    #[serde(default)]
    pub employees: Vec<Employee>,
}

impl Seed {
    pub fn into_tables(self) -> Tables {
        let mut tables = Tables::default();
        for settings in self.tenants {
            tables.tenants.insert(settings.tenant_id, settings);
        }
        for employee in self.employees {
            tables.employees.insert(employee.id, employee);
        }
        tables
    }
}

pub fn load_seed(path: &Path) -> anyhow::Result<Tables> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading seed file {}", path.display()))?;
    let seed: Seed = serde_json::from_str(&raw)
        .with_context(|| format!("parsing seed file {}", path.display()))?;
    tracing::info!(
        tenants = seed.tenants.len(),
        employees = seed.employees.len(),
        "seed loaded"
    );
    Ok(seed.into_tables())
}
