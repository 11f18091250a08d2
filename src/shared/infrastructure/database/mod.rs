// Transactional datastore port and its in-memory implementation.
//
// Purpose
// - Give every use case an explicit BEGIN / COMMIT / ROLLBACK boundary over a
//   bounded connection pool, without a process-wide global.
//
// Responsibilities
// - Hand out transactions working on a private snapshot of the tables.
// - Refuse a commit when another transaction committed a write to one of the
//   same rows after its snapshot was taken (optimistic, per row). Writes to
//   unrelated rows commit side by side.
// - Replay committed writes onto the current tables so unique constraints are
//   checked against rows other transactions inserted meanwhile.
// - Bound pool acquisition and statement time with the configured timeouts.

pub mod tables;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, RwLock, Semaphore};
use tokio::time::timeout;

pub use tables::{ChangeSet, RowKey, Tables};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("version mismatch: expected {expected}, actual {actual}")]
    VersionMismatch { expected: u64, actual: u64 },

    #[error("unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    #[error("timed out acquiring a connection after {0:?}")]
    PoolTimeout(Duration),

    #[error("statement timed out after {0:?}")]
    StatementTimeout(Duration),

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: usize,
    pub acquire_timeout: Duration,
    pub statement_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 16,
            acquire_timeout: Duration::from_secs(5),
            statement_timeout: Duration::from_secs(30),
        }
    }
}

struct Committed {
    version: u64,
    tables: Arc<Tables>,
    /// Commit version that last wrote each row.
    row_versions: HashMap<RowKey, u64>,
}

impl Committed {
    fn starting_with(tables: Tables) -> Self {
        Self {
            version: 0,
            tables: Arc::new(tables),
            row_versions: HashMap::new(),
        }
    }
}

pub struct Database {
    committed: RwLock<Committed>,
    pool: Arc<Semaphore>,
    config: PoolConfig,
    is_offline: bool,
}

impl Database {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            committed: RwLock::new(Committed::starting_with(Tables::default())),
            pool: Arc::new(Semaphore::new(config.max_connections.max(1))),
            config,
            is_offline: false,
        }
    }

    /// A database whose committed state starts as `tables`.
    pub fn seeded(config: PoolConfig, tables: Tables) -> Self {
        let database = Self::new(config);
        Self {
            committed: RwLock::new(Committed::starting_with(tables)),
            ..database
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub fn config(&self) -> PoolConfig {
        self.config
    }

    pub async fn begin(&self) -> Result<Transaction<'_>, DatabaseError> {
        let permit = self.acquire().await?;
        let guard = timeout(self.config.statement_timeout, self.committed.read())
            .await
            .map_err(|_| DatabaseError::StatementTimeout(self.config.statement_timeout))?;
        Ok(Transaction {
            database: self,
            base_version: guard.version,
            snapshot: guard.tables.clone(),
            working: Tables::clone(&guard.tables),
            _permit: permit,
        })
    }

    /// Read-only access without taking a snapshot copy.
    pub async fn read<T>(&self, query: impl FnOnce(&Tables) -> T) -> Result<T, DatabaseError> {
        let _permit = self.acquire().await?;
        let guard = timeout(self.config.statement_timeout, self.committed.read())
            .await
            .map_err(|_| DatabaseError::StatementTimeout(self.config.statement_timeout))?;
        Ok(query(guard.tables.as_ref()))
    }

    /// Runs `mutate` in its own transaction and commits it.
    pub async fn write<T>(
        &self,
        mutate: impl FnOnce(&mut Tables) -> Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        let mut transaction = self.begin().await?;
        let value = mutate(transaction.tables_mut())?;
        transaction.commit().await?;
        Ok(value)
    }

    async fn acquire(&self) -> Result<OwnedSemaphorePermit, DatabaseError> {
        if self.is_offline {
            return Err(DatabaseError::Backend("Database offline".into()));
        }
        timeout(self.config.acquire_timeout, self.pool.clone().acquire_owned())
            .await
            .map_err(|_| DatabaseError::PoolTimeout(self.config.acquire_timeout))?
            .map_err(|_| DatabaseError::Backend("connection pool closed".into()))
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}

/// An open transaction. Dropping it without `commit` rolls it back.
pub struct Transaction<'a> {
    database: &'a Database,
    base_version: u64,
    snapshot: Arc<Tables>,
    working: Tables,
    _permit: OwnedSemaphorePermit,
}

impl Transaction<'_> {
    pub fn tables(&self) -> &Tables {
        &self.working
    }

    pub fn tables_mut(&mut self) -> &mut Tables {
        &mut self.working
    }

    pub async fn commit(self) -> Result<(), DatabaseError> {
        let changes = ChangeSet::between(&self.snapshot, &self.working);
        if changes.is_empty() {
            return Ok(());
        }
        let written = changes.keys();

        let statement_timeout = self.database.config.statement_timeout;
        let mut guard = timeout(statement_timeout, self.database.committed.write())
            .await
            .map_err(|_| DatabaseError::StatementTimeout(statement_timeout))?;
        for key in &written {
            let last_written = guard.row_versions.get(key).copied().unwrap_or(0);
            if last_written > self.base_version {
                tracing::debug!(
                    ?key,
                    base_version = self.base_version,
                    last_written,
                    "write conflict"
                );
                return Err(DatabaseError::VersionMismatch {
                    expected: self.base_version,
                    actual: last_written,
                });
            }
        }

        let mut next = Tables::clone(&guard.tables);
        changes.apply_to(&mut next)?;
        guard.version += 1;
        let version = guard.version;
        guard.tables = Arc::new(next);
        guard
            .row_versions
            .extend(written.into_iter().map(|key| (key, version)));
        Ok(())
    }

    pub fn rollback(self) {
        tracing::debug!(base_version = self.base_version, "transaction rolled back");
    }
}
