use std::cell::Cell;
use std::time::Duration;

use log::{debug, info, warn};
use rusqlite::Connection;

use crate::config::DomainConfig;
use crate::error::Result;
use crate::query::QueryBuilder;
use crate::repository::Transactional;

use super::schema::init_schema;

/// Owner of the SQLite connection.
pub struct SqliteStorage {
    conn: Connection,
    config: DomainConfig,
}

impl SqliteStorage {
    /// Open the database named by `config.database.path` (in memory when
    /// unset) and create missing tables.
    pub fn open(config: &DomainConfig) -> Result<Self> {
        let conn = match &config.database.path {
            Some(path) => Connection::open(path)?,
            None => Connection::open_in_memory()?,
        };
        conn.busy_timeout(Duration::from_millis(config.database.busy_timeout_ms))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        init_schema(&conn)?;

        info!(
            "opened content store at {}",
            config.database.path.as_deref().unwrap_or(":memory:")
        );
        Ok(Self {
            conn,
            config: config.clone(),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(&DomainConfig::default())
    }

    pub fn config(&self) -> &DomainConfig {
        &self.config
    }

    /// Borrow the connection for a unit of work.
    pub fn session(&self) -> SqliteSession<'_> {
        SqliteSession {
            conn: &self.conn,
            builder: QueryBuilder::new(self.config.neutral_culture_id),
            neutral_culture_id: self.config.neutral_culture_id,
            depth: Cell::new(0),
        }
    }
}

/// Repository view over a borrowed connection.
pub struct SqliteSession<'c> {
    pub(super) conn: &'c Connection,
    pub(super) builder: QueryBuilder,
    pub(super) neutral_culture_id: i64,
    depth: Cell<u32>,
}

impl SqliteSession<'_> {
    pub fn connection(&self) -> &Connection {
        self.conn
    }
}

/// Bumps the savepoint depth and restores it on drop, unwinding included.
struct DepthGuard<'a> {
    depth: &'a Cell<u32>,
    outer: u32,
}

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a Cell<u32>) -> Self {
        let outer = depth.get();
        depth.set(outer + 1);
        Self { depth, outer }
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.outer);
    }
}

impl Transactional for SqliteSession<'_> {
    fn transaction<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        let depth = self.depth.get();
        let savepoint = format!("sp_{}", depth);
        debug!("SAVEPOINT {}", savepoint);
        self.conn.execute_batch(&format!("SAVEPOINT {}", savepoint))?;

        let result = {
            let _guard = DepthGuard::enter(&self.depth);
            work(self)
        };

        match result {
            Ok(value) => {
                self.conn.execute_batch(&format!("RELEASE {}", savepoint))?;
                Ok(value)
            }
            Err(err) => {
                debug!("ROLLBACK TO {}: {}", savepoint, err);
                let rollback = format!("ROLLBACK TO {0}; RELEASE {0}", savepoint);
                if let Err(rollback_err) = self.conn.execute_batch(&rollback) {
                    warn!("rollback of {} failed: {}", savepoint, rollback_err);
                }
                Err(err)
            }
        }
    }
}
