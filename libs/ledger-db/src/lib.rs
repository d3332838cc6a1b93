//! Ledger database access.
//!
//! This crate owns the SQLite connection pool behind the report ledger and the
//! translation of typed report filters into SQL predicates. It favours typed
//! connection options (`sqlx::sqlite::SqliteConnectOptions`) over hand-built
//! PRAGMA strings and only accepts a whitelisted set of SQLite pragmas.
//!
//! # Example
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> ledger_db::Result<()> {
//!     use ledger_db::{ConnectOpts, DbHandle};
//!
//!     let db = DbHandle::connect("sqlite://data/ledger.db", ConnectOpts::default()).await?;
//!     // Use db.pool() with sqlx queries
//!     db.close().await;
//!     Ok(())
//! }
//! ```

pub mod filter;
pub(crate) mod sqlite;

pub use filter::{column, translate, SqlFilter};

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

use crate::sqlite::{extract_sqlite_pragmas, is_memory_dsn, prepare_sqlite_path, Pragmas};

/// Library-local result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Typed error for the DB handle and helpers.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Unknown DSN: {0}")]
    UnknownDsn(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Connection options.
#[derive(Clone, Debug)]
pub struct ConnectOpts {
    /// Maximum number of connections in the pool.
    pub max_conns: Option<u32>,
    /// Minimum number of connections in the pool.
    pub min_conns: Option<u32>,
    /// Timeout to acquire a connection from the pool.
    pub acquire_timeout: Option<Duration>,
    /// Idle timeout before a connection is closed.
    pub idle_timeout: Option<Duration>,
    /// Maximum lifetime for a connection.
    pub max_lifetime: Option<Duration>,
    /// Test connection health before acquire.
    pub test_before_acquire: bool,
    /// For SQLite file DSNs, create parent directories if missing.
    pub create_sqlite_dirs: bool,
    /// Busy timeout for file databases; a `busy_timeout` param takes precedence.
    pub sqlite_busy_timeout: Option<Duration>,
    /// Whitelisted PRAGMA params; these override the same keys in the DSN query.
    pub sqlite_params: HashMap<String, String>,
}

impl Default for ConnectOpts {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            min_conns: None,
            acquire_timeout: Some(Duration::from_secs(30)),
            idle_timeout: None,
            max_lifetime: None,
            test_before_acquire: false,
            create_sqlite_dirs: true,
            sqlite_busy_timeout: None,
            sqlite_params: HashMap::new(),
        }
    }
}

impl ConnectOpts {
    fn pool_options(&self) -> SqlitePoolOptions {
        let mut o = SqlitePoolOptions::new();
        if let Some(n) = self.max_conns {
            o = o.max_connections(n);
        }
        if let Some(n) = self.min_conns {
            o = o.min_connections(n);
        }
        if let Some(t) = self.acquire_timeout {
            o = o.acquire_timeout(t);
        }
        if let Some(t) = self.idle_timeout {
            o = o.idle_timeout(t);
        }
        if let Some(t) = self.max_lifetime {
            o = o.max_lifetime(t);
        }
        if self.test_before_acquire {
            o = o.test_before_acquire(true);
        }
        o
    }
}

/// Shared, thread-safe handle to the ledger database.
#[derive(Debug)]
pub struct DbHandle {
    pool: SqlitePool,
    dsn: String,
    memory: bool,
}

impl DbHandle {
    /// Check that the DSN names a SQLite database.
    ///
    /// Only the scheme prefix is inspected; the tail is left untouched.
    pub fn detect(dsn: &str) -> Result<()> {
        let s = dsn.trim_start();
        if s.starts_with("sqlite:") {
            Ok(())
        } else {
            Err(DbError::UnknownDsn(dsn.to_string()))
        }
    }

    /// Connect and build handle.
    pub async fn connect(dsn: &str, opts: ConnectOpts) -> Result<Self> {
        Self::detect(dsn)?;
        let dsn = prepare_sqlite_path(dsn.trim(), opts.create_sqlite_dirs)?;

        // DSN query pragmas first, explicit params on top.
        let (clean_dsn, mut pairs) = extract_sqlite_pragmas(&dsn);
        pairs.extend(
            opts.sqlite_params
                .iter()
                .map(|(k, v)| (k.to_lowercase(), v.clone())),
        );
        let pragmas = Pragmas::from_pairs(&pairs);
        let memory = is_memory_dsn(&clean_dsn);

        let connect_opts = SqliteConnectOptions::from_str(&clean_dsn)?.create_if_missing(true);
        let connect_opts = pragmas.apply(connect_opts, memory, opts.sqlite_busy_timeout);

        let mut pool_opts = opts.pool_options();
        if memory {
            // An in-memory database lives only as long as its connection.
            pool_opts = pool_opts
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_opts.connect_with(connect_opts).await?;
        tracing::debug!(dsn = %clean_dsn, memory, "SQLite pool connected");

        Ok(Self {
            pool,
            dsn: clean_dsn,
            memory,
        })
    }

    /// Graceful pool close. (Dropping the pool also closes it; this just makes it explicit.)
    pub async fn close(&self) {
        self.pool.close().await
    }

    /// Get the DSN used for this connection, without pragma params.
    pub fn dsn(&self) -> &str {
        &self.dsn
    }

    pub fn is_memory(&self) -> bool {
        self.memory
    }

    /// Underlying sqlx pool (cheap to clone).
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
