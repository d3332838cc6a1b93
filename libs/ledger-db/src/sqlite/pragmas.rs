//! SQLite PRAGMA parameter handling with typed enums.

use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};

/// Busy timeout for file databases when nothing else is configured.
pub(crate) const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// SQLite journal mode options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum JournalMode {
    Delete,
    Wal,
    Memory,
    Truncate,
    Persist,
    Off,
}

impl JournalMode {
    fn to_sqlx(self) -> SqliteJournalMode {
        match self {
            JournalMode::Delete => SqliteJournalMode::Delete,
            JournalMode::Wal => SqliteJournalMode::Wal,
            JournalMode::Memory => SqliteJournalMode::Memory,
            JournalMode::Truncate => SqliteJournalMode::Truncate,
            JournalMode::Persist => SqliteJournalMode::Persist,
            JournalMode::Off => SqliteJournalMode::Off,
        }
    }

    /// Parse from string (case-insensitive).
    fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DELETE" => Some(JournalMode::Delete),
            "WAL" => Some(JournalMode::Wal),
            "MEMORY" => Some(JournalMode::Memory),
            "TRUNCATE" => Some(JournalMode::Truncate),
            "PERSIST" => Some(JournalMode::Persist),
            "OFF" => Some(JournalMode::Off),
            _ => None,
        }
    }
}

/// SQLite synchronous mode options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SyncMode {
    Off,
    Normal,
    Full,
    Extra,
}

impl SyncMode {
    fn to_sqlx(self) -> SqliteSynchronous {
        match self {
            SyncMode::Off => SqliteSynchronous::Off,
            SyncMode::Normal => SqliteSynchronous::Normal,
            SyncMode::Full => SqliteSynchronous::Full,
            SyncMode::Extra => SqliteSynchronous::Extra,
        }
    }

    /// Parse from string (case-insensitive).
    fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "OFF" => Some(SyncMode::Off),
            "NORMAL" => Some(SyncMode::Normal),
            "FULL" => Some(SyncMode::Full),
            "EXTRA" => Some(SyncMode::Extra),
            _ => None,
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Parsed SQLite PRAGMA parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Pragmas {
    pub journal_mode: Option<JournalMode>,
    pub synchronous: Option<SyncMode>,
    pub busy_timeout_ms: Option<u64>,
    pub foreign_keys: Option<bool>,
}

impl Pragmas {
    /// Parse PRAGMA parameters from ordered key-value pairs; later pairs win.
    pub(crate) fn from_pairs(pairs: &[(String, String)]) -> Self {
        let mut pragmas = Pragmas::default();

        for (key, value) in pairs {
            match key.to_lowercase().as_str() {
                "journal_mode" => match JournalMode::parse(value) {
                    Some(mode) => pragmas.journal_mode = Some(mode),
                    None => {
                        tracing::warn!("Invalid 'journal_mode' PRAGMA value '{}', ignoring", value)
                    }
                },
                "synchronous" => match SyncMode::parse(value) {
                    Some(mode) => pragmas.synchronous = Some(mode),
                    None => {
                        tracing::warn!("Invalid 'synchronous' PRAGMA value '{}', ignoring", value)
                    }
                },
                "busy_timeout" => match value.parse::<u64>() {
                    Ok(ms) => pragmas.busy_timeout_ms = Some(ms),
                    Err(_) => {
                        tracing::warn!("Invalid 'busy_timeout' PRAGMA value '{}', ignoring", value)
                    }
                },
                "foreign_keys" => match parse_bool(value) {
                    Some(on) => pragmas.foreign_keys = Some(on),
                    None => {
                        tracing::warn!("Invalid 'foreign_keys' PRAGMA value '{}', ignoring", value)
                    }
                },
                _ => {
                    tracing::debug!("Unknown SQLite PRAGMA parameter: {}", key);
                }
            }
        }

        pragmas
    }

    fn resolved_journal_mode(&self, memory: bool) -> JournalMode {
        self.journal_mode.unwrap_or(if memory {
            JournalMode::Delete
        } else {
            JournalMode::Wal
        })
    }

    /// Apply onto typed connect options.
    ///
    /// Defaults: WAL for files, DELETE for memory, NORMAL sync, and a busy
    /// timeout (file databases only) taken from the `busy_timeout` param, then
    /// `fallback_busy`, then [`DEFAULT_BUSY_TIMEOUT`].
    pub(crate) fn apply(
        &self,
        opts: SqliteConnectOptions,
        memory: bool,
        fallback_busy: Option<Duration>,
    ) -> SqliteConnectOptions {
        let mut opts = opts
            .journal_mode(self.resolved_journal_mode(memory).to_sqlx())
            .synchronous(self.synchronous.unwrap_or(SyncMode::Normal).to_sqlx());

        if !memory {
            let busy = self
                .busy_timeout_ms
                .map(Duration::from_millis)
                .or(fallback_busy)
                .unwrap_or(DEFAULT_BUSY_TIMEOUT);
            opts = opts.busy_timeout(busy);
        }

        if let Some(on) = self.foreign_keys {
            opts = opts.foreign_keys(on);
        }
        opts
    }
}
