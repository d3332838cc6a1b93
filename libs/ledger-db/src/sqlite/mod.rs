//! SQLite-specific DSN handling and connection tuning.

mod dsn;
mod path;
mod pragmas;

pub(crate) use dsn::{extract_sqlite_pragmas, is_memory_dsn};
pub(crate) use path::prepare_sqlite_path;
pub(crate) use pragmas::Pragmas;
