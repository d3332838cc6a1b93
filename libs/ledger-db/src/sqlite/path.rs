//! SQLite path preparation.

use std::io;
use std::path::PathBuf;

use super::dsn::{is_memory_dsn, split_query};

/// Ensure the parent directory of a file-backed SQLite DSN exists.
///
/// Memory databases and `create_dirs == false` leave the filesystem alone.
/// The DSN itself is returned unchanged.
pub(crate) fn prepare_sqlite_path(dsn: &str, create_dirs: bool) -> io::Result<String> {
    if !create_dirs || is_memory_dsn(dsn) {
        return Ok(dsn.to_string());
    }

    if let Some(path) = file_path_from_dsn(dsn) {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }

    Ok(dsn.to_string())
}

/// File path named by a SQLite DSN, resolved the way sqlx does:
/// `sqlite://` or `sqlite:` is stripped and the rest is the path.
pub(crate) fn file_path_from_dsn(dsn: &str) -> Option<PathBuf> {
    if is_memory_dsn(dsn) {
        return None;
    }
    let (base, _) = split_query(dsn);
    let path = base
        .strip_prefix("sqlite://")
        .or_else(|| base.strip_prefix("sqlite:"))?;
    (!path.is_empty()).then(|| PathBuf::from(path))
}
