//! SQLite DSN parsing and cleaning.

/// Keys lifted out of the DSN query and applied as typed PRAGMA options.
pub(crate) const SQLITE_PRAGMA_PARAMS: &[&str] =
    &["journal_mode", "synchronous", "busy_timeout", "foreign_keys"];

/// Split a DSN into `(base, query)` at the first `?`.
pub(crate) fn split_query(dsn: &str) -> (&str, Option<&str>) {
    match dsn.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (dsn, None),
    }
}

fn query_pairs(query: &str) -> impl Iterator<Item = (&str, &str)> {
    query
        .split('&')
        .filter(|kv| !kv.is_empty())
        .map(|kv| kv.split_once('=').unwrap_or((kv, "")))
}

/// Extract whitelisted PRAGMA parameters and return the cleaned DSN.
///
/// Keys are matched case-insensitively and returned lowercase, in DSN order.
/// Everything else in the query (`mode`, `cache`, ...) is kept for sqlx.
pub(crate) fn extract_sqlite_pragmas(dsn: &str) -> (String, Vec<(String, String)>) {
    let (base, query) = split_query(dsn);
    let Some(query) = query else {
        return (dsn.to_string(), Vec::new());
    };

    let mut extracted = Vec::new();
    let mut remaining = Vec::new();
    for (key, value) in query_pairs(query) {
        let key_lower = key.to_lowercase();
        if SQLITE_PRAGMA_PARAMS.contains(&key_lower.as_str()) {
            extracted.push((key_lower, value.to_string()));
        } else {
            remaining.push(format!("{key}={value}"));
        }
    }

    let clean = if remaining.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{}", remaining.join("&"))
    };
    (clean, extracted)
}

/// Check if the DSN represents an in-memory SQLite database.
pub(crate) fn is_memory_dsn(dsn: &str) -> bool {
    let (base, query) = split_query(dsn);
    if base == "sqlite::memory:" || base == "sqlite://memory:" {
        return true;
    }
    query.is_some_and(|q| {
        query_pairs(q).any(|(k, v)| k.eq_ignore_ascii_case("mode") && v.eq_ignore_ascii_case("memory"))
    })
}
