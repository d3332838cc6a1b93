//! Relay-style page arguments → concrete `(offset, limit)` window.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cursor::decode_cursor;

/// Page size used when a request names neither `first` nor `last`.
pub const DEFAULT_PAGE_SIZE: u64 = 1000;

/// Connection-style pagination arguments as received from a caller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageArgs {
    pub first: Option<i64>,
    pub last: Option<i64>,
    pub after: Option<String>,
    pub before: Option<String>,
}

impl PageArgs {
    pub fn first(n: i64) -> Self {
        Self {
            first: Some(n),
            ..Default::default()
        }
    }

    pub fn last(n: i64) -> Self {
        Self {
            last: Some(n),
            ..Default::default()
        }
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    /// Check the arguments without a row count, so a store can reject them
    /// before running any query.
    pub fn validate(&self) -> Result<(), PageError> {
        compute_window(self, 0, PageLimits::default()).map(|_| ())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLimits {
    /// Used when neither `first` nor `last` is given.
    pub default: u64,
    /// Upper bound applied to `first` / `last`.
    pub max: u64,
}

impl PageLimits {
    pub fn new(default: u64, max: u64) -> Self {
        Self {
            default: default.min(max),
            max,
        }
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE)
    }
}

/// Rows to skip and rows to return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("first and last cannot be used together")]
    FirstAndLast,

    #[error("first must not be negative (got {0})")]
    NegativeFirst(i64),

    #[error("last must not be negative (got {0})")]
    NegativeLast(i64),

    #[error("invalid cursor: {0:?}")]
    InvalidCursor(String),
}

/// Resolve page arguments against `total` matching rows.
///
/// `after = c` starts the range at position `c + 1`, `before = c` ends it
/// (exclusively) at `c`; both bounds are clamped into `[0, total]`. `first`
/// takes rows from the start of that range, `last` from its end. The result
/// depends only on the arguments, so a count and the fetch that follows it
/// agree on the same window.
pub fn compute_window(
    args: &PageArgs,
    total: u64,
    limits: PageLimits,
) -> Result<Window, PageError> {
    if args.first.is_some() && args.last.is_some() {
        return Err(PageError::FirstAndLast);
    }
    let first = args
        .first
        .map(|n| u64::try_from(n).map_err(|_| PageError::NegativeFirst(n)))
        .transpose()?;
    let last = args
        .last
        .map(|n| u64::try_from(n).map_err(|_| PageError::NegativeLast(n)))
        .transpose()?;

    let lower = match args.after.as_deref() {
        Some(c) => decode_cursor(c)?.saturating_add(1).min(total),
        None => 0,
    };
    let upper = match args.before.as_deref() {
        Some(c) => decode_cursor(c)?.min(total).max(lower),
        None => total,
    };
    let span = upper - lower;
    let bounded = args.before.is_some();

    let window = match (first, last) {
        (Some(n), _) => {
            let limit = n.min(limits.max);
            Window {
                offset: lower,
                limit: if bounded { limit.min(span) } else { limit },
            }
        }
        (None, Some(n)) => {
            let limit = n.min(limits.max).min(span);
            Window {
                offset: upper - limit,
                limit,
            }
        }
        (None, None) => Window {
            offset: lower,
            limit: if bounded {
                limits.default.min(span)
            } else {
                limits.default
            },
        },
    };
    Ok(window)
}
