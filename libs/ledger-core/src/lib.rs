//! Storage-agnostic building blocks for paging through the report ledger:
//! the closed filter vocabulary, the opaque cursor codec, the window
//! calculator and the page envelope handed back to callers.

pub mod cursor;
pub mod filter;
pub mod page;
pub mod window;

pub use cursor::{decode_cursor, encode_cursor};
pub use filter::{parse_filters, Filter, FilterError, FilterOp, FilterSpec, ReportField};
pub use page::PageResult;
pub use window::{compute_window, PageArgs, PageError, PageLimits, Window, DEFAULT_PAGE_SIZE};

#[cfg(test)]
mod tests;
