pub mod client;
pub mod error;
pub mod model;

pub use client::ReportsApi;
pub use error::ReportsError;
pub use model::Report;

// Paging and filter vocabulary shared with callers.
pub use ledger_core::{FilterSpec, PageArgs, PageResult};
