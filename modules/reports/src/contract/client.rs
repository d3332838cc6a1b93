use async_trait::async_trait;

use crate::contract::{error::ReportsError, model::Report, FilterSpec, PageArgs, PageResult};

/// Public API of the reports module for in-process consumers.
#[async_trait]
pub trait ReportsApi: Send + Sync {
    /// Append a report; duplicates are accepted.
    async fn create_report(&self, report: Report) -> Result<Report, ReportsError>;

    /// Exact lookup. `Ok(None)` when nothing is stored at that coordinate.
    async fn get_report(
        &self,
        input_index: u64,
        output_index: u64,
    ) -> Result<Option<Report>, ReportsError>;

    /// Rows matching all filters.
    async fn count_reports(&self, filters: &[FilterSpec]) -> Result<u64, ReportsError>;

    /// One page of filtered reports in `(input_index, output_index)` order.
    async fn list_reports(
        &self,
        args: &PageArgs,
        filters: &[FilterSpec],
    ) -> Result<PageResult<Report>, ReportsError>;

    /// Same as `list_reports` with a single `InputIndex` equality filter.
    async fn list_reports_by_input(
        &self,
        args: &PageArgs,
        input_index: u64,
    ) -> Result<PageResult<Report>, ReportsError>;
}
