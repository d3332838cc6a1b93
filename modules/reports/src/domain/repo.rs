use async_trait::async_trait;
use ledger_core::{FilterSpec, PageArgs, PageResult, ReportField};

use crate::contract::model::Report;
use crate::domain::error::DomainError;

/// Port for the domain layer: the report store.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait ReportsRepository: Send + Sync {
    /// Append one report.
    async fn create(&self, report: Report) -> Result<Report, DomainError>;

    /// Exact `(input_index, output_index)` match; the earliest stored row wins.
    async fn find_by_key(
        &self,
        input_index: u64,
        output_index: u64,
    ) -> Result<Option<Report>, DomainError>;

    /// Rows matching the conjunction of `filters`.
    async fn count(&self, filters: &[FilterSpec]) -> Result<u64, DomainError>;

    /// Count, resolve the window, then fetch the ordered page.
    async fn find_all(
        &self,
        args: &PageArgs,
        filters: &[FilterSpec],
    ) -> Result<PageResult<Report>, DomainError>;

    /// `find_all` scoped to one input.
    ///
    /// An input beyond `i64::MAX` can never have been stored, so it yields an
    /// empty page once the page arguments check out, matching `find_by_key`.
    async fn find_all_by_input(
        &self,
        args: &PageArgs,
        input_index: u64,
    ) -> Result<PageResult<Report>, DomainError> {
        if i64::try_from(input_index).is_err() {
            args.validate()?;
            return Ok(PageResult::empty(0, 0));
        }
        let filters = [FilterSpec::eq(
            ReportField::InputIndex.api_name(),
            input_index.to_string(),
        )];
        self.find_all(args, &filters).await
    }
}
