use std::sync::Arc;

use ledger_core::{FilterSpec, PageArgs, PageResult};
use tracing::{debug, info, instrument};

use crate::contract::model::Report;
use crate::domain::error::DomainError;
use crate::domain::repo::ReportsRepository;

/// Domain service for the report ledger.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn ReportsRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn ReportsRepository>) -> Self {
        Self { repo }
    }

    #[instrument(
        name = "reports.service.append",
        skip(self, report),
        fields(input_index = report.input_index, output_index = report.output_index, payload_len = report.payload.len())
    )]
    pub async fn append(&self, report: Report) -> Result<Report, DomainError> {
        info!("Appending report");
        let stored = self.repo.create(report).await?;
        debug!("Report appended");
        Ok(stored)
    }

    #[instrument(name = "reports.service.get", skip(self))]
    pub async fn get(
        &self,
        input_index: u64,
        output_index: u64,
    ) -> Result<Option<Report>, DomainError> {
        let found = self.repo.find_by_key(input_index, output_index).await?;
        debug!(found = found.is_some(), "Report lookup finished");
        Ok(found)
    }

    #[instrument(name = "reports.service.count", skip(self, filters), fields(filters = filters.len()))]
    pub async fn count(&self, filters: &[FilterSpec]) -> Result<u64, DomainError> {
        let total = self.repo.count(filters).await?;
        debug!(total, "Counted reports");
        Ok(total)
    }

    #[instrument(name = "reports.service.list", skip(self, args, filters), fields(filters = filters.len()))]
    pub async fn list(
        &self,
        args: &PageArgs,
        filters: &[FilterSpec],
    ) -> Result<PageResult<Report>, DomainError> {
        debug!(?args, "Listing reports");
        let page = self.repo.find_all(args, filters).await?;
        debug!(
            rows = page.rows.len(),
            total = page.total,
            offset = page.offset,
            "Listed reports"
        );
        Ok(page)
    }

    #[instrument(name = "reports.service.list_by_input", skip(self, args))]
    pub async fn list_by_input(
        &self,
        args: &PageArgs,
        input_index: u64,
    ) -> Result<PageResult<Report>, DomainError> {
        debug!(?args, "Listing reports for input");
        let page = self.repo.find_all_by_input(args, input_index).await?;
        debug!(
            rows = page.rows.len(),
            total = page.total,
            "Listed reports for input"
        );
        Ok(page)
    }
}
