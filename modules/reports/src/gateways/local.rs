use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::ReportsApi, error::ReportsError, model::Report, FilterSpec, PageArgs, PageResult,
};
use crate::domain::service::Service;

/// Local implementation of the ReportsApi trait that delegates to the domain service
pub struct ReportsLocalClient {
    service: Arc<Service>,
}

impl ReportsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl ReportsApi for ReportsLocalClient {
    async fn create_report(&self, report: Report) -> Result<Report, ReportsError> {
        self.service.append(report).await.map_err(ReportsError::from)
    }

    async fn get_report(
        &self,
        input_index: u64,
        output_index: u64,
    ) -> Result<Option<Report>, ReportsError> {
        self.service
            .get(input_index, output_index)
            .await
            .map_err(ReportsError::from)
    }

    async fn count_reports(&self, filters: &[FilterSpec]) -> Result<u64, ReportsError> {
        self.service.count(filters).await.map_err(ReportsError::from)
    }

    async fn list_reports(
        &self,
        args: &PageArgs,
        filters: &[FilterSpec],
    ) -> Result<PageResult<Report>, ReportsError> {
        self.service
            .list(args, filters)
            .await
            .map_err(ReportsError::from)
    }

    async fn list_reports_by_input(
        &self,
        args: &PageArgs,
        input_index: u64,
    ) -> Result<PageResult<Report>, ReportsError> {
        self.service
            .list_by_input(args, input_index)
            .await
            .map_err(ReportsError::from)
    }
}
