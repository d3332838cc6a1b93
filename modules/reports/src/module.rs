use std::sync::Arc;

use anyhow::Context;
use ledger_db::DbHandle;
use tracing::{debug, info};

use crate::config::ReportsConfig;
use crate::contract::client::ReportsApi;
use crate::domain::repo::ReportsRepository;
use crate::domain::service::Service;
use crate::gateways::local::ReportsLocalClient;
use crate::infra::storage::{create_tables, RepoConfig, SqlxReportsRepository};

/// Wired reports module. Each component is built once, in order, by [`Reports::init`].
#[derive(Clone)]
pub struct Reports {
    repo: Arc<dyn ReportsRepository>,
    service: Arc<Service>,
    client: Arc<dyn ReportsApi>,
}

impl Reports {
    /// Provision tables, then build repository → service → local client.
    ///
    /// A provisioning failure is returned; callers treat it as fatal.
    pub async fn init(db: Arc<DbHandle>, cfg: ReportsConfig) -> anyhow::Result<Self> {
        info!("Initializing reports module");
        debug!(
            "Loaded reports config: default_page_size={}, max_page_size={}, consistent_reads={}",
            cfg.default_page_size, cfg.max_page_size, cfg.consistent_reads
        );

        create_tables(db.pool())
            .await
            .context("failed to provision reports tables")?;

        let repo: Arc<dyn ReportsRepository> = Arc::new(SqlxReportsRepository::new(
            db.pool().clone(),
            RepoConfig::from(&cfg),
        ));
        let service = Arc::new(Service::new(Arc::clone(&repo)));
        let client: Arc<dyn ReportsApi> = Arc::new(ReportsLocalClient::new(Arc::clone(&service)));

        info!("Reports module ready");
        Ok(Self {
            repo,
            service,
            client,
        })
    }

    pub fn repository(&self) -> Arc<dyn ReportsRepository> {
        Arc::clone(&self.repo)
    }

    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// In-process client for other modules.
    pub fn client(&self) -> Arc<dyn ReportsApi> {
        Arc::clone(&self.client)
    }
}
