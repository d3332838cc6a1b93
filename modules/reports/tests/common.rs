#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use ledger_db::{ConnectOpts, DbHandle};
use reports::config::ReportsConfig;
use reports::contract::model::Report;
use reports::Reports;

pub async fn memory_db() -> Result<Arc<DbHandle>> {
    Ok(Arc::new(
        DbHandle::connect("sqlite::memory:", ConnectOpts::default()).await?,
    ))
}

pub async fn memory_reports(cfg: ReportsConfig) -> Result<Reports> {
    Reports::init(memory_db().await?, cfg).await
}

/// Insert `(input, output)` pairs in the given order; payload is `[input, output]`.
pub async fn seed(reports: &Reports, keys: &[(u64, u64)]) -> Result<()> {
    let repo = reports.repository();
    for &(i, o) in keys {
        repo.create(Report::new(i, o, vec![i as u8, o as u8])).await?;
    }
    Ok(())
}

/// Five inputs with a varying number of outputs, inserted out of order.
pub fn sample_keys() -> Vec<(u64, u64)> {
    vec![
        (2, 1),
        (0, 0),
        (4, 0),
        (1, 0),
        (2, 0),
        (0, 1),
        (4, 2),
        (3, 0),
        (4, 1),
        (0, 2),
        (1, 1),
    ]
}

pub fn keys_of(rows: &[Report]) -> Vec<(u64, u64)> {
    rows.iter().map(|r| (r.input_index, r.output_index)).collect()
}
