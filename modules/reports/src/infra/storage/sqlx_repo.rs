//! sqlx-backed report store.
//!
//! Every listing is two statements: a `count(*)` under the translated filter,
//! then an ordered `LIMIT/OFFSET` select over the window derived from that
//! count. By default they run as independent reads on the pool; with
//! `consistent_reads` both run inside one transaction so they see the same
//! snapshot.

use async_trait::async_trait;
use ledger_core::{compute_window, FilterSpec, PageArgs, PageLimits, PageResult, ReportField, Window};
use ledger_db::{column, translate, SqlFilter};
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{debug, error};

use crate::contract::model::Report;
use crate::domain::error::DomainError;
use crate::domain::repo::ReportsRepository;
use crate::infra::storage::mapper::ReportRow;

/// Engine knobs, usually derived from `ReportsConfig`.
#[derive(Clone, Copy, Debug, Default)]
pub struct RepoConfig {
    pub limits: PageLimits,
    pub consistent_reads: bool,
}

pub struct SqlxReportsRepository {
    pool: SqlitePool,
    cfg: RepoConfig,
}

impl SqlxReportsRepository {
    pub fn new(pool: SqlitePool, cfg: RepoConfig) -> Self {
        Self { pool, cfg }
    }
}

// Rowid breaks ties between duplicate keys so pages stay stable.
const ORDER_BY: &str = " ORDER BY input_index ASC, output_index ASC, rowid ASC";

fn query_err(stage: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        error!(stage, error = %e, "report query failed");
        DomainError::query(format!("{stage}: {e}"))
    }
}

fn clamp_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

async fn count_with<'e, E>(exec: E, filter: &SqlFilter) -> Result<u64, DomainError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT count(*) FROM reports{}", filter.where_clause());
    debug!(sql = %sql, args = ?filter.args(), "count");

    let mut q = sqlx::query_scalar::<_, i64>(&sql);
    for arg in filter.args() {
        q = q.bind(*arg);
    }
    let n = q.fetch_one(exec).await.map_err(query_err("count"))?;
    Ok(u64::try_from(n).unwrap_or(0))
}

async fn fetch_window<'e, E>(
    exec: E,
    filter: &SqlFilter,
    window: Window,
) -> Result<Vec<Report>, DomainError>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "SELECT input_index, output_index, payload FROM reports{}{} LIMIT ? OFFSET ?",
        filter.where_clause(),
        ORDER_BY
    );
    debug!(sql = %sql, args = ?filter.args(), limit = window.limit, offset = window.offset, "select");

    let mut q = sqlx::query_as::<_, ReportRow>(&sql);
    for arg in filter.args() {
        q = q.bind(*arg);
    }
    let rows = q
        .bind(clamp_i64(window.limit))
        .bind(clamp_i64(window.offset))
        .fetch_all(exec)
        .await
        .map_err(query_err("select"))?;

    rows.into_iter().map(Report::try_from).collect()
}

/// True when the window cannot contain any row, so the select can be skipped.
fn is_empty_window(window: Window, total: u64) -> bool {
    window.limit == 0 || window.offset >= total
}

#[async_trait]
impl ReportsRepository for SqlxReportsRepository {
    async fn create(&self, report: Report) -> Result<Report, DomainError> {
        let row = ReportRow::try_from(&report)?;
        debug!(
            input_index = row.input_index,
            output_index = row.output_index,
            "insert"
        );

        sqlx::query("INSERT INTO reports (input_index, output_index, payload) VALUES (?, ?, ?)")
            .bind(row.input_index)
            .bind(row.output_index)
            .bind(&row.payload)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "report insert failed");
                DomainError::persistence(e.to_string())
            })?;
        Ok(report)
    }

    async fn find_by_key(
        &self,
        input_index: u64,
        output_index: u64,
    ) -> Result<Option<Report>, DomainError> {
        // Keys beyond i64 can never have been stored.
        let (Ok(input), Ok(output)) = (i64::try_from(input_index), i64::try_from(output_index))
        else {
            return Ok(None);
        };

        let sql = format!(
            "SELECT input_index, output_index, payload FROM reports WHERE {} = ? AND {} = ? ORDER BY rowid ASC LIMIT 1",
            column(ReportField::InputIndex),
            column(ReportField::OutputIndex)
        );
        debug!(sql = %sql, input, output, "find_by_key");

        let row = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(input)
            .bind(output)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_err("find_by_key"))?;
        row.map(Report::try_from).transpose()
    }

    async fn count(&self, filters: &[FilterSpec]) -> Result<u64, DomainError> {
        let filter = translate(filters)?;
        count_with(&self.pool, &filter).await
    }

    async fn find_all(
        &self,
        args: &PageArgs,
        filters: &[FilterSpec],
    ) -> Result<PageResult<Report>, DomainError> {
        // Reject bad input before touching the store.
        let filter = translate(filters)?;
        args.validate()?;

        let limits = self.cfg.limits;
        let (rows, total, window) = if self.cfg.consistent_reads {
            let mut tx = self.pool.begin().await.map_err(query_err("begin"))?;
            let total = count_with(&mut *tx, &filter).await?;
            let window = compute_window(args, total, limits)?;
            let rows = if is_empty_window(window, total) {
                Vec::new()
            } else {
                fetch_window(&mut *tx, &filter, window).await?
            };
            tx.commit().await.map_err(query_err("commit"))?;
            (rows, total, window)
        } else {
            let total = count_with(&self.pool, &filter).await?;
            let window = compute_window(args, total, limits)?;
            let rows = if is_empty_window(window, total) {
                Vec::new()
            } else {
                fetch_window(&self.pool, &filter, window).await?
            };
            (rows, total, window)
        };

        Ok(PageResult::new(rows, total, window.offset))
    }
}
