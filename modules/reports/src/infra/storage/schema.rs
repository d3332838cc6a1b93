//! Table provisioning for the reports store.

use sqlx::SqlitePool;
use tracing::debug;

/// No primary key and no uniqueness: duplicates are part of the contract.
const CREATE_REPORTS: &str = "CREATE TABLE IF NOT EXISTS reports (
    output_index INTEGER,
    payload TEXT,
    input_index INTEGER
)";

const CREATE_REPORTS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS reports_input_output_idx ON reports (input_index, output_index)";

/// Idempotent; safe to call on every start.
pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for stmt in [CREATE_REPORTS, CREATE_REPORTS_INDEX] {
        debug!(sql = stmt, "provisioning");
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}
