use sqlx::FromRow;

use crate::contract::model::Report;
use crate::domain::error::DomainError;

/// Storage shape of a report: signed integers and a hex payload.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ReportRow {
    pub input_index: i64,
    pub output_index: i64,
    pub payload: String,
}

impl TryFrom<&Report> for ReportRow {
    type Error = DomainError;

    fn try_from(r: &Report) -> Result<Self, Self::Error> {
        let to_i64 = |name: &str, v: u64| {
            i64::try_from(v).map_err(|_| {
                DomainError::persistence(format!("{name} {v} does not fit the store"))
            })
        };
        Ok(Self {
            input_index: to_i64("input_index", r.input_index)?,
            output_index: to_i64("output_index", r.output_index)?,
            payload: hex::encode(&r.payload),
        })
    }
}

impl TryFrom<ReportRow> for Report {
    type Error = DomainError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        let to_u64 = |name: &str, v: i64| {
            u64::try_from(v).map_err(|_| DomainError::query(format!("stored {name} is negative: {v}")))
        };
        let payload = hex::decode(&row.payload)
            .map_err(|e| DomainError::query(format!("stored payload is not hex: {e}")))?;
        Ok(Report {
            input_index: to_u64("input_index", row.input_index)?,
            output_index: to_u64("output_index", row.output_index)?,
            payload,
        })
    }
}
