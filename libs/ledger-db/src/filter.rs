//! Report filters → SQL predicate with positional parameters.
//!
//! Values never reach the SQL text; every filter contributes one `?`
//! placeholder and one bound `i64`, in filter order.

use ledger_core::{parse_filters, Filter, FilterError, FilterSpec, ReportField};

/// Column storing a report field. The match is exhaustive, so a new field
/// cannot be added without a column.
pub fn column(field: ReportField) -> &'static str {
    match field {
        ReportField::InputIndex => "input_index",
        ReportField::OutputIndex => "output_index",
    }
}

/// Conjunction of equality predicates plus the values to bind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SqlFilter {
    predicate: String,
    args: Vec<i64>,
}

impl SqlFilter {
    pub fn from_filters(filters: &[Filter]) -> Self {
        let predicate = filters
            .iter()
            .map(|f| format!("{} = ?", column(f.field)))
            .collect::<Vec<_>>()
            .join(" AND ");
        let args = filters.iter().map(Filter::value).collect();
        Self { predicate, args }
    }

    pub fn is_empty(&self) -> bool {
        self.predicate.is_empty()
    }

    /// `input_index = ? AND output_index = ?`, or empty for no filters.
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// Values for the placeholders, in order.
    pub fn args(&self) -> &[i64] {
        &self.args
    }

    /// ` WHERE <predicate>` ready to splice after a table name, or `""`.
    pub fn where_clause(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.predicate)
        }
    }
}

/// Validate filter specs and translate them in one step.
///
/// Fails with the first [`FilterError`] in list order; no SQL is produced in
/// that case.
pub fn translate(specs: &[FilterSpec]) -> Result<SqlFilter, FilterError> {
    let filters = parse_filters(specs)?;
    Ok(SqlFilter::from_filters(&filters))
}
