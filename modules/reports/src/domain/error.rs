use ledger_core::{FilterError, FilterOp, PageError, ReportField};
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown field: {field}")]
    UnknownField { field: String },

    #[error("unsupported operation on {field}: {}", op_name(.op))]
    UnsupportedOperation {
        field: ReportField,
        op: Option<FilterOp>,
    },

    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: ReportField, value: String },

    #[error("invalid page arguments: {0}")]
    InvalidPageArguments(#[from] PageError),

    #[error("query failed: {message}")]
    Query { message: String },

    #[error("persistence failed: {message}")]
    Persistence { message: String },
}

fn op_name(op: &Option<FilterOp>) -> &'static str {
    op.map(FilterOp::as_str).unwrap_or("none")
}

impl DomainError {
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }
}

impl From<FilterError> for DomainError {
    fn from(e: FilterError) -> Self {
        match e {
            FilterError::UnknownField(field) => Self::UnknownField { field },
            FilterError::UnsupportedOperation { field, op } => {
                Self::UnsupportedOperation { field, op }
            }
            FilterError::InvalidValue { field, value } => Self::InvalidValue { field, value },
        }
    }
}
