use thiserror::Error;

use crate::domain::error::DomainError;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportsError {
    #[error("unknown field: {field}")]
    UnknownField { field: String },

    #[error("unsupported operation on {field}: {op}")]
    UnsupportedOperation { field: String, op: String },

    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },

    #[error("invalid page arguments: {message}")]
    InvalidPageArguments { message: String },

    #[error("query failed: {message}")]
    Query { message: String },

    #[error("persistence failed: {message}")]
    Persistence { message: String },
}

impl From<DomainError> for ReportsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UnknownField { field } => Self::UnknownField { field },
            DomainError::UnsupportedOperation { field, op } => Self::UnsupportedOperation {
                field: field.to_string(),
                op: op.map(|o| o.as_str()).unwrap_or("none").to_owned(),
            },
            DomainError::InvalidValue { field, value } => Self::InvalidValue {
                field: field.to_string(),
                value,
            },
            DomainError::InvalidPageArguments(p) => Self::InvalidPageArguments {
                message: p.to_string(),
            },
            DomainError::Query { message } => Self::Query { message },
            DomainError::Persistence { message } => Self::Persistence { message },
        }
    }
}
