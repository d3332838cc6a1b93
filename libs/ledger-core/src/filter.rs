//! Closed filter vocabulary over report fields.
//!
//! Requests arrive as [`FilterSpec`] (string field name, one optional slot per
//! operator). [`parse_filters`] turns them into typed [`Filter`]s; only
//! equality on a known [`ReportField`] survives.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fields a report listing can be filtered on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportField {
    InputIndex,
    OutputIndex,
}

impl ReportField {
    pub const ALL: [ReportField; 2] = [ReportField::InputIndex, ReportField::OutputIndex];

    /// Name used by API callers.
    pub fn api_name(self) -> &'static str {
        match self {
            ReportField::InputIndex => "InputIndex",
            ReportField::OutputIndex => "OutputIndex",
        }
    }

    /// Resolve an API field name. Matching is exact.
    pub fn from_api_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.api_name() == name)
    }
}

impl fmt::Display for ReportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Operators a request may name. Only `Eq` is executable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    In,
}

impl FilterOp {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Ne => "ne",
            FilterOp::Gt => "gt",
            FilterOp::Ge => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Le => "lte",
            FilterOp::In => "in",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// `op` is `None` when the element named no operator at all.
    #[error("unsupported operation on {field}: {}", op_name(.op))]
    UnsupportedOperation {
        field: ReportField,
        op: Option<FilterOp>,
    },

    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: ReportField, value: String },
}

fn op_name(op: &Option<FilterOp>) -> &'static str {
    op.map(FilterOp::as_str).unwrap_or("none")
}

/// One filter element as received from a caller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eq: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ne: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<String>,
    #[serde(default, rename = "in", skip_serializing_if = "Option::is_none")]
    pub in_list: Option<Vec<String>>,
}

impl FilterSpec {
    /// Equality element, e.g. `FilterSpec::eq("InputIndex", "5")`.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            eq: Some(value.into()),
            ..Default::default()
        }
    }

    /// First non-equality operator slot that is populated.
    fn other_op(&self) -> Option<FilterOp> {
        [
            (self.ne.is_some(), FilterOp::Ne),
            (self.gt.is_some(), FilterOp::Gt),
            (self.gte.is_some(), FilterOp::Ge),
            (self.lt.is_some(), FilterOp::Lt),
            (self.lte.is_some(), FilterOp::Le),
            (self.in_list.is_some(), FilterOp::In),
        ]
        .into_iter()
        .find_map(|(set, op)| set.then_some(op))
    }
}

/// A validated equality predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Filter {
    pub field: ReportField,
    /// Always in `0..=i64::MAX`.
    value: i64,
}

impl Filter {
    pub fn value(&self) -> i64 {
        self.value
    }
}

impl TryFrom<&FilterSpec> for Filter {
    type Error = FilterError;

    fn try_from(spec: &FilterSpec) -> Result<Self, Self::Error> {
        let field = ReportField::from_api_name(&spec.field)
            .ok_or_else(|| FilterError::UnknownField(spec.field.clone()))?;

        // Extra operators alongside `eq` are rejected too, never dropped.
        if let Some(op) = spec.other_op() {
            return Err(FilterError::UnsupportedOperation {
                field,
                op: Some(op),
            });
        }
        let raw = spec
            .eq
            .as_deref()
            .ok_or(FilterError::UnsupportedOperation { field, op: None })?;

        let value = raw
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|v| *v >= 0)
            .ok_or_else(|| FilterError::InvalidValue {
                field,
                value: raw.to_string(),
            })?;

        Ok(Filter { field, value })
    }
}

/// Validate a filter list, preserving its order. Fails on the first bad element.
pub fn parse_filters(specs: &[FilterSpec]) -> Result<Vec<Filter>, FilterError> {
    specs.iter().map(Filter::try_from).collect()
}
