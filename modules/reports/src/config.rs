use ledger_core::{PageLimits, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};

use crate::infra::storage::RepoConfig;

/// Configuration for the reports module (`modules.reports`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ReportsConfig {
    /// Page size when a request names neither `first` nor `last`.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Upper bound for `first`/`last`.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Run count and select in one read transaction.
    #[serde(default)]
    pub consistent_reads: bool,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            consistent_reads: false,
        }
    }
}

impl ReportsConfig {
    /// `default_page_size` is clamped to `max_page_size`.
    pub fn page_limits(&self) -> PageLimits {
        PageLimits::new(self.default_page_size, self.max_page_size)
    }
}

impl From<&ReportsConfig> for RepoConfig {
    fn from(cfg: &ReportsConfig) -> Self {
        RepoConfig {
            limits: cfg.page_limits(),
            consistent_reads: cfg.consistent_reads,
        }
    }
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}
