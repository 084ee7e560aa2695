//! Reasoning Engine and dashboard read models.
//!
//! [`ReasoningEngine`] holds a shared, immutable [`DatasetStore`] snapshot and the
//! analysis policy. Every method is a pure function of its arguments and the
//! snapshot, so the engine can be cloned into concurrent request handlers freely.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::aggregation::{SliceFilter, TerminalFilter};
use crate::config::PolicyConfig;
use crate::store::DatasetStore;

pub mod compliance;
pub mod filters;
pub mod format;
pub mod overview;
pub mod passengers;
pub mod queue;
pub mod root_cause;
pub mod security;
pub mod summary;
pub mod trends;
pub mod voc;

#[cfg(test)]
pub(crate) mod fixtures;

pub use compliance::upcoming_tasks;
pub use filters::filter_options;
pub use root_cause::{IssueType, RecommendationTable};

#[derive(Debug, Clone)]
pub struct ReasoningEngine {
    store: Arc<DatasetStore>,
    policy: PolicyConfig,
    recommendations: RecommendationTable,
}

impl ReasoningEngine {
    pub fn new(store: Arc<DatasetStore>, policy: PolicyConfig) -> Self {
        Self {
            store,
            policy,
            recommendations: RecommendationTable::default(),
        }
    }

    /// Replace the root-cause recommendation table.
    pub fn with_recommendations(mut self, recommendations: RecommendationTable) -> Self {
        self.recommendations = recommendations;
        self
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    fn day(&self, date: NaiveDate, terminals: &TerminalFilter) -> SliceFilter {
        SliceFilter::on(date, terminals)
    }
}
