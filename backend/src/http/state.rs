//! Application state for the HTTP server.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::aggregation::TerminalFilter;
use crate::chat::ChatService;
use crate::config::DashboardConfig;
use crate::services::ReasoningEngine;

use super::dto::{parse_date, parse_terminals};
use super::error::AppError;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: ReasoningEngine,
    pub config: Arc<DashboardConfig>,
    pub chat: ChatService,
    /// Digest of the store snapshot, computed once at startup.
    pub fingerprint: Arc<str>,
}

impl AppState {
    /// State with the rule-based chat responder only.
    pub fn new(engine: ReasoningEngine, config: DashboardConfig) -> Self {
        let chat = ChatService::new(
            engine.clone(),
            config.data.report_date,
            config.ai.history_limit,
        );
        let fingerprint = Arc::from(engine.store().fingerprint());
        Self {
            engine,
            config: Arc::new(config),
            chat,
            fingerprint,
        }
    }

    pub fn with_chat(mut self, chat: ChatService) -> Self {
        self.chat = chat;
        self
    }

    pub fn date(&self, raw: Option<&str>) -> Result<NaiveDate, AppError> {
        parse_date(raw, self.config.data.report_date)
    }

    pub fn terminals(&self, raw: Option<&str>) -> TerminalFilter {
        parse_terminals(raw, &self.config.filters.terminals)
    }
}
