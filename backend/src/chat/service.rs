//! Chat orchestration: context, optional external generator, fallback.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregation::TerminalFilter;
use crate::services::ReasoningEngine;

use super::context::ContextBuilder;
use super::generator::{ChatError, ChatTurn, RuleBasedGenerator, TextGenerator};
use super::prompts::system_prompt;

/// Which path produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Generator,
    RuleBased,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub source: ReplySource,
}

/// Answers operator questions about one report date.
///
/// With no generator configured, or when the generator fails, the reply comes
/// from [`RuleBasedGenerator`]. Analyses run on the blocking pool.
#[derive(Clone)]
pub struct ChatService {
    engine: ReasoningEngine,
    generator: Option<Arc<dyn TextGenerator>>,
    report_date: NaiveDate,
    history_limit: usize,
}

impl ChatService {
    pub fn new(engine: ReasoningEngine, report_date: NaiveDate, history_limit: usize) -> Self {
        Self {
            engine,
            generator: None,
            report_date,
            history_limit,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    pub fn report_date(&self) -> NaiveDate {
        self.report_date
    }

    /// The most recent `history_limit` turns.
    pub fn recent<'h>(&self, history: &'h [ChatTurn]) -> &'h [ChatTurn] {
        &history[history.len().saturating_sub(self.history_limit)..]
    }

    async fn run_blocking<F, T>(&self, f: F) -> Result<T, ChatError>
    where
        F: FnOnce(&ReasoningEngine) -> T + Send + 'static,
        T: Send + 'static,
    {
        let engine = self.engine.clone();
        tokio::task::spawn_blocking(move || f(&engine))
            .await
            .map_err(|e| ChatError::Internal(format!("Task join error: {}", e)))
    }

    async fn fallback(
        &self,
        query: &str,
        date: NaiveDate,
        terminals: &TerminalFilter,
    ) -> Result<ChatReply, ChatError> {
        let query = query.to_string();
        let terminals = terminals.clone();
        let response = self
            .run_blocking(move |engine| RuleBasedGenerator::new(engine).respond(&query, date, &terminals))
            .await?;
        Ok(ChatReply {
            response,
            source: ReplySource::RuleBased,
        })
    }

    pub async fn respond(
        &self,
        query: &str,
        date: NaiveDate,
        terminals: &TerminalFilter,
        history: &[ChatTurn],
    ) -> Result<ChatReply, ChatError> {
        let Some(generator) = self.generator.as_ref() else {
            return self.fallback(query, date, terminals).await;
        };

        let context = {
            let query = query.to_string();
            let terminals = terminals.clone();
            self.run_blocking(move |engine| ContextBuilder::new(engine).build(&query, date, &terminals))
                .await?
        };

        let system = system_prompt(self.report_date);
        match generator
            .generate_text(&system, &context, self.recent(history), query)
            .await
        {
            Ok(response) => Ok(ChatReply {
                response,
                source: ReplySource::Generator,
            }),
            Err(e) => {
                log::warn!("{}; falling back to rule-based response", e);
                self.fallback(query, date, terminals).await
            }
        }
    }
}
