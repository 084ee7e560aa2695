//! Conversational access to the analyses.
//!
//! [`ContextBuilder`] turns a free-text question into a markdown block of the
//! relevant figures. A [`TextGenerator`] (an external language model) may use
//! that block to answer; when none is configured or it fails, the
//! [`RuleBasedGenerator`] answers from the analyses directly.

pub mod context;
pub mod generator;
pub mod prompts;
pub mod service;

pub use context::ContextBuilder;
pub use generator::{ChatError, ChatRole, ChatTurn, RuleBasedGenerator, TextGenerator};
pub use prompts::{system_prompt, DemoPrompt, DATA_CONTEXT, DEMO_PROMPTS, QUICK_QUERIES};
pub use service::{ChatReply, ChatService, ReplySource};
