//! Disambiguation of ranked operation candidates through an external chat
//! backend, with a deterministic fallback so a missing or misbehaving
//! backend never blocks an answer and never invents an operation.

pub mod chooser;
pub mod client;
pub mod config;

pub use chooser::{Chooser, ReplyOutcome, fallback_choice, format_prompt, parse_reply};
pub use client::{BackendError, ChatBackend, OllamaClient};
pub use config::LlmConfig;
