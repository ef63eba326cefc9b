//! Completion provider adapters.

pub mod workers_ai;

pub use workers_ai::{WorkersAiCompleter, WorkersAiCompleterConfig, FALLBACK_ANSWER};
