//! Executors
//!
//! Drive chat calls by combining a provider's transformers with HTTP.

pub mod chat;

pub use chat::{ChatExecutor, HttpChatExecutor};
