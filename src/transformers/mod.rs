//! Transformers layer
//!
//! Traits that translate between the provider-agnostic request/response shapes
//! and each provider's JSON. Providers implement them in
//! `providers::<name>::transformers` and `providers::<name>::streaming`; the
//! [`HttpChatExecutor`](crate::executors::chat::HttpChatExecutor) wires them to HTTP.

pub mod request;
pub mod response;
pub mod stream;
