//! Streaming types
//!
//! A [`TextStream`] is a lazy, finite sequence of text fragments in the order the
//! backend produced them. It cannot be restarted; streaming again needs a fresh
//! call. Dropping it before exhaustion closes the underlying HTTP response.

use crate::error::LlmError;
use futures::Stream;
use std::pin::Pin;

/// Stream of non-empty text fragments
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send>>;
