//! Utility modules
//!
//! HTTP error mapping, URL joining and the stream factory shared by every provider.

pub mod error_handling;
pub mod streaming;
pub mod url;

pub use streaming::*;
pub use url::*;
