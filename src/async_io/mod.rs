//! Async materialization of segments.
//!
//! This module drains a `futures-io::AsyncRead` source into a
//! [`StreamSegment`](crate::StreamSegment), making it runtime-agnostic and
//! compatible with tokio, async-std, smol, and other async runtimes.
//!
//! - [`materialize_async`] - Creates a future that resolves to a segment
//!
//! This module requires the `async-io` feature to be enabled.

mod materialize;

pub use materialize::{Materialize, materialize_async};
