//! Bounded stream segments.
//!
//! - [`StreamSegment`] - Materialize-then-serve reader with push-back
//! - [`Lines`] - Line iterator over a segment
//! - [`ReadSize`] - How much a chunked read may return

mod lines;
mod part;

pub use lines::{Lines, find_newline};
pub use part::{ReadSize, StreamSegment};

#[cfg(feature = "async-io")]
pub(crate) use part::DRAIN_CHUNK_SIZE;
