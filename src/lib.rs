//! segmentrs
//!
//! Bounded, eagerly-materialized stream segments for Rust.
//!
//! A [`StreamSegment`] drains at most `cap` bytes from a reader when it is
//! created, then serves chunked reads, line reads and push-back from that
//! captured copy. It is designed as a small, composable primitive for:
//!
//! - one part of a multi-part upload
//! - one record body inside an archive stream
//! - any sub-range of a stream that must outlive the reader it came from
//!
//! The crate intentionally:
//! - does NOT parse formats (no boundaries, headers or encodings)
//! - does NOT retry, schedule or compress
//! - does NOT keep the source alive after construction
//!
//! It only does one thing: **Read bytes once → serve them back bounded**
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use segmentrs::{StreamSegment, SegmentError};
//!
//! fn main() -> Result<(), SegmentError> {
//!     let file = File::open("part.bin")?;
//!     let mut segment = StreamSegment::new(file, 1024 * 1024)?;
//!
//!     segment.for_each_line(|line| {
//!         println!("line {} bytes", line.len());
//!     });
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
//!
//! ```ignore
//! use segmentrs::{materialize_async, SegmentConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), segmentrs::SegmentError> {
//!     let mut segment = materialize_async(reader, SegmentConfig::default()).await?;
//!
//!     // The segment no longer borrows the reader; move it anywhere.
//!     std::thread::spawn(move || segment.lines().count());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod hash;
mod map;
mod segment;

mod buffer; // internal (look-ahead / push-back queue)

#[cfg(feature = "async-io")]
mod async_io;

//
// Public surface (intentionally tiny)
//

pub use config::{DEFAULT_LINE_CHUNK_SIZE, MAX_SEGMENT_SIZE, SegmentConfig};
pub use error::{Result, SegmentError};
pub use hash::SegmentDigest;
pub use map::{CiStringMap, Iter as CiStringMapIter};
pub use segment::{Lines, ReadSize, StreamSegment, find_newline};

#[cfg(feature = "async-io")]
pub use async_io::{Materialize, materialize_async};
