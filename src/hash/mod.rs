//! Content digests of materialized segments.
//!
//! - [`SegmentDigest`] - 32-byte digest value
//! - `hash_bytes` - BLAKE3 over a byte slice (requires `hash-blake3` feature)

mod digest;

#[cfg(feature = "hash-blake3")]
mod blake3;

pub use digest::SegmentDigest;

#[cfg(feature = "hash-blake3")]
pub(crate) use blake3::hash_bytes;
