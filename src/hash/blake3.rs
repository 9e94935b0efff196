//! BLAKE3 digest of captured segment content.

use super::SegmentDigest;

/// Computes the BLAKE3 digest of `data` in one shot.
pub(crate) fn hash_bytes(data: &[u8]) -> SegmentDigest {
    SegmentDigest::new(blake3::hash(data).into())
}
