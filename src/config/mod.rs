//! Configuration for segment construction.
//!
//! - [`SegmentConfig`] - Byte cap and line read granularity
//!
//! # Example
//!
//! ```
//! use segmentrs::SegmentConfig;
//!
//! let config = SegmentConfig::new(64 * 1024).with_line_chunk_size(512);
//! assert_eq!(config.cap(), 64 * 1024);
//! # Ok::<(), segmentrs::SegmentError>(())
//! ```

use tracing::debug;

use crate::error::SegmentError;

/// Hard ceiling on the number of bytes a segment will ever expose (16 MiB).
pub const MAX_SEGMENT_SIZE: usize = 2 << 23;

/// Default size of each chunk read while scanning for a line terminator.
pub const DEFAULT_LINE_CHUNK_SIZE: usize = 1024;

/// Configuration for a [`StreamSegment`](crate::StreamSegment).
///
/// The cap is clamped to [`MAX_SEGMENT_SIZE`] on construction. The clamp is
/// not an error; the originally requested value stays available through
/// [`requested_cap`](Self::requested_cap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentConfig {
    cap: usize,
    requested_cap: usize,
    line_chunk_size: usize,
}

impl SegmentConfig {
    /// Creates a configuration with the given cap, clamped to
    /// [`MAX_SEGMENT_SIZE`].
    pub fn new(cap: usize) -> Self {
        let clamped = cap.min(MAX_SEGMENT_SIZE);
        if clamped != cap {
            debug!(
                requested = cap,
                effective = clamped,
                "segment cap clamped to ceiling"
            );
        }

        Self {
            cap: clamped,
            requested_cap: cap,
            line_chunk_size: DEFAULT_LINE_CHUNK_SIZE,
        }
    }

    /// Sets the chunk size used by line reads.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`SegmentConfig::validate`] to check it.
    pub fn with_line_chunk_size(mut self, size: usize) -> Self {
        self.line_chunk_size = size;
        self
    }

    /// Returns the effective (post-clamp) cap.
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Returns the cap as requested, before clamping.
    pub fn requested_cap(&self) -> usize {
        self.requested_cap
    }

    /// Returns true if the requested cap exceeded the ceiling.
    pub fn was_clamped(&self) -> bool {
        self.requested_cap > self.cap
    }

    /// Returns the chunk size used by line reads.
    pub fn line_chunk_size(&self) -> usize {
        self.line_chunk_size
    }

    /// Validates the current configuration.
    pub fn validate(&self) -> Result<(), SegmentError> {
        if self.line_chunk_size == 0 {
            return Err(SegmentError::InvalidConfig {
                message: "line chunk size must be non-zero",
            });
        }
        Ok(())
    }
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self::new(MAX_SEGMENT_SIZE)
    }
}

impl From<usize> for SegmentConfig {
    fn from(cap: usize) -> Self {
        Self::new(cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_value() {
        assert_eq!(MAX_SEGMENT_SIZE, 16 * 1024 * 1024);
    }

    #[test]
    fn test_default_config() {
        let config = SegmentConfig::default();
        assert_eq!(config.cap(), MAX_SEGMENT_SIZE);
        assert_eq!(config.line_chunk_size(), DEFAULT_LINE_CHUNK_SIZE);
        assert!(!config.was_clamped());
    }

    #[test]
    fn test_cap_clamped() {
        let config = SegmentConfig::new(MAX_SEGMENT_SIZE + 1);
        assert_eq!(config.cap(), MAX_SEGMENT_SIZE);
        assert_eq!(config.requested_cap(), MAX_SEGMENT_SIZE + 1);
        assert!(config.was_clamped());
    }

    #[test]
    fn test_cap_below_ceiling_kept() {
        let config = SegmentConfig::new(100);
        assert_eq!(config.cap(), 100);
        assert!(!config.was_clamped());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SegmentConfig::new(4096).with_line_chunk_size(16);
        assert_eq!(config.line_chunk_size(), 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_line_chunk_size() {
        let config = SegmentConfig::new(4096).with_line_chunk_size(0);
        assert!(config.validate().is_err());
    }
}
