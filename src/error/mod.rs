//! Error types for segmentrs.

use thiserror::Error;

/// Result type for segment operations.
pub type Result<T> = std::result::Result<T, SegmentError>;

/// Errors that can occur while building or reading a segment.
#[derive(Debug, Error)]
pub enum SegmentError {
    /// No further bytes are available from this segment.
    ///
    /// This is the normal termination signal of [`read`](crate::StreamSegment::read)
    /// and [`read_line`](crate::StreamSegment::read_line), not a fault.
    #[error("end of stream")]
    EndOfStream,

    /// An I/O error occurred while draining the underlying source.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration parameter.
    #[error("invalid config: {message}")]
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl SegmentError {
    /// Returns true if this is the end-of-stream signal.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, SegmentError::EndOfStream)
    }
}
