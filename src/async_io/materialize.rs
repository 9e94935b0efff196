//! Future that drains an async reader into a segment.
//!
//! # Example
//!
//! ```ignore
//! use segmentrs::{materialize_async, SegmentConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), segmentrs::SegmentError> {
//!     let mut segment = materialize_async(reader, SegmentConfig::new(64 * 1024)).await?;
//!
//!     for line in segment.lines() {
//!         println!("line: {} bytes", line.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::io::ErrorKind;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::FusedFuture;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;
use tracing::{debug, trace};

use crate::config::SegmentConfig;
use crate::error::{Result, SegmentError};
use crate::segment::{DRAIN_CHUNK_SIZE, StreamSegment};

pin_project! {
    /// A future that drains an async reader and resolves to a [`StreamSegment`].
    ///
    /// Reading stops at the configured cap or at end of stream, exactly as
    /// with [`StreamSegment::with_config`]. Dropping the future discards
    /// whatever was drained so far.
    ///
    /// Polling again after it has resolved panics.
    #[must_use = "futures do nothing unless you `.await` or poll them"]
    pub struct Materialize<R> {
        #[pin]
        reader: R,
        config: SegmentConfig,
        data: Vec<u8>,
        temp_buf: Vec<u8>,
        invalid: Option<SegmentError>,
        finished: bool,
    }
}

impl<R> Materialize<R> {
    fn new(reader: R, config: SegmentConfig) -> Self {
        Self {
            reader,
            config,
            data: Vec::with_capacity(config.cap().min(DRAIN_CHUNK_SIZE)),
            temp_buf: vec![0u8; config.cap().min(DRAIN_CHUNK_SIZE)],
            invalid: config.validate().err(),
            finished: false,
        }
    }
}

impl<R: AsyncRead> Future for Materialize<R> {
    type Output = Result<StreamSegment>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();
        assert!(!*this.finished, "Materialize polled after completion");

        if let Some(e) = this.invalid.take() {
            *this.finished = true;
            return Poll::Ready(Err(e));
        }

        let cap = this.config.cap();
        while this.data.len() < cap {
            let want = (cap - this.data.len()).min(this.temp_buf.len());
            match this.reader.as_mut().poll_read(cx, &mut this.temp_buf[..want]) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Ok(0)) => break,
                Poll::Ready(Ok(n)) => {
                    this.data.extend_from_slice(&this.temp_buf[..n]);
                    trace!(read = n, total = this.data.len(), "drained from async source");
                }
                Poll::Ready(Err(e)) if e.kind() == ErrorKind::Interrupted => continue,
                Poll::Ready(Err(e)) => {
                    debug!(error = %e, drained = this.data.len(), "async segment source failed");
                    *this.finished = true;
                    return Poll::Ready(Err(SegmentError::Io(e)));
                }
            }
        }

        *this.finished = true;
        let data = Bytes::from(std::mem::take(this.data));
        Poll::Ready(Ok(StreamSegment::freeze(data, *this.config)))
    }
}

impl<R: AsyncRead> FusedFuture for Materialize<R> {
    fn is_terminated(&self) -> bool {
        self.finished
    }
}

/// Drains an async reader into a segment.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. Tokio users
/// can adapt their readers with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use segmentrs::materialize_async;
///
/// let file = tokio::fs::File::open("part.bin").await?;
/// let segment = materialize_async(file.compat(), 1024 * 1024usize).await?;
/// ```
///
/// # Arguments
///
/// * `reader` - An async reader implementing `AsyncRead`
/// * `config` - A [`SegmentConfig`] or a plain byte cap
///
/// # Returns
///
/// A [`Materialize`] future resolving to `Result<StreamSegment, SegmentError>`
pub fn materialize_async<R: AsyncRead>(
    reader: R,
    config: impl Into<SegmentConfig>,
) -> Materialize<R> {
    Materialize::new(reader, config.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_materialize_empty() {
        let reader: &[u8] = &[];
        let segment = materialize_async(reader, SegmentConfig::new(100)).await.unwrap();
        assert_eq!(segment.length(), 100);
        assert!(segment.data().is_empty());
    }

    #[tokio::test]
    async fn test_materialize_respects_cap() {
        let data: Vec<u8> = (0..DRAIN_CHUNK_SIZE * 2).map(|i| i as u8).collect();
        let reader: &[u8] = &data;
        let mut segment = materialize_async(reader, DRAIN_CHUNK_SIZE + 5).await.unwrap();
        assert_eq!(segment.materialized_len(), DRAIN_CHUNK_SIZE + 5);
        assert_eq!(&segment.read_remaining().unwrap()[..], &data[..DRAIN_CHUNK_SIZE + 5]);
    }

    #[tokio::test]
    async fn test_materialize_lines() {
        let reader: &[u8] = b"a\nbb\nccc";
        let mut segment = materialize_async(reader, SegmentConfig::new(1024)).await.unwrap();
        let lines: Vec<_> = segment.lines().collect();
        assert_eq!(lines, vec![&b"a\n"[..], &b"bb\n"[..], &b"ccc"[..]]);
    }

    #[tokio::test]
    async fn test_materialize_invalid_config() {
        let reader: &[u8] = b"abc";
        let config = SegmentConfig::new(10).with_line_chunk_size(0);
        let err = materialize_async(reader, config).await.unwrap_err();
        assert!(matches!(err, SegmentError::InvalidConfig { .. }));
    }

    #[test]
    fn test_invalid_config_detected_before_polling() {
        let reader: &[u8] = b"abc";
        let config = SegmentConfig::new(10).with_line_chunk_size(0);
        let fut = materialize_async(reader, config);
        assert!(fut.invalid.is_some());
        assert!(!fut.is_terminated());

        let valid = materialize_async(reader, SegmentConfig::new(10));
        assert!(valid.invalid.is_none());
    }

    #[test]
    fn test_pending_source_resumes_without_revalidating() {
        use std::io;

        /// Returns `Pending` once before each chunk of data.
        struct SlowReader {
            data: &'static [u8],
            ready: bool,
        }

        impl AsyncRead for SlowReader {
            fn poll_read(
                mut self: Pin<&mut Self>,
                cx: &mut Context<'_>,
                buf: &mut [u8],
            ) -> Poll<io::Result<usize>> {
                if !self.ready {
                    self.ready = true;
                    cx.waker().wake_by_ref();
                    return Poll::Pending;
                }
                self.ready = false;
                let n = buf.len().min(self.data.len()).min(2);
                buf[..n].copy_from_slice(&self.data[..n]);
                self.data = &self.data[n..];
                Poll::Ready(Ok(n))
            }
        }

        let reader = SlowReader {
            data: b"a\nbb\nccc",
            ready: false,
        };
        let mut segment = tokio_test::block_on(materialize_async(reader, SegmentConfig::new(64))).unwrap();
        assert_eq!(&segment.data()[..], b"a\nbb\nccc");
        assert_eq!(segment.lines().count(), 3);
    }

    #[test]
    fn test_fused_after_completion() {
        let reader: &[u8] = b"abc";
        let mut fut = materialize_async(reader, SegmentConfig::new(10));
        assert!(!fut.is_terminated());
        let segment = tokio_test::block_on(&mut fut).unwrap();
        assert!(fut.is_terminated());
        assert_eq!(&segment.data()[..], b"abc");
    }
}
