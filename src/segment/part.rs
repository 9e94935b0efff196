//! The StreamSegment type - a bounded, eagerly-materialized reader.
//!
//! A segment is built in two phases:
//!
//! 1. **Drain** - the source is read synchronously until the cap is reached
//!    or the source reports end of stream.
//! 2. **Freeze** - the drained bytes become an immutable [`Bytes`] and every
//!    later read is served from it.
//!
//! After construction the source has been dropped, so the segment can be
//! moved to another thread freely.
//!
//! # Example
//!
//! ```
//! use segmentrs::StreamSegment;
//! use std::io::Cursor;
//!
//! let mut segment = StreamSegment::new(Cursor::new(b"hello\nworld".to_vec()), 1024)?;
//!
//! assert_eq!(&segment.read_line()?[..], b"hello\n");
//! assert_eq!(&segment.read(3)?[..], b"wor");
//! assert_eq!(&segment.data()[..], b"hello\nworld");
//! # Ok::<(), segmentrs::SegmentError>(())
//! ```

use std::io::{Cursor, ErrorKind, Read};

use bytes::Bytes;
use tracing::{debug, trace};

use crate::buffer::ByteBuffer;
use crate::config::SegmentConfig;
use crate::error::{Result, SegmentError};

use super::lines::{Lines, find_newline};

/// Size of each read issued against the source while draining.
pub(crate) const DRAIN_CHUNK_SIZE: usize = 8 * 1024;

/// Upper bound for a chunked read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadSize {
    /// Read up to the segment's configured length.
    Remaining,
    /// Read at most this many bytes.
    AtMost(usize),
}

impl From<usize> for ReadSize {
    fn from(n: usize) -> Self {
        ReadSize::AtMost(n)
    }
}

/// A bounded, single-consumer view over a byte stream.
///
/// `StreamSegment` captures at most `cap` bytes of a source when it is
/// created and then serves chunked reads, line reads and push-back from that
/// captured copy.
///
/// # Bookkeeping
///
/// - Pending bytes (over-read or pushed back) are delivered before new bytes
///   are taken from the captured copy.
/// - Every captured byte is delivered exactly once unless pushed back; the
///   captured copy never exceeds the cap.
/// - `offset` is the replay position net of pending bytes, kept within
///   `0..=cap`.
///
/// # Concurrency
///
/// Reads take `&mut self`, so one segment has exactly one consumer at a time.
/// The captured content ([`data`](Self::data)) is a cheaply clonable
/// [`Bytes`] and can be shared freely.
///
/// # Example
///
/// ```
/// use segmentrs::StreamSegment;
///
/// let mut segment = StreamSegment::new(&b"a\nbb\nccc"[..], 1024)?;
/// let lines: Vec<_> = segment.lines().collect();
///
/// assert_eq!(lines, vec![&b"a\n"[..], &b"bb\n"[..], &b"ccc"[..]]);
/// # Ok::<(), segmentrs::SegmentError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StreamSegment {
    config: SegmentConfig,
    materialized: Bytes,
    replay: Cursor<Bytes>,
    lookahead: ByteBuffer,
}

impl StreamSegment {
    /// Drains up to `cap` bytes from `source` and returns a read-ready segment.
    ///
    /// `cap` is clamped to [`MAX_SEGMENT_SIZE`](crate::MAX_SEGMENT_SIZE).
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::Io`] if the source fails with anything other
    /// than end of stream. An empty source is not an error.
    pub fn new<R: Read>(source: R, cap: usize) -> Result<Self> {
        Self::with_config(source, SegmentConfig::new(cap))
    }

    /// Drains `source` according to `config` and returns a read-ready segment.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::InvalidConfig`] if `config` fails validation,
    /// or [`SegmentError::Io`] if the source fails.
    pub fn with_config<R: Read>(mut source: R, config: SegmentConfig) -> Result<Self> {
        config.validate()?;
        let data = drain(&mut source, config.cap())?;
        Ok(Self::freeze(Bytes::from(data), config))
    }

    /// Builds a segment over bytes that are already in memory.
    ///
    /// Content beyond the (clamped) cap is dropped.
    pub fn from_bytes(data: impl Into<Bytes>, cap: usize) -> Self {
        let config = SegmentConfig::new(cap);
        let mut data = data.into();
        data.truncate(config.cap());
        Self::freeze(data, config)
    }

    /// Second construction phase: anchor all reads on the captured bytes.
    pub(crate) fn freeze(data: Bytes, config: SegmentConfig) -> Self {
        debug!(
            cap = config.cap(),
            materialized = data.len(),
            "segment materialized"
        );

        Self {
            config,
            replay: Cursor::new(data.clone()),
            materialized: data,
            lookahead: ByteBuffer::new(),
        }
    }

    /// Reads at most `size` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::EndOfStream`] when no bytes are available.
    pub fn read(&mut self, size: usize) -> Result<Bytes> {
        self.read_chunk(ReadSize::AtMost(size))
    }

    /// Reads up to the segment's configured length.
    pub fn read_remaining(&mut self) -> Result<Bytes> {
        self.read_chunk(ReadSize::Remaining)
    }

    /// Reads one chunk.
    ///
    /// Pending bytes are served first. If they cover the request the captured
    /// copy is not touched; otherwise they are returned together with as many
    /// fresh captured bytes as the request still needs. A non-empty result
    /// means more may remain.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::EndOfStream`] when zero bytes are available,
    /// which includes a request for zero bytes.
    pub fn read_chunk(&mut self, size: ReadSize) -> Result<Bytes> {
        let size = match size {
            ReadSize::Remaining => self.config.cap(),
            ReadSize::AtMost(n) => n,
        };

        let content = if self.lookahead.len() >= size {
            self.lookahead.take_front(size)
        } else {
            let pending = self.lookahead.len();
            let fresh = self.take_replay(size - pending);

            if self.lookahead.is_empty() {
                fresh
            } else {
                self.lookahead.push_back(&fresh);
                self.lookahead.take_all()
            }
        };

        trace!(
            returned = content.len(),
            offset = self.offset(),
            pending = self.lookahead.len(),
            "segment read"
        );

        if content.is_empty() {
            return Err(SegmentError::EndOfStream);
        }
        Ok(content)
    }

    /// Takes up to `n` bytes from the replay cursor without copying.
    fn take_replay(&mut self, n: usize) -> Bytes {
        let len = self.materialized.len();
        let start = (self.replay.position() as usize).min(len);
        let end = start + n.min(len - start);
        self.replay.set_position(end as u64);
        self.materialized.slice(start..end)
    }

    /// Returns `content` to the front of the stream.
    ///
    /// The next read reclaims these bytes before anything else. This is not
    /// a rewind: bytes not handed back stay consumed. Pushing back bytes that
    /// were never read is allowed; they are delivered ahead of the rest and
    /// do not hide any captured bytes.
    pub fn unread(&mut self, content: &[u8]) {
        self.lookahead.push_front(content);
    }

    /// Reads a single `\n`-terminated line.
    ///
    /// The returned line includes its newline. Bytes read past the newline are
    /// pushed back so the next call resumes right after it. If the stream
    /// ends before a newline, the unterminated remainder is returned.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError::EndOfStream`] if the segment is already
    /// exhausted when the call begins.
    pub fn read_line(&mut self) -> Result<Bytes> {
        let chunk_size = self.config.line_chunk_size();
        let mut chunk = self.read(chunk_size)?;
        let mut line = Vec::new();

        loop {
            if let Some(i) = find_newline(&chunk) {
                self.unread(&chunk[i + 1..]);
                if line.is_empty() {
                    return Ok(chunk.slice(..=i));
                }
                line.extend_from_slice(&chunk[..=i]);
                break;
            }

            line.extend_from_slice(&chunk);
            match self.read(chunk_size) {
                Ok(next) => chunk = next,
                Err(SegmentError::EndOfStream) => break,
                Err(e) => return Err(e),
            }
        }

        Ok(Bytes::from(line))
    }

    /// Returns an iterator over the remaining lines.
    ///
    /// Iteration stops at the first read error of any kind.
    pub fn lines(&mut self) -> Lines<'_> {
        Lines::new(self)
    }

    /// Invokes `callback` for every remaining line.
    ///
    /// Stops silently at the first read error; end of stream and a fault are
    /// indistinguishable here.
    pub fn for_each_line<F: FnMut(Bytes)>(&mut self, callback: F) {
        self.lines().for_each(callback);
    }

    /// Returns everything captured at construction.
    ///
    /// Unaffected by reads, pushes and line iteration.
    pub fn data(&self) -> &Bytes {
        &self.materialized
    }

    /// Consumes the segment and returns the captured bytes.
    pub fn into_data(self) -> Bytes {
        self.materialized
    }

    /// Returns a reader over the replay cursor.
    ///
    /// The handle shares its position with [`read`](Self::read) and
    /// [`read_line`](Self::read_line) but bypasses offset and pending-byte
    /// accounting. Mixing it with those methods on one segment is
    /// unsupported and yields unspecified interleaving.
    pub fn reader(&mut self) -> impl Read + '_ {
        &mut self.replay
    }

    /// Returns the configured (post-clamp) length.
    ///
    /// This is the cap, not the number of bytes captured; see
    /// [`materialized_len`](Self::materialized_len).
    pub fn length(&self) -> usize {
        self.config.cap()
    }

    /// Returns the length the caller asked for before clamping.
    pub fn requested_length(&self) -> usize {
        self.config.requested_cap()
    }

    /// Returns true if the requested length exceeded the ceiling.
    pub fn was_clamped(&self) -> bool {
        self.config.was_clamped()
    }

    /// Returns the number of bytes captured at construction.
    pub fn materialized_len(&self) -> usize {
        self.materialized.len()
    }

    /// Returns the number of bytes delivered so far, net of push-backs.
    ///
    /// Bytes pushed back beyond what was read count as not yet delivered, so
    /// the value stays within `0..=length()`.
    pub fn offset(&self) -> usize {
        let position = self.replay.position() as usize;
        position
            .saturating_sub(self.lookahead.len())
            .min(self.config.cap())
    }

    /// Returns how many bytes further reads can still deliver.
    pub fn remaining(&self) -> usize {
        let replay_left = self
            .materialized
            .len()
            .saturating_sub(self.replay.position() as usize);
        self.lookahead.len() + replay_left
    }

    /// Returns true if the next read will report end of stream.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the configuration this segment was built with.
    pub fn config(&self) -> &SegmentConfig {
        &self.config
    }

    /// Returns the BLAKE3 digest of the captured content.
    #[cfg(feature = "hash-blake3")]
    pub fn digest(&self) -> crate::hash::SegmentDigest {
        crate::hash::hash_bytes(&self.materialized)
    }
}

/// Reads `source` until `cap` bytes are collected or it reports end of stream.
fn drain<R: Read>(source: &mut R, cap: usize) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(cap.min(DRAIN_CHUNK_SIZE));
    let mut temp_buf = vec![0u8; cap.min(DRAIN_CHUNK_SIZE)];

    while data.len() < cap {
        let want = (cap - data.len()).min(temp_buf.len());
        match source.read(&mut temp_buf[..want]) {
            Ok(0) => break,
            Ok(n) => {
                data.extend_from_slice(&temp_buf[..n]);
                trace!(read = n, total = data.len(), "drained from source");
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!(error = %e, drained = data.len(), "segment source failed");
                return Err(e.into());
            }
        }
    }

    Ok(data)
}
