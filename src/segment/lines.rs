//! Line iteration over a segment.

use std::iter::FusedIterator;

use bytes::Bytes;
use tracing::trace;

use super::part::StreamSegment;

/// Returns the index of the first `\n` in `chunk`.
pub fn find_newline(chunk: &[u8]) -> Option<usize> {
    chunk.iter().position(|&b| b == b'\n')
}

/// An iterator over the lines of a [`StreamSegment`].
///
/// Each item includes its trailing `\n`, except possibly the last. The
/// iterator ends at the first read error, whether that is the end of the
/// stream or a fault, and stays ended.
///
/// # Example
///
/// ```
/// use segmentrs::StreamSegment;
///
/// let mut segment = StreamSegment::new(&b"\n"[..], 16)?;
/// let lines: Vec<_> = segment.lines().collect();
/// assert_eq!(lines, vec![&b"\n"[..]]);
/// # Ok::<(), segmentrs::SegmentError>(())
/// ```
#[derive(Debug)]
pub struct Lines<'a> {
    segment: &'a mut StreamSegment,
    finished: bool,
}

impl<'a> Lines<'a> {
    pub(crate) fn new(segment: &'a mut StreamSegment) -> Self {
        Self {
            segment,
            finished: false,
        }
    }
}

impl Iterator for Lines<'_> {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.segment.read_line() {
            Ok(line) => Some(line),
            Err(e) => {
                trace!(reason = %e, "line iteration stopped");
                self.finished = true;
                None
            }
        }
    }
}

impl FusedIterator for Lines<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SegmentConfig;

    fn collect(data: &[u8]) -> Vec<Bytes> {
        let mut segment = StreamSegment::new(data, 1024).unwrap();
        let mut lines = Vec::new();
        segment.for_each_line(|line| lines.push(line));
        lines
    }

    #[test]
    fn test_find_newline() {
        assert_eq!(find_newline(b"abc\ndef\n"), Some(3));
        assert_eq!(find_newline(b"\n"), Some(0));
        assert_eq!(find_newline(b"abc"), None);
        assert_eq!(find_newline(b""), None);
    }

    #[test]
    fn test_lines_with_unterminated_tail() {
        assert_eq!(collect(b"a\nbb\nccc"), vec![&b"a\n"[..], &b"bb\n"[..], &b"ccc"[..]]);
    }

    #[test]
    fn test_single_newline() {
        assert_eq!(collect(b"\n"), vec![&b"\n"[..]]);
    }

    #[test]
    fn test_no_trailing_empty_line() {
        assert_eq!(collect(b"x\n"), vec![&b"x\n"[..]]);
    }

    #[test]
    fn test_empty_lines_preserved() {
        assert_eq!(collect(b"\n\nz"), vec![&b"\n"[..], &b"\n"[..], &b"z"[..]]);
    }

    #[test]
    fn test_empty_source_no_callbacks() {
        let mut calls = 0;
        let mut segment = StreamSegment::new(&b""[..], 1024).unwrap();
        segment.for_each_line(|_| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_lines_fused() {
        let mut segment = StreamSegment::new(&b"only"[..], 1024).unwrap();
        let mut lines = segment.lines();
        assert_eq!(lines.next().as_deref(), Some(&b"only"[..]));
        assert_eq!(lines.next(), None);
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_lines_longer_than_chunk() {
        let config = SegmentConfig::new(1024).with_line_chunk_size(2);
        let mut segment = StreamSegment::with_config(&b"abcde\nfghij\n"[..], config).unwrap();
        let lines: Vec<_> = segment.lines().collect();
        assert_eq!(lines, vec![&b"abcde\n"[..], &b"fghij\n"[..]]);
    }

    #[test]
    fn test_lines_respect_cap() {
        let mut segment = StreamSegment::new(&b"ab\ncd\nef\n"[..], 5).unwrap();
        let lines: Vec<_> = segment.lines().collect();
        assert_eq!(lines, vec![&b"ab\n"[..], &b"cd"[..]]);
    }
}
