//! Double-ended byte queue with cheap prepend.

use std::collections::VecDeque;

use bytes::Bytes;

/// Pending bytes awaiting delivery.
///
/// Bytes pushed to the front come out first, in the order they were given.
#[derive(Debug, Default, Clone)]
pub(crate) struct ByteBuffer {
    data: VecDeque<u8>,
}

impl ByteBuffer {
    pub(crate) fn new() -> Self {
        Self {
            data: VecDeque::new(),
        }
    }

    /// Prepends `bytes`, keeping their order ahead of existing content.
    pub(crate) fn push_front(&mut self, bytes: &[u8]) {
        self.data.reserve(bytes.len());
        for &b in bytes.iter().rev() {
            self.data.push_front(b);
        }
    }

    /// Appends `bytes` after existing content.
    pub(crate) fn push_back(&mut self, bytes: &[u8]) {
        self.data.extend(bytes);
    }

    /// Removes and returns up to `n` bytes from the front.
    pub(crate) fn take_front(&mut self, n: usize) -> Bytes {
        let n = n.min(self.data.len());
        let mut out = Vec::with_capacity(n);
        let (head, tail) = self.data.as_slices();
        if n <= head.len() {
            out.extend_from_slice(&head[..n]);
        } else {
            out.extend_from_slice(head);
            out.extend_from_slice(&tail[..n - head.len()]);
        }
        self.data.drain(..n);
        Bytes::from(out)
    }

    /// Removes and returns everything.
    pub(crate) fn take_all(&mut self) -> Bytes {
        let len = self.data.len();
        self.take_front(len)
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
