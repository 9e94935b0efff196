//! Internal byte queue used for look-ahead staging and push-back.
//!
//! This is an implementation detail and not part of the public API.

mod lookahead;

pub(crate) use lookahead::ByteBuffer;
