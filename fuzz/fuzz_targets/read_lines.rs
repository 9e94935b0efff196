#![no_main]

use libfuzzer_sys::fuzz_target;
use segmentrs::{SegmentConfig, StreamSegment};

fuzz_target!(|input: (u8, Vec<u8>)| {
    let (chunk_size, data) = input;
    let config = SegmentConfig::new(data.len()).with_line_chunk_size(chunk_size as usize + 1);
    let mut segment = StreamSegment::with_config(&data[..], config).unwrap();

    let lines: Vec<_> = segment.lines().collect();

    // Verify: lines reassemble the content
    let joined: Vec<u8> = lines.iter().flat_map(|l| l.iter().copied()).collect();
    assert_eq!(joined, data);

    // Verify: every line but the last ends with its only newline
    for line in lines.iter().take(lines.len().saturating_sub(1)) {
        assert_eq!(line.iter().position(|&b| b == b'\n'), Some(line.len() - 1));
    }

    // Verify: exhausted segment keeps reporting end of stream
    assert!(segment.read_line().unwrap_err().is_end_of_stream());
    assert_eq!(segment.offset(), data.len());
});
