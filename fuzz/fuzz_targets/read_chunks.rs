#![no_main]

use libfuzzer_sys::fuzz_target;
use segmentrs::StreamSegment;

fuzz_target!(|input: (u16, Vec<u8>, Vec<u8>)| {
    let (cap, ops, data) = input;
    let cap = cap as usize;
    let mut segment = StreamSegment::new(&data[..], cap).unwrap();
    let snapshot = segment.data().clone();

    // Each op byte is a read size; odd sizes push half of the chunk back.
    for op in ops {
        let size = op as usize;
        match segment.read(size) {
            Ok(chunk) => {
                assert!(chunk.len() <= size);
                if size % 2 == 1 {
                    let before = segment.offset();
                    let back = &chunk[chunk.len() / 2..];
                    segment.unread(back);
                    assert_eq!(segment.offset(), before - back.len());
                }
            }
            Err(e) => assert!(e.is_end_of_stream()),
        }
        assert!(segment.offset() <= segment.length());
    }

    // Verify: captured content never changes
    assert_eq!(segment.data(), &snapshot);
    assert_eq!(snapshot.len(), data.len().min(cap));
});
