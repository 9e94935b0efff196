//! Split a stream into bounded parts and iterate their lines.
//!
//! Run with:
//!     cargo run --example sync_lines

use std::io::Cursor;
use std::thread;

use segmentrs::{CiStringMap, StreamSegment};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Two parts back to back in one stream
    let body = b"Content-Type: text/plain\nX-Part: 1\n\nhello\nworld\n";
    let mut source = Cursor::new(body.repeat(2));

    let mut handles = Vec::new();
    for part in 0..2 {
        // Each segment drains its share now; the thread never sees `source`.
        let mut segment = StreamSegment::new(&mut source, body.len())?;
        println!("part {}: captured {} bytes", part, segment.materialized_len());

        handles.push(thread::spawn(move || {
            let mut headers = CiStringMap::new();
            let mut lines = segment.lines();

            for line in lines.by_ref() {
                let line = String::from_utf8_lossy(&line).trim_end().to_string();
                if line.is_empty() {
                    break;
                }
                if let Some((key, value)) = line.split_once(':') {
                    headers.set(key, value.trim());
                }
            }

            let body_lines = lines.count();
            (part, headers, body_lines)
        }));
    }

    for handle in handles {
        let (part, headers, body_lines) = handle.join().expect("worker panicked");
        println!(
            "part {}: content-type={:?}, {} body lines",
            part,
            headers.get("CONTENT-TYPE"),
            body_lines
        );
    }

    Ok(())
}
