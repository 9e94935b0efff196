//! Async materialization with Tokio.
//!
//! Run with:
//!     cargo run --example async_tokio --features async-io

use segmentrs::{SegmentConfig, materialize_async};
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args().nth(1).unwrap_or_else(|| "Cargo.toml".to_string());
    let file = tokio::fs::File::open(&path).await?;

    let config = SegmentConfig::new(64 * 1024).with_line_chunk_size(256);
    let mut segment = materialize_async(file.compat(), config).await?;

    println!(
        "{}: captured {} of {} bytes{}",
        path,
        segment.materialized_len(),
        segment.length(),
        if segment.was_clamped() { " (clamped)" } else { "" }
    );

    // Line work happens off the runtime; the segment owns its bytes.
    let count = tokio::task::spawn_blocking(move || segment.lines().count()).await?;
    println!("{} lines", count);

    Ok(())
}
