//! Capture plumbing for deauther
//!
//! This crate moves frames from the radio receive path to persistent storage
//! without blocking either side.
//!
//! ## Features
//!
//! - **Capture ring**: fixed-capacity, lock-free single-producer/single-consumer queue
//! - **Statistics**: atomic counters for frames seen, dropped, captured and injected
//! - **Export**: text hex dumps compatible with `text2pcap`, and a reader for them
//!
//! ## Example
//!
//! ```
//! use deauther_capture::{CaptureRing, CaptureSink, HexDumpWriter};
//!
//! let ring: CaptureRing = CaptureRing::new();
//! assert!(ring.try_push(&[0x80, 0x00, 0x00, 0x00, 0xde, 0xad, 0xbe, 0xef]));
//!
//! let mut writer = HexDumpWriter::new(Vec::new());
//! ring.drain(|frame| {
//!     let _ = writer.write_frame(frame.as_bytes());
//! });
//! assert_eq!(writer.frames_written(), 1);
//! ```

pub mod export;
pub mod ring;
pub mod stats;

// Re-export main types
pub use export::{read_hex_dump, strip_fcs, CaptureSink, HexDumpWriter};
pub use ring::{CaptureRing, FrameRecord, FrameView, MAX_BUFFER_SIZE};
pub use stats::{CaptureStats, CaptureStatsCounters};
