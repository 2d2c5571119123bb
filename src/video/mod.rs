//! # Video Frame Module
//!
//! Frame container, image file I/O and a processor that feeds frames through
//! the filter the way a video host would.

pub mod processor;
pub mod types;

pub use processor::{process_file, FrameProcessor, ProcessingStats};
pub use types::Frame;
