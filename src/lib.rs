//! # secam-fire
//!
//! Real-time simulation of worn SECAM videotape: "fire" color-bleed streaks,
//! chroma and luma noise, and luma echo.
//!
//! The filter works on one RGBA frame at a time and is driven by two knobs,
//! fire intensity and noise intensity.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use secam_fire::{config::Config, video::process_file};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut config = Config::default();
//! config.filter.fire_intensity = 0.6;
//! config.processing.frames = 25;
//!
//! process_file("still.png", "degraded.png", &config)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`filter`] - The per-frame pixel pipeline
//! - [`plugin`] - Host adapter: metadata and parameters by index
//! - [`video`] - Frames, image I/O and frame sequencing
//! - [`config`] - Configuration management

pub mod config;
pub mod error;
pub mod filter;
pub mod plugin;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{Result, SecamError},
    filter::{FilterVariant, SecamFilter},
    plugin::SecamPlugin,
    video::Frame,
};
