use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::filter::SecamFilter;
use crate::plugin::SecamPlugin;
use crate::video::types::Frame;

/// Drives a [`SecamPlugin`] over frames, the way a host would
///
/// Every call to [`FrameProcessor::process`] advances the host clock by one
/// frame at the configured rate.
pub struct FrameProcessor {
    plugin: SecamPlugin,
    fps: f64,
    stats: ProcessingStats,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    pub frames_processed: u64,
    pub total_time: Duration,
}

impl ProcessingStats {
    /// Average wall time per frame
    pub fn average_frame_time(&self) -> Duration {
        if self.frames_processed == 0 {
            return Duration::ZERO;
        }
        self.total_time.div_f64(self.frames_processed as f64)
    }
}

impl FrameProcessor {
    /// Build a processor for frames of the given size
    pub fn new(width: u32, height: u32, config: &Config) -> Result<Self> {
        let filter_config = &config.filter;

        let mut filter = match filter_config.seed {
            Some(seed) => SecamFilter::with_seed(width, height, seed)?,
            None => SecamFilter::new(width, height)?,
        }
        .with_variant(filter_config.variant);
        filter.set_fire_intensity(filter_config.fire_intensity);
        filter.set_noise_intensity(filter_config.noise_intensity);

        debug!(
            "Frame processor ready: {}x{}, fire {:.3}, noise {:.3}, {:?}",
            width, height, filter_config.fire_intensity, filter_config.noise_intensity, filter_config.variant
        );

        Ok(Self {
            plugin: SecamPlugin::from_filter(filter).with_time_sweep(config.processing.time_sweep),
            fps: config.processing.fps,
            stats: ProcessingStats::default(),
        })
    }

    /// Degrade one frame
    pub fn process(&mut self, frame: &Frame) -> Result<Frame> {
        let time = self.stats.frames_processed as f64 / self.fps;
        let mut output = Frame::new_black(frame.width(), frame.height());

        let started = Instant::now();
        self.plugin.update(time, frame.as_raw(), output.as_raw_mut())?;
        let elapsed = started.elapsed();

        self.stats.frames_processed += 1;
        self.stats.total_time += elapsed;
        debug!("Frame {} processed in {:?}", self.stats.frames_processed, elapsed);

        Ok(output)
    }

    /// Degrade the same still `count` times, as consecutive frames
    pub fn process_sequence(&mut self, frame: &Frame, count: usize) -> Result<Vec<Frame>> {
        (0..count).map(|_| self.process(frame)).collect()
    }

    pub fn plugin(&self) -> &SecamPlugin {
        &self.plugin
    }

    pub fn get_stats(&self) -> &ProcessingStats {
        &self.stats
    }
}

/// Load `input`, degrade it `config.processing.frames` times and write the
/// results next to `output`
///
/// A single frame is written to `output` itself; several frames get a
/// zero-padded index before the extension.
pub fn process_file<P: AsRef<Path>>(input: P, output: P, config: &Config) -> Result<Vec<PathBuf>> {
    let input = input.as_ref();
    let output = output.as_ref();

    let source = Frame::open(input)?;
    info!("Loaded {:?} ({}x{})", input, source.width(), source.height());

    let source = if source.has_even_dimensions() {
        source
    } else {
        let cropped = source.crop_to_even()?;
        warn!(
            "Cropped {}x{} to {}x{}: frames need even dimensions",
            source.width(), source.height(), cropped.width(), cropped.height()
        );
        cropped
    };

    let mut processor = FrameProcessor::new(source.width(), source.height(), config)?;
    let frames = config.processing.frames;

    let mut written = Vec::with_capacity(frames);
    for index in 0..frames {
        let degraded = processor.process(&source)?;
        let path = if frames == 1 {
            output.to_path_buf()
        } else {
            numbered_path(output, index)
        };

        degraded.save(&path)?;
        debug!("Wrote {:?}", path);
        written.push(path);
    }

    let stats = processor.get_stats();
    info!(
        "Processed {} frame(s), {:?} per frame",
        stats.frames_processed,
        stats.average_frame_time()
    );

    Ok(written)
}

/// `out.png` -> `out_0007.png`
fn numbered_path(path: &Path, index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());

    let name = match path.extension() {
        Some(ext) => format!("{}_{:04}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}_{:04}", stem, index),
    };
    path.with_file_name(name)
}
