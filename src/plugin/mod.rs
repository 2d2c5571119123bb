//! # Host Adapter
//!
//! Translates the index-based parameter protocol of video hosts into the typed
//! [`SecamFilter`] API. Nothing below this layer knows about parameter
//! indices.
//!
//! ```rust,no_run
//! use secam_fire::plugin::{ParamValue, SecamPlugin, FIRE_INTENSITY};
//!
//! # fn main() -> secam_fire::Result<()> {
//! let mut plugin = SecamPlugin::construct(320, 240)?;
//! plugin.set_param(FIRE_INTENSITY, ParamValue::Double(0.5))?;
//!
//! let src = vec![0u8; 320 * 240 * 4];
//! let mut dst = vec![0u8; src.len()];
//! plugin.update(0.0, &src, &mut dst)?;
//! # Ok(())
//! # }
//! ```

mod info;

use tracing::debug;

use crate::{
    error::{PluginError, Result},
    filter::{SecamFilter, PIXEL_BYTES},
};

pub use info::{
    param_info, plugin_info, ColorModel, ParamInfo, ParamKind, PluginInfo, PluginType,
    FIRE_INTENSITY, NOISE_INTENSITY,
};

/// Period of the time sweep, in host time units
const SWEEP_PERIOD: f64 = 10_000.0;

/// Rows at the bottom of the frame covered by the sweep progress bar
const SWEEP_BAR_ROWS: u32 = 8;

const SWEEP_HEAD: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
const SWEEP_BODY: [u8; 4] = [0x00, 0x00, 0xff, 0xff];

/// Parameter value as exchanged with a host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Double(f64),
}

impl ParamValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            ParamValue::Double(value) => *value,
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Double(value)
    }
}

/// A filter instance as a host sees it
pub struct SecamPlugin {
    filter: SecamFilter,
    time_sweep: bool,
}

impl SecamPlugin {
    /// Instantiate for a fixed frame size
    pub fn construct(width: u32, height: u32) -> Result<Self> {
        Ok(Self::from_filter(SecamFilter::new(width, height)?))
    }

    /// Wrap an already configured filter
    pub fn from_filter(filter: SecamFilter) -> Self {
        Self {
            filter,
            time_sweep: false,
        }
    }

    /// Sweep both intensities with the host clock and draw a progress bar
    ///
    /// Diagnostic mode for previewing the whole intensity range in one clip.
    pub fn with_time_sweep(mut self, enabled: bool) -> Self {
        self.time_sweep = enabled;
        self
    }

    pub fn filter(&self) -> &SecamFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut SecamFilter {
        &mut self.filter
    }

    pub fn set_param(&mut self, index: usize, value: ParamValue) -> Result<()> {
        match index {
            FIRE_INTENSITY => self.filter.set_fire_intensity(value.as_f64()),
            NOISE_INTENSITY => self.filter.set_noise_intensity(value.as_f64()),
            _ => return Err(PluginError::UnknownParameter { index }.into()),
        }
        Ok(())
    }

    pub fn get_param(&self, index: usize) -> Result<ParamValue> {
        match index {
            FIRE_INTENSITY => Ok(ParamValue::Double(self.filter.fire_intensity())),
            NOISE_INTENSITY => Ok(ParamValue::Double(self.filter.noise_intensity())),
            _ => Err(PluginError::UnknownParameter { index }.into()),
        }
    }

    /// Process one frame at host time `time`
    ///
    /// Buffers of the wrong size are rejected before the time sweep touches
    /// the intensities.
    pub fn update(&mut self, time: f64, src: &[u8], dst: &mut [u8]) -> Result<()> {
        self.filter.check_buffers(src, dst)?;
        let sweep = self.time_sweep.then(|| sweep_position(time));

        if let Some(d) = sweep {
            debug!("Time sweep at {:.3}", d);
            self.filter.set_fire_intensity(d);
            self.filter.set_noise_intensity(d);
        }

        self.filter.process_frame(src, dst)?;

        if let Some(d) = sweep {
            draw_sweep_bar(dst, self.filter.width(), self.filter.height(), d);
        }
        Ok(())
    }
}

fn sweep_position(time: f64) -> f64 {
    (time % SWEEP_PERIOD) / SWEEP_PERIOD
}

/// Progress bar over the bottom rows: one white row, then blue
fn draw_sweep_bar(dst: &mut [u8], width: u32, height: u32, d: f64) {
    if height < SWEEP_BAR_ROWS {
        return;
    }

    let filled = ((d * width as f64).floor().max(0.0) as usize).min(width as usize);
    let row_len = width as usize * PIXEL_BYTES;
    let first_row = (height - SWEEP_BAR_ROWS) as usize;

    for (offset, row) in dst
        .chunks_exact_mut(row_len)
        .skip(first_row)
        .enumerate()
    {
        let color = if offset == 0 { SWEEP_HEAD } else { SWEEP_BODY };
        for px in row[..filled * PIXEL_BYTES].chunks_exact_mut(PIXEL_BYTES) {
            px.copy_from_slice(&color);
        }
    }
}
