use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use secam_fire::{config::Config, filter::FilterVariant, video::process_file};

#[derive(Parser)]
#[command(
    name = "secam-fire",
    version,
    about = "Degrade images the way a worn SECAM videotape would",
    long_about = "secam-fire runs still images through a SECAM tape simulation: fire streaks ignite on sharp luminance edges, chroma and luma pick up noise, and luma echoes to the right."
)]
struct Cli {
    /// Input image (PNG or JPEG)
    #[arg(short, long)]
    input: PathBuf,

    /// Output image path; numbered when rendering several frames
    #[arg(short, long)]
    output: PathBuf,

    /// Fire intensity (nominally 0.0-1.0)
    #[arg(short, long)]
    fire: Option<f64>,

    /// Noise intensity (nominally 0.0-1.0)
    #[arg(short, long)]
    noise: Option<f64>,

    /// Fixed random seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Number of consecutive frames to render from the input
    #[arg(long)]
    frames: Option<usize>,

    /// Effect variant (legacy, latest)
    #[arg(long)]
    variant: Option<String>,

    /// Sweep intensities over time and draw a progress bar
    #[arg(long)]
    time_sweep: bool,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to this file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Command line flags win over the configuration file
    fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(fire) = self.fire {
            config.filter.fire_intensity = fire;
        }
        if let Some(noise) = self.noise {
            config.filter.noise_intensity = noise;
        }
        if let Some(seed) = self.seed {
            config.filter.seed = Some(seed);
        }
        if let Some(frames) = self.frames {
            config.processing.frames = frames;
        }
        if let Some(name) = &self.variant {
            config.filter.variant = FilterVariant::from_name(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown variant: {} (expected legacy or latest)", name))?;
        }
        if self.time_sweep {
            config.processing.time_sweep = true;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .init();

    info!("Starting secam-fire v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => Config::default(),
    };
    cli.apply_overrides(&mut config)?;
    config.validate()?;

    if let Some(path) = &cli.save_config {
        config.save_to_file(path)?;
        info!("Configuration saved to {:?}", path);
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.processing.threads)
        .build_global()?;

    info!(
        "Fire {:.3}, noise {:.3}, {} frame(s), {} threads",
        config.filter.fire_intensity,
        config.filter.noise_intensity,
        config.processing.frames,
        config.processing.threads
    );

    let written = process_file(&cli.input, &cli.output, &config)?;

    info!("Done! {} frame(s) written, first: {:?}", written.len(), written.first());
    Ok(())
}
