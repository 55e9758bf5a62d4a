mod dataset;
mod process_log;

use std::path::PathBuf;

use clap::Parser;
use drivelog_common::config;
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
pub struct Args {
    /// Dataset directory holding camera.json, lidar.json and lidar_box.json.
    dataset: PathBuf,
    /// Output animation (.gif). A .json sidecar with frame metadata is written next to it.
    #[arg(long, short, default_value = "multimodal_bev_cam.gif")]
    output: PathBuf,
    /// Playback rate of the animation.
    #[arg(long, default_value_t = config::DEFAULT_FPS)]
    fps: u32,
    /// Only process the first N frames of the index.
    #[arg(long)]
    max_frames: Option<usize>,
    /// Raster scale of the bird's-eye view, at most 50.
    #[arg(long, default_value_t = config::PIXELS_PER_METER)]
    pixels_per_meter: f64,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,drivelog_gif=info,drivelog_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    process_log::process_log(&args)
}
