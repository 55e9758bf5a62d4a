use std::ffi::OsString;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context;
use drivelog_common::bev::{BevConfig, BevRenderer};
use drivelog_common::pipeline::FramePipeline;
use drivelog_common::sequence::{EncodeOutcome, SequenceEncoder};
use drivelog_common::sequence_meta::SequenceMeta;

use crate::dataset;
use crate::Args;

/// Renders every annotated frame of a dataset directory into one animated GIF.
pub fn process_log(args: &Args) -> anyhow::Result<()> {
    let _span = tracing::info_span!("process_log", dataset = ?args.dataset).entered();

    let bev_config = BevConfig {
        pixels_per_meter: args.pixels_per_meter,
        ..Default::default()
    };
    bev_config.validate().context("Invalid --pixels-per-meter")?;

    log::info!("Loading sensor tables from {:?}", args.dataset);
    let store = dataset::load_store(&args.dataset)?;
    let (cameras, lidars, boxes) = store.table_sizes();
    log::info!("camera rows: {cameras}, lidar rows: {lidars}, lidar_box rows: {boxes}");

    let index = store.frame_index();
    log::info!("unique frames: {}", index.len());

    let bev = BevRenderer::new(bev_config);
    let pipeline = FramePipeline::new(&store)
        .with_bev_renderer(bev)
        .with_max_frames(args.max_frames);

    let mut encoder = SequenceEncoder::new(args.fps);
    let report = pipeline.run(&index, &mut encoder);
    let fps = encoder.fps();

    let output = &args.output;
    let outcome = encoder.finish(|| {
        let file = File::create(output).with_context(|| format!("Failed to create {output:?}"))?;
        Ok(BufWriter::new(file))
    })?;

    match outcome {
        EncodeOutcome::Empty => {
            println!("No frames to save.");
        }
        EncodeOutcome::Written {
            frames,
            width,
            height,
        } => {
            let mut meta = SequenceMeta::new(
                args.dataset.clone(),
                output.clone(),
                fps,
                width,
                height,
            );
            for frame in report.emitted {
                meta.push(frame);
            }
            let meta_path = sidecar_path(output);
            log::info!("Writing frame metadata, {frames} frames: {meta_path:?}");
            let meta_file = File::create(&meta_path)
                .with_context(|| format!("Failed to create {meta_path:?}"))?;
            serde_json::to_writer_pretty(BufWriter::new(meta_file), &meta)?;
            println!("Saved {frames} frames ({width}x{height} @ {fps} fps): {output:?}");
        }
    }

    if !report.times.is_empty() {
        // Print perf stats, ignoring first (outlier) frame.
        log::info!("Average frame times: {:?}", report.times.avg(true));
        log::info!("Min frame times: {:?}", report.times.min(true));
        log::info!("Max frame times: {:?}", report.times.max(true));
    }

    Ok(())
}

/// Path of the metadata sidecar: the output file name with `.json` appended.
fn sidecar_path(output: &Path) -> PathBuf {
    let mut path = OsString::from(output);
    path.push(".json");
    PathBuf::from(path)
}
