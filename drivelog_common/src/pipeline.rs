//! The per-frame loop: retrieve, render, composite, append.
//!
//! Frames run strictly one after another in index order. A frame that cannot be
//! rendered is skipped and reported; nothing in here aborts the run.

use std::fmt;
use std::time::Instant;

use image::RgbImage;

use crate::bev::BevRenderer;
use crate::compositor::stack_vertical;
use crate::config::FRAME_REPORT_INTERVAL;
use crate::frame_index::FrameIndex;
use crate::frame_key::FrameKey;
use crate::frame_store::FrameStore;
use crate::frame_times::{AggregatedTimes, FrameTimes};
use crate::mosaic::CameraMosaicBuilder;
use crate::sequence::SequenceEncoder;
use crate::sequence_meta::FrameMeta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No camera image of the frame could be decoded.
    NoCameraImages,
    /// The frame has no annotation rows. Camera-only frames are left out of the
    /// sequence on purpose.
    NoBoxes,
    /// Mosaic and BEV could not be stacked.
    CompositeFailed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::NoCameraImages => "no camera images",
            SkipReason::NoBoxes => "no boxes",
            SkipReason::CompositeFailed => "composite failed",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFrame {
    pub index_position: usize,
    pub key: FrameKey,
    pub reason: SkipReason,
}

/// What happened to one frame.
#[derive(Debug)]
pub enum FrameOutcome {
    Emitted {
        image: RgbImage,
        meta: FrameMeta,
        times: FrameTimes,
    },
    Skipped(SkipReason),
}

/// Summary of a pipeline run.
#[derive(Debug, Default)]
pub struct PipelineReport {
    /// Index positions visited, after applying the frame cap.
    pub considered: usize,
    pub emitted: Vec<FrameMeta>,
    pub skipped: Vec<SkippedFrame>,
    pub times: AggregatedTimes,
}

impl PipelineReport {
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }
}

/// Renders the frames of a [`FrameStore`] into a [`SequenceEncoder`].
#[derive(Debug)]
pub struct FramePipeline<'a> {
    store: &'a FrameStore,
    mosaic: CameraMosaicBuilder,
    bev: BevRenderer,
    max_frames: Option<usize>,
}

impl<'a> FramePipeline<'a> {
    pub fn new(store: &'a FrameStore) -> Self {
        Self {
            store,
            mosaic: CameraMosaicBuilder::default(),
            bev: BevRenderer::default(),
            max_frames: None,
        }
    }

    pub fn with_mosaic_builder(mut self, mosaic: CameraMosaicBuilder) -> Self {
        self.mosaic = mosaic;
        self
    }

    pub fn with_bev_renderer(mut self, bev: BevRenderer) -> Self {
        self.bev = bev;
        self
    }

    /// Only the first `max_frames` index positions are visited.
    pub fn with_max_frames(mut self, max_frames: Option<usize>) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Renders one frame into a combined mosaic-over-BEV image.
    pub fn process_frame(&self, index_position: usize, key: &FrameKey) -> FrameOutcome {
        let mut times = FrameTimes::default();

        let start = Instant::now();
        let rows = self.store.retrieve(key);
        times.retrieve = start.elapsed();

        let start = Instant::now();
        let Some(mosaic) = self.mosaic.build(&rows.camera) else {
            return FrameOutcome::Skipped(SkipReason::NoCameraImages);
        };
        times.mosaic = start.elapsed();

        if rows.boxes.is_empty() {
            return FrameOutcome::Skipped(SkipReason::NoBoxes);
        }

        let start = Instant::now();
        let bev = self.bev.render(&rows.boxes);
        times.bev = start.elapsed();

        let start = Instant::now();
        let image = match stack_vertical(&mosaic, &bev) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Frame {index_position} ({key}): {e:#}");
                return FrameOutcome::Skipped(SkipReason::CompositeFailed);
            }
        };
        times.composite = start.elapsed();

        let meta = FrameMeta {
            key: key.clone(),
            index_position,
            cameras: rows.camera.len(),
            boxes: rows.boxes.len(),
        };
        FrameOutcome::Emitted { image, meta, times }
    }

    /// Visits the index in order and appends every rendered frame to `encoder`.
    pub fn run(&self, index: &FrameIndex, encoder: &mut SequenceEncoder) -> PipelineReport {
        let total = index.capped_len(self.max_frames);
        log::info!("Total frames to process: {total}");

        let mut report = PipelineReport {
            considered: total,
            ..Default::default()
        };
        for (position, key) in index.iter().take(total).enumerate() {
            match self.process_frame(position, key) {
                FrameOutcome::Emitted { image, meta, times } => {
                    log::debug!("Frame {position} ({key}): {times:?}");
                    encoder.push(image);
                    report.emitted.push(meta);
                    report.times.push(times);
                }
                FrameOutcome::Skipped(reason) => {
                    log::warn!("Frame {position} ({key}): {reason}, skip.");
                    report.skipped.push(SkippedFrame {
                        index_position: position,
                        key: key.clone(),
                        reason,
                    });
                }
            }
            if position % FRAME_REPORT_INTERVAL == 0 {
                log::info!("Processed frame {position}/{total}");
            }
        }

        log::info!(
            "Collected {} combined frames ({} without camera images, {} without boxes)",
            report.emitted.len(),
            report.skipped_for(SkipReason::NoCameraImages),
            report.skipped_for(SkipReason::NoBoxes),
        );
        report
    }
}
