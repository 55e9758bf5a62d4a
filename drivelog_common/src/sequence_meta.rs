use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::frame_key::FrameKey;

/// What ended up in one frame of the output animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameMeta {
    #[serde(flatten)]
    pub key: FrameKey,
    /// Position of the frame in the index, counting skipped frames.
    pub index_position: usize,
    pub cameras: usize,
    pub boxes: usize,
}

/// Metadata written next to a rendered animation.
#[derive(Debug, Serialize, Deserialize)]
pub struct SequenceMeta {
    /// Directory the sensor tables were read from.
    pub input_dir: PathBuf,
    pub output_file: PathBuf,
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    /// Emitted frames, in playback order.
    pub frames: Vec<FrameMeta>,
}

impl SequenceMeta {
    pub fn new(
        input_dir: PathBuf,
        output_file: PathBuf,
        fps: u32,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            input_dir,
            output_file,
            fps,
            width,
            height,
            frames: Vec::new(),
        }
    }

    pub fn push(&mut self, frame: FrameMeta) {
        self.frames.push(frame);
    }
}
