//! Accumulation of combined frames and GIF encoding.

use std::io::Write;

use anyhow::Context;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{imageops, Delay, DynamicImage, Frame, RgbImage};

use crate::resize::resize_to_width;

/// Result of [`SequenceEncoder::finish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeOutcome {
    /// Nothing was accumulated, so nothing was written.
    Empty,
    Written { frames: usize, width: u32, height: u32 },
}

/// Collects combined frames in playback order and encodes them as an animated GIF.
///
/// Every frame is fitted to the canvas of the first one: frames of another width are
/// scaled to it, then padded with black or cropped at the bottom.
#[derive(Debug)]
pub struct SequenceEncoder {
    fps: u32,
    frames: Vec<RgbImage>,
}

impl SequenceEncoder {
    pub fn new(fps: u32) -> Self {
        Self {
            fps: fps.max(1),
            frames: Vec::new(),
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn push(&mut self, frame: RgbImage) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Dimensions every encoded frame will have.
    pub fn canvas_size(&self) -> Option<(u32, u32)> {
        self.frames.first().map(RgbImage::dimensions)
    }

    /// Encodes the sequence into the writer returned by `open`.
    ///
    /// `open` is only called when there is at least one frame; an empty sequence
    /// returns [`EncodeOutcome::Empty`] without touching the destination.
    pub fn finish<W, F>(self, open: F) -> anyhow::Result<EncodeOutcome>
    where
        W: Write,
        F: FnOnce() -> anyhow::Result<W>,
    {
        let Some((width, height)) = self.canvas_size() else {
            return Ok(EncodeOutcome::Empty);
        };
        let frames = self.frames.len();
        let delay = Delay::from_numer_denom_ms(1000, self.fps);

        let mut encoder = GifEncoder::new_with_speed(open()?, 10);
        encoder
            .set_repeat(Repeat::Infinite)
            .context("Failed to configure gif looping")?;
        for (i, frame) in self.frames.into_iter().enumerate() {
            let frame = fit_to_canvas(frame, width, height)
                .with_context(|| format!("Failed to fit frame {i} to {width}x{height}"))?;
            let rgba = DynamicImage::ImageRgb8(frame).into_rgba8();
            encoder
                .encode_frame(Frame::from_parts(rgba, 0, 0, delay))
                .with_context(|| format!("Failed to encode frame {i}"))?;
        }

        Ok(EncodeOutcome::Written {
            frames,
            width,
            height,
        })
    }
}

/// Brings `frame` to exactly `width` x `height`, keeping its aspect ratio.
pub fn fit_to_canvas(frame: RgbImage, width: u32, height: u32) -> anyhow::Result<RgbImage> {
    if frame.dimensions() == (width, height) {
        return Ok(frame);
    }
    log::debug!(
        "Fitting {}x{} frame to {width}x{height} canvas",
        frame.width(),
        frame.height()
    );
    let scaled = resize_to_width(&frame, width)?;
    let mut canvas = RgbImage::new(width, height);
    imageops::replace(&mut canvas, &*scaled, 0, 0);
    Ok(canvas)
}
