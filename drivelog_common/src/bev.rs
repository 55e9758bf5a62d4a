//! Bird's-eye-view raster of a frame's annotated boxes.
//!
//! The plot area maps the configured extents with one shared pixel scale for both axes,
//! +x pointing right and +y pointing up, and is framed by a blank margin with a border
//! and tick marks.

use anyhow::ensure;
use image::{imageops, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::config;
use crate::geometry::{box_corners, Bounds, Point2};
use crate::palette::{color_for_type, EGO_COLOR};
use crate::tables::BoxRecord;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID_COLOR: Rgb<u8> = Rgb([220, 220, 220]);
const FRAME_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const DASH_PX: f32 = 4.0;
const TICK_PX: f32 = 4.0;

/// Extents and raster scale of the BEV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BevConfig {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub pixels_per_meter: f64,
    pub margin: u32,
    pub grid_step: f64,
}

impl Default for BevConfig {
    fn default() -> Self {
        Self {
            x_min: config::X_MIN,
            x_max: config::X_MAX,
            y_min: config::Y_MIN,
            y_max: config::Y_MAX,
            pixels_per_meter: config::PIXELS_PER_METER,
            margin: config::BEV_MARGIN,
            grid_step: config::GRID_STEP_M,
        }
    }
}

impl BevConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_x: self.x_min,
            max_x: self.x_max,
            min_y: self.y_min,
            max_y: self.y_max,
        }
    }

    /// Rejects extents and scales that cannot produce a raster.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.x_min < self.x_max && self.y_min < self.y_max,
            "BEV extents are empty: x {}..{}, y {}..{}",
            self.x_min,
            self.x_max,
            self.y_min,
            self.y_max
        );
        ensure!(
            self.pixels_per_meter > 0.0 && self.pixels_per_meter <= config::MAX_PIXELS_PER_METER,
            "pixels per meter must be in (0, {}], got {}",
            config::MAX_PIXELS_PER_METER,
            self.pixels_per_meter
        );
        let (width, height) = self.plot_size();
        ensure!(
            width.max(height) <= config::MAX_BEV_SIDE,
            "BEV raster of {width}x{height} exceeds {} pixels per side",
            config::MAX_BEV_SIDE
        );
        Ok(())
    }

    /// Size of the plot area, without margins.
    pub fn plot_size(&self) -> (u32, u32) {
        let width = ((self.x_max - self.x_min) * self.pixels_per_meter).round() as u32;
        let height = ((self.y_max - self.y_min) * self.pixels_per_meter).round() as u32;
        (width.max(1), height.max(1))
    }

    /// Size of the rendered raster.
    pub fn image_size(&self) -> (u32, u32) {
        let (width, height) = self.plot_size();
        let border = self.margin.saturating_mul(2);
        (width.saturating_add(border), height.saturating_add(border))
    }

    /// Maps an ego-frame point to plot-area pixel coordinates.
    pub fn to_plot_pixel(&self, (x, y): Point2) -> (f32, f32) {
        (
            ((x - self.x_min) * self.pixels_per_meter) as f32,
            ((self.y_max - y) * self.pixels_per_meter) as f32,
        )
    }
}

/// Renders boxes into a fixed-size top-down raster.
#[derive(Debug, Clone, Default)]
pub struct BevRenderer {
    config: BevConfig,
}

impl BevRenderer {
    pub fn new(config: BevConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BevConfig {
        &self.config
    }

    /// Draws every box outline plus the ego marker.
    ///
    /// Always returns an image of [`BevConfig::image_size`]; with no boxes it only shows
    /// the grid, frame and ego marker.
    pub fn render(&self, boxes: &[&BoxRecord]) -> RgbImage {
        let cfg = &self.config;
        let (plot_width, plot_height) = cfg.plot_size();
        let mut plot = RgbImage::from_pixel(plot_width, plot_height, BACKGROUND);

        self.draw_grid(&mut plot);
        for record in boxes {
            self.draw_box(&mut plot, record);
        }

        let (ego_x, ego_y) = cfg.to_plot_pixel((0.0, 0.0));
        draw_filled_circle_mut(
            &mut plot,
            (ego_x.round() as i32, ego_y.round() as i32),
            config::EGO_MARKER_RADIUS,
            EGO_COLOR,
        );

        let (width, height) = cfg.image_size();
        let mut image = RgbImage::from_pixel(width, height, BACKGROUND);
        imageops::replace(&mut image, &plot, cfg.margin as i64, cfg.margin as i64);
        self.draw_frame(&mut image);
        image
    }

    fn draw_box(&self, plot: &mut RgbImage, record: &BoxRecord) {
        let corners = box_corners(
            record.center_x,
            record.center_y,
            record.length,
            record.width,
            record.heading,
        );
        let color = color_for_type(&record.type_value);
        let bounds = self.config.bounds();

        for i in 0..corners.len() {
            let a = corners[i];
            let b = corners[(i + 1) % corners.len()];
            let Some((a, b)) = bounds.clip_segment(a, b) else {
                continue;
            };
            let start = self.config.to_plot_pixel(a);
            let end = self.config.to_plot_pixel(b);
            // two pixels wide
            for (dx, dy) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
                draw_line_segment_mut(
                    plot,
                    (start.0 + dx, start.1 + dy),
                    (end.0 + dx, end.1 + dy),
                    color,
                );
            }
        }
    }

    fn grid_lines(&self, min: f64, max: f64) -> Vec<f64> {
        let step = self.config.grid_step;
        if step <= 0.0 || !step.is_finite() {
            return Vec::new();
        }
        let first = (min / step).ceil() as i64;
        let last = (max / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }

    fn draw_grid(&self, plot: &mut RgbImage) {
        let cfg = &self.config;
        for x in self.grid_lines(cfg.x_min, cfg.x_max) {
            let start = cfg.to_plot_pixel((x, cfg.y_max));
            let end = cfg.to_plot_pixel((x, cfg.y_min));
            draw_dashed_segment(plot, start, end, GRID_COLOR);
        }
        for y in self.grid_lines(cfg.y_min, cfg.y_max) {
            let start = cfg.to_plot_pixel((cfg.x_min, y));
            let end = cfg.to_plot_pixel((cfg.x_max, y));
            draw_dashed_segment(plot, start, end, GRID_COLOR);
        }
    }

    fn draw_frame(&self, image: &mut RgbImage) {
        let cfg = &self.config;
        let margin = cfg.margin as i32;
        let (plot_width, plot_height) = cfg.plot_size();
        draw_hollow_rect_mut(
            image,
            Rect::at(margin - 1, margin - 1).of_size(plot_width + 2, plot_height + 2),
            FRAME_COLOR,
        );

        let bottom = (margin + plot_height as i32) as f32;
        for x in self.grid_lines(cfg.x_min, cfg.x_max) {
            let px = cfg.to_plot_pixel((x, cfg.y_min)).0 + margin as f32;
            draw_line_segment_mut(image, (px, bottom), (px, bottom + TICK_PX), FRAME_COLOR);
        }
        let left = (margin - 1) as f32;
        for y in self.grid_lines(cfg.y_min, cfg.y_max) {
            let py = cfg.to_plot_pixel((cfg.x_min, y)).1 + margin as f32;
            draw_line_segment_mut(image, (left - TICK_PX, py), (left, py), FRAME_COLOR);
        }
    }
}

fn draw_dashed_segment(canvas: &mut RgbImage, start: (f32, f32), end: (f32, f32), color: Rgb<u8>) {
    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 || !length.is_finite() {
        return;
    }
    let (ux, uy) = (dx / length, dy / length);
    let mut t = 0.0;
    while t < length {
        let t_end = (t + DASH_PX).min(length);
        draw_line_segment_mut(
            canvas,
            (start.0 + ux * t, start.1 + uy * t),
            (start.0 + ux * t_end, start.1 + uy * t_end),
            color,
        );
        t += 2.0 * DASH_PX;
    }
}
