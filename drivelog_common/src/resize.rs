//! Bilinear resizing of RGB grids on top of `fast_image_resize`.

use std::borrow::Cow;

use anyhow::Context;
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::RgbImage;

/// Resizes `image` to exactly `width` x `height`.
pub fn resize_rgb(image: &RgbImage, width: u32, height: u32) -> anyhow::Result<RgbImage> {
    let (src_width, src_height) = image.dimensions();
    anyhow::ensure!(
        src_width > 0 && src_height > 0,
        "Cannot resize an empty {src_width}x{src_height} image"
    );
    anyhow::ensure!(
        width > 0 && height > 0,
        "Cannot resize to an empty {width}x{height} image"
    );

    let src = Image::from_vec_u8(src_width, src_height, image.as_raw().clone(), PixelType::U8x3)
        .context("Failed to wrap source image")?;
    let mut dst = Image::new(width, height, PixelType::U8x3);

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));
    Resizer::new()
        .resize(&src, &mut dst, &options)
        .with_context(|| {
            format!("Failed to resize {src_width}x{src_height} to {width}x{height}")
        })?;

    RgbImage::from_raw(width, height, dst.into_vec())
        .context("Resized buffer does not match its dimensions")
}

/// Height of `height` after scaling a `from_width` wide image to `to_width`.
///
/// Truncates, and never goes below one pixel.
pub fn scaled_height(height: u32, from_width: u32, to_width: u32) -> u32 {
    let scale = to_width as f64 / from_width as f64;
    ((height as f64 * scale) as u32).max(1)
}

/// Scales `image` to `width`, keeping its aspect ratio.
///
/// Borrows the input unchanged when it already has that width.
pub fn resize_to_width(image: &RgbImage, width: u32) -> anyhow::Result<Cow<'_, RgbImage>> {
    let (w, h) = image.dimensions();
    if w == width {
        return Ok(Cow::Borrowed(image));
    }
    let height = scaled_height(h, w, width);
    resize_rgb(image, width, height).map(Cow::Owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::solid;

    #[test]
    fn test_resize_rgb_dimensions() {
        let src = solid(8, 4, 100);
        let out = resize_rgb(&src, 3, 5).unwrap();
        assert_eq!(out.dimensions(), (3, 5));
    }

    #[test]
    fn test_resize_keeps_uniform_color() {
        let src = solid(10, 10, 200);
        let out = resize_rgb(&src, 4, 4).unwrap();
        assert!(out.pixels().all(|p| p.0 == [200, 200, 200]));
    }

    #[test]
    fn test_resize_rejects_empty() {
        assert!(resize_rgb(&RgbImage::new(0, 4), 2, 2).is_err());
        assert!(resize_rgb(&solid(2, 2, 0), 0, 2).is_err());
    }

    #[test]
    fn test_scaled_height_truncates() {
        assert_eq!(scaled_height(100, 300, 200), 66);
        assert_eq!(scaled_height(480, 640, 640), 480);
        assert_eq!(scaled_height(1, 1000, 10), 1);
    }

    #[test]
    fn test_resize_to_same_width_borrows() {
        let src = solid(6, 3, 9);
        let out = resize_to_width(&src, 6).unwrap();
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(*out, src);
    }

    #[test]
    fn test_resize_to_width_keeps_aspect() {
        let src = solid(200, 100, 9);
        let out = resize_to_width(&src, 100).unwrap();
        assert_eq!(out.dimensions(), (100, 50));
    }
}
