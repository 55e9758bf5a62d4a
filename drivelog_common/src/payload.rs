use anyhow::Context;
use image::{DynamicImage, RgbImage};

/// Image carried by a camera row.
///
/// Rows either hold the compressed bytes exactly as stored, or a pixel grid that was
/// already decoded upstream. Both go through [`ImagePayload::decode`] to get a uniform
/// 3-channel image.
#[derive(Debug, Clone)]
pub enum ImagePayload {
    RawPixels(DynamicImage),
    EncodedBytes(Vec<u8>),
}

impl ImagePayload {
    /// Decodes the payload into an 8-bit RGB grid.
    ///
    /// Fails on unreadable bytes and on zero-sized images.
    pub fn decode(&self) -> anyhow::Result<RgbImage> {
        let image = match self {
            ImagePayload::RawPixels(image) => image.to_rgb8(),
            ImagePayload::EncodedBytes(bytes) => image::load_from_memory(bytes)
                .with_context(|| format!("Failed to decode {} byte image payload", bytes.len()))?
                .to_rgb8(),
        };
        let (width, height) = image.dimensions();
        anyhow::ensure!(
            width > 0 && height > 0,
            "Decoded image is empty: {width}x{height}"
        );
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma, Rgb};

    use super::*;
    use crate::test_utils::png_bytes;

    #[test]
    fn test_decode_encoded_png() {
        let src = RgbImage::from_pixel(4, 3, Rgb([10, 20, 30]));
        let payload = ImagePayload::EncodedBytes(png_bytes(&src));
        let decoded = payload.decode().unwrap();
        assert_eq!(decoded, src);
    }

    #[test]
    fn test_decode_raw_gray_expands_to_rgb() {
        let gray = GrayImage::from_pixel(2, 2, Luma([77]));
        let payload = ImagePayload::RawPixels(DynamicImage::ImageLuma8(gray));
        let decoded = payload.decode().unwrap();
        assert_eq!(decoded.get_pixel(1, 1), &Rgb([77, 77, 77]));
    }

    #[test]
    fn test_decode_corrupt_bytes_fails() {
        let payload = ImagePayload::EncodedBytes(vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(payload.decode().is_err());
    }

    #[test]
    fn test_decode_empty_raw_fails() {
        let payload = ImagePayload::RawPixels(DynamicImage::ImageRgb8(RgbImage::new(0, 0)));
        assert!(payload.decode().is_err());
    }
}
