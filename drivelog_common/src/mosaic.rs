use image::{imageops, RgbImage};

use crate::config::CAMERA_IDS;
use crate::resize::resize_rgb;
use crate::tables::{CameraId, CameraRow};

/// Lays out the camera images of one frame side by side.
#[derive(Debug, Clone)]
pub struct CameraMosaicBuilder {
    camera_ids: Vec<CameraId>,
}

impl Default for CameraMosaicBuilder {
    fn default() -> Self {
        Self::new(CAMERA_IDS.to_vec())
    }
}

impl CameraMosaicBuilder {
    /// `camera_ids` gives the left-to-right order; other cameras are ignored.
    pub fn new(camera_ids: Vec<CameraId>) -> Self {
        Self { camera_ids }
    }

    /// Decodes one image per configured camera and concatenates them horizontally.
    ///
    /// Cameras without a row, or whose payload fails to decode, are left out. Every
    /// image is brought to the size of the first decoded one. Returns `None` when no
    /// image decodes.
    pub fn build(&self, rows: &[&CameraRow]) -> Option<RgbImage> {
        let mut images: Vec<RgbImage> = Vec::with_capacity(self.camera_ids.len());

        for &camera_id in &self.camera_ids {
            let Some(row) = rows.iter().find(|row| row.camera_id == camera_id) else {
                continue;
            };
            let image = match row.payload.decode() {
                Ok(image) => image,
                Err(e) => {
                    log::warn!("Camera {camera_id} of {}: {e:#}, dropping it", row.key);
                    continue;
                }
            };
            let image = match images.first().map(RgbImage::dimensions) {
                Some((width, height)) if image.dimensions() != (width, height) => {
                    match resize_rgb(&image, width, height) {
                        Ok(resized) => resized,
                        Err(e) => {
                            log::warn!("Camera {camera_id} of {}: {e:#}, dropping it", row.key);
                            continue;
                        }
                    }
                }
                _ => image,
            };
            images.push(image);
        }

        concat_horizontal(&images)
    }
}

fn concat_horizontal(images: &[RgbImage]) -> Option<RgbImage> {
    let (width, height) = images.first()?.dimensions();
    let mut mosaic = RgbImage::new(width * images.len() as u32, height);
    for (i, image) in images.iter().enumerate() {
        imageops::replace(&mut mosaic, image, (i as u32 * width) as i64, 0);
    }
    Some(mosaic)
}

#[cfg(test)]
mod tests {
    use image::Rgb;

    use super::*;
    use crate::frame_key::FrameKey;
    use crate::payload::ImagePayload;
    use crate::test_utils::{camera_row, raw_camera_row, solid};

    fn key() -> FrameKey {
        FrameKey::new("seg", 7)
    }

    #[test]
    fn test_mosaic_follows_camera_order() {
        let rows = vec![
            camera_row(&key(), 3, solid(4, 2, 30)),
            camera_row(&key(), 1, solid(4, 2, 10)),
            camera_row(&key(), 2, solid(4, 2, 20)),
        ];
        let refs: Vec<_> = rows.iter().collect();
        let mosaic = CameraMosaicBuilder::default().build(&refs).unwrap();

        assert_eq!(mosaic.dimensions(), (12, 2));
        assert_eq!(mosaic.get_pixel(0, 0), &Rgb([10, 10, 10]));
        assert_eq!(mosaic.get_pixel(4, 1), &Rgb([20, 20, 20]));
        assert_eq!(mosaic.get_pixel(11, 1), &Rgb([30, 30, 30]));
    }

    #[test]
    fn test_mosaic_normalizes_to_first_image() {
        let rows = vec![
            camera_row(&key(), 1, solid(8, 6, 10)),
            raw_camera_row(&key(), 2, solid(16, 3, 20)),
            camera_row(&key(), 4, solid(2, 2, 40)),
        ];
        let refs: Vec<_> = rows.iter().collect();
        let mosaic = CameraMosaicBuilder::default().build(&refs).unwrap();

        assert_eq!(mosaic.height(), 6);
        assert_eq!(mosaic.width(), 8 * 3);
        assert_eq!(mosaic.get_pixel(8 * 2 + 1, 3), &Rgb([40, 40, 40]));
    }

    #[test]
    fn test_corrupt_payload_is_dropped() {
        let corrupt = CameraRow {
            key: key(),
            camera_id: 1,
            payload: ImagePayload::EncodedBytes(b"not an image".to_vec()),
        };
        let rows = vec![corrupt, camera_row(&key(), 2, solid(5, 4, 20))];
        let refs: Vec<_> = rows.iter().collect();
        let mosaic = CameraMosaicBuilder::default().build(&refs).unwrap();

        // the first decoded image sets the size
        assert_eq!(mosaic.dimensions(), (5, 4));
        assert_eq!(mosaic.get_pixel(0, 0), &Rgb([20, 20, 20]));
    }

    #[test]
    fn test_no_decodable_image_gives_none() {
        let rows = vec![CameraRow {
            key: key(),
            camera_id: 1,
            payload: ImagePayload::EncodedBytes(Vec::new()),
        }];
        let refs: Vec<_> = rows.iter().collect();
        assert!(CameraMosaicBuilder::default().build(&refs).is_none());
        assert!(CameraMosaicBuilder::default().build(&[]).is_none());
    }

    #[test]
    fn test_unlisted_cameras_are_ignored() {
        let rows = vec![camera_row(&key(), 9, solid(4, 4, 10))];
        let refs: Vec<_> = rows.iter().collect();
        assert!(CameraMosaicBuilder::default().build(&refs).is_none());

        let builder = CameraMosaicBuilder::new(vec![9]);
        assert_eq!(builder.build(&refs).unwrap().dimensions(), (4, 4));
    }

    #[test]
    fn test_first_row_wins_for_repeated_camera() {
        let rows = vec![
            camera_row(&key(), 1, solid(3, 3, 10)),
            camera_row(&key(), 1, solid(3, 3, 99)),
        ];
        let refs: Vec<_> = rows.iter().collect();
        let mosaic = CameraMosaicBuilder::default().build(&refs).unwrap();
        assert_eq!(mosaic.dimensions(), (3, 3));
        assert_eq!(mosaic.get_pixel(1, 1), &Rgb([10, 10, 10]));
    }
}
