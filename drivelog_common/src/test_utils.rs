//! Fixtures shared by the unit tests.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::frame_key::FrameKey;
use crate::payload::ImagePayload;
use crate::tables::{BoxRecord, CameraId, CameraRow, RangeSensorRow, TypeValue};

pub fn png_bytes(image: &RgbImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

pub fn solid(width: u32, height: u32, value: u8) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([value, value, value]))
}

pub fn camera_row(key: &FrameKey, camera_id: CameraId, image: RgbImage) -> CameraRow {
    CameraRow {
        key: key.clone(),
        camera_id,
        payload: ImagePayload::EncodedBytes(png_bytes(&image)),
    }
}

pub fn raw_camera_row(key: &FrameKey, camera_id: CameraId, image: RgbImage) -> CameraRow {
    CameraRow {
        key: key.clone(),
        camera_id,
        payload: ImagePayload::RawPixels(DynamicImage::ImageRgb8(image)),
    }
}

pub fn lidar_row(key: &FrameKey, n: i64) -> RangeSensorRow {
    RangeSensorRow {
        key: key.clone(),
        content: serde_json::json!({ "n": n }),
    }
}

pub fn box_record(key: &FrameKey, center_x: f64, center_y: f64, type_code: i64) -> BoxRecord {
    BoxRecord {
        key: key.clone(),
        center_x,
        center_y,
        length: 4.0,
        width: 2.0,
        heading: 0.0,
        type_value: TypeValue::Int(type_code),
    }
}
