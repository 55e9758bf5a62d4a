//! Loading of the sensor tables from a dataset directory.
//!
//! Each table is a JSON array of rows. Rows are converted to the pipeline's row types
//! here, so the rest of the program never sees the storage format.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use drivelog_common::frame_key::FrameKey;
use drivelog_common::frame_store::FrameStore;
use drivelog_common::payload::ImagePayload;
use drivelog_common::tables::{BoxRecord, CameraId, CameraRow, RangeSensorRow, TypeValue};
use image::{DynamicImage, RgbImage};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const CAMERA_TABLE: &str = "camera.json";
pub const LIDAR_TABLE: &str = "lidar.json";
pub const LIDAR_BOX_TABLE: &str = "lidar_box.json";

/// Where a camera row's image comes from.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ImageSource {
    /// Encoded image file, relative to the dataset directory.
    File(PathBuf),
    /// Encoded image bytes.
    Bytes(Vec<u8>),
    /// Already decoded, row-major RGB.
    Pixels { width: u32, height: u32, data: Vec<u8> },
}

#[derive(Debug, Deserialize)]
struct CameraRecord {
    segment_id: String,
    timestamp: i64,
    camera_id: CameraId,
    image: ImageSource,
}

#[derive(Debug, Deserialize)]
struct LidarRecord {
    segment_id: String,
    timestamp: i64,
    #[serde(flatten)]
    content: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct BoxRow {
    segment_id: String,
    timestamp: i64,
    center_x: f64,
    center_y: f64,
    length: f64,
    width: f64,
    heading: f64,
    #[serde(rename = "type", default)]
    type_value: TypeValue,
}

fn read_table<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {path:?}"))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse {path:?}"))
}

fn load_payload(dir: &Path, image: ImageSource) -> anyhow::Result<ImagePayload> {
    let payload = match image {
        ImageSource::File(file) => {
            let path = dir.join(file);
            ImagePayload::EncodedBytes(
                fs::read(&path).with_context(|| format!("Failed to read image {path:?}"))?,
            )
        }
        ImageSource::Bytes(bytes) => ImagePayload::EncodedBytes(bytes),
        ImageSource::Pixels {
            width,
            height,
            data,
        } => {
            let image = RgbImage::from_raw(width, height, data)
                .with_context(|| format!("Pixel data does not fill {width}x{height}"))?;
            ImagePayload::RawPixels(DynamicImage::ImageRgb8(image))
        }
    };
    Ok(payload)
}

/// Converts a stored row. The row and its key are always kept: an unreadable image
/// becomes an empty payload, which fails to decode when the mosaic is built.
fn camera_row(dir: &Path, record: CameraRecord) -> CameraRow {
    let key = FrameKey::new(record.segment_id, record.timestamp);
    let payload = load_payload(dir, record.image).unwrap_or_else(|e| {
        log::warn!("Camera {} of {key}: {e:#}", record.camera_id);
        ImagePayload::EncodedBytes(Vec::new())
    });
    CameraRow {
        key,
        camera_id: record.camera_id,
        payload,
    }
}

/// Reads the three tables of `dir` into a [`FrameStore`].
///
/// The lidar table is optional.
pub fn load_store(dir: &Path) -> anyhow::Result<FrameStore> {
    let camera = read_table::<CameraRecord>(&dir.join(CAMERA_TABLE))?
        .into_iter()
        .map(|record| camera_row(dir, record))
        .collect();

    let lidar_path = dir.join(LIDAR_TABLE);
    let range_sensor = if lidar_path.exists() {
        read_table::<LidarRecord>(&lidar_path)?
            .into_iter()
            .map(|record| RangeSensorRow {
                key: FrameKey::new(record.segment_id, record.timestamp),
                content: serde_json::Value::Object(record.content),
            })
            .collect()
    } else {
        log::warn!("No {LIDAR_TABLE} in {dir:?}, continuing without range-sensor rows");
        Vec::new()
    };

    let boxes = read_table::<BoxRow>(&dir.join(LIDAR_BOX_TABLE))?
        .into_iter()
        .map(|row| BoxRecord {
            key: FrameKey::new(row.segment_id, row.timestamp),
            center_x: row.center_x,
            center_y: row.center_y,
            length: row.length,
            width: row.width,
            heading: row.heading,
            type_value: row.type_value,
        })
        .collect();

    Ok(FrameStore::new(camera, range_sensor, boxes))
}
