//! Row types of the three sensor tables consumed by the pipeline.

use serde::{Deserialize, Serialize};

use crate::frame_key::FrameKey;
use crate::payload::ImagePayload;

pub type CameraId = i32;

/// Anything that belongs to exactly one frame.
pub trait Keyed {
    fn frame_key(&self) -> &FrameKey;
}

/// One camera image of one frame.
#[derive(Debug, Clone)]
pub struct CameraRow {
    pub key: FrameKey,
    pub camera_id: CameraId,
    pub payload: ImagePayload,
}

/// One range-sensor (lidar) row. Only the key is interpreted here.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSensorRow {
    pub key: FrameKey,
    pub content: serde_json::Value,
}

/// Raw value of an annotation's type column, as it was stored.
///
/// The column is open-ended: any scalar is accepted and only resolved to a numeric code
/// when it is rendered, see [`crate::palette::parse_type_code`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    #[default]
    Missing,
}

/// One annotated 3D box, reduced to the top-down quantities the BEV needs.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxRecord {
    pub key: FrameKey,
    /// Box center in the ego frame, meters.
    pub center_x: f64,
    pub center_y: f64,
    /// Extent along the heading direction, meters.
    pub length: f64,
    /// Extent across the heading direction, meters.
    pub width: f64,
    /// Radians, counter-clockwise from +x.
    pub heading: f64,
    pub type_value: TypeValue,
}

impl Keyed for CameraRow {
    fn frame_key(&self) -> &FrameKey {
        &self.key
    }
}

impl Keyed for RangeSensorRow {
    fn frame_key(&self) -> &FrameKey {
        &self.key
    }
}

impl Keyed for BoxRecord {
    fn frame_key(&self) -> &FrameKey {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_value_from_json_scalars() {
        let parsed: Vec<TypeValue> =
            serde_json::from_str(r#"[1, 2.5, true, "3", null]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                TypeValue::Int(1),
                TypeValue::Float(2.5),
                TypeValue::Bool(true),
                TypeValue::Text("3".to_string()),
                TypeValue::Missing,
            ]
        );
    }
}
