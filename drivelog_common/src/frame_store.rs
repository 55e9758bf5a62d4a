use crate::frame_index::FrameIndex;
use crate::frame_key::FrameKey;
use crate::tables::{BoxRecord, CameraRow, Keyed, RangeSensorRow};

/// The loaded sensor tables, owned in one place and shared by reference.
#[derive(Debug, Default)]
pub struct FrameStore {
    camera: Vec<CameraRow>,
    range_sensor: Vec<RangeSensorRow>,
    boxes: Vec<BoxRecord>,
}

/// The rows of every table that belong to one frame.
#[derive(Debug)]
pub struct FrameRows<'a> {
    pub camera: Vec<&'a CameraRow>,
    pub range_sensor: Vec<&'a RangeSensorRow>,
    pub boxes: Vec<&'a BoxRecord>,
}

impl FrameStore {
    pub fn new(
        camera: Vec<CameraRow>,
        range_sensor: Vec<RangeSensorRow>,
        boxes: Vec<BoxRecord>,
    ) -> Self {
        Self {
            camera,
            range_sensor,
            boxes,
        }
    }

    /// Frames are indexed from the camera table, the primary sensor.
    pub fn frame_index(&self) -> FrameIndex {
        FrameIndex::from_rows(&self.camera)
    }

    /// Filters each table down to the rows of `key`, keeping table order.
    ///
    /// The three subsets are independent, any of them may be empty.
    pub fn retrieve(&self, key: &FrameKey) -> FrameRows<'_> {
        FrameRows {
            camera: rows_for(&self.camera, key),
            range_sensor: rows_for(&self.range_sensor, key),
            boxes: rows_for(&self.boxes, key),
        }
    }

    pub fn table_sizes(&self) -> (usize, usize, usize) {
        (self.camera.len(), self.range_sensor.len(), self.boxes.len())
    }
}

fn rows_for<'a, R: Keyed>(rows: &'a [R], key: &FrameKey) -> Vec<&'a R> {
    rows.iter().filter(|row| row.frame_key() == key).collect()
}
