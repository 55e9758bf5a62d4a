use std::collections::BTreeSet;

use crate::frame_key::FrameKey;
use crate::tables::Keyed;

/// Ordered, duplicate-free sequence of the frames present in a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameIndex {
    keys: Vec<FrameKey>,
}

impl FrameIndex {
    /// Collects the unique keys of `rows`, sorted by `(segment_id, timestamp)`.
    ///
    /// An empty table gives an empty index.
    pub fn from_rows<R: Keyed>(rows: &[R]) -> Self {
        let keys: BTreeSet<&FrameKey> = rows.iter().map(Keyed::frame_key).collect();
        Self {
            keys: keys.into_iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&FrameKey> {
        self.keys.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameKey> {
        self.keys.iter()
    }

    /// Number of frames to visit given an optional cap.
    pub fn capped_len(&self, max_frames: Option<usize>) -> usize {
        match max_frames {
            Some(max) => self.len().min(max),
            None => self.len(),
        }
    }
}
