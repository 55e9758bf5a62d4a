use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one synchronized instant across all sensor tables.
///
/// Ordering is lexicographic by `(segment_id, timestamp)`, which is the order frames are
/// processed and played back in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameKey {
    pub segment_id: String,
    pub timestamp: i64,
}

impl FrameKey {
    pub fn new(segment_id: impl Into<String>, timestamp: i64) -> Self {
        Self {
            segment_id: segment_id.into(),
            timestamp,
        }
    }
}

impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.segment_id, self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_segment_then_timestamp() {
        let a = FrameKey::new("seg_a", 200);
        let b = FrameKey::new("seg_b", 100);
        let c = FrameKey::new("seg_a", 300);
        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
    }

    #[test]
    fn test_display() {
        assert_eq!(FrameKey::new("seg", 42).to_string(), "seg@42");
    }
}
