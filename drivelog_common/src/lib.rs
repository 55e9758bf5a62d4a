//! Frame assembly and rendering for multi-sensor driving logs.
//!
//! Camera rows and 3D box annotations sharing a `(segment, timestamp)` key are joined,
//! rendered as a camera mosaic above a bird's-eye-view raster, and collected into an
//! animated sequence.

pub mod bev;
pub mod compositor;
pub mod config;
pub mod frame_index;
pub mod frame_key;
pub mod frame_store;
pub mod frame_times;
pub mod geometry;
pub mod mosaic;
pub mod palette;
pub mod payload;
pub mod pipeline;
pub mod resize;
pub mod sequence;
pub mod sequence_meta;
pub mod tables;

#[cfg(test)]
pub(crate) mod test_utils;
