// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Point record layout for PointCloud2 messages.
//!
//! Every encoded point occupies a fixed 32-byte slot, little-endian:
//!
//! ```text
//! ┌───────┬───────┬───────┬───────┬───────────┬─────────┬──────────────┐
//! │ x:f32 │ y:f32 │ z:f32 │  pad  │ intensity │   pad   │ timestamp:f64│
//! │ 4B    │ 4B    │ 4B    │ 4B    │ 1B (u8)   │ 7B      │ 8B           │
//! └───────┴───────┴───────┴───────┴───────────┴─────────┴──────────────┘
//!   0       4       8       12      16          17        24
//! ```
//!
//! Only the position and intensity bytes are written. Padding and the
//! `timestamp` field are declared in the field table but never populated, so
//! on a reused buffer they hold whatever the previous frame left there.

use std::sync::LazyLock;

use edgefirst_schemas::sensor_msgs::PointField;
use nalgebra::Point3;

/// Point field data types for PointCloud2 messages.
///
/// These values correspond to the ROS sensor_msgs/PointField datatype field.
/// All variants are defined for completeness, even if not all are currently
/// used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[allow(dead_code)]
pub enum PointFieldType {
    INT8 = 1,
    UINT8 = 2,
    INT16 = 3,
    UINT16 = 4,
    INT32 = 5,
    UINT32 = 6,
    FLOAT32 = 7,
    FLOAT64 = 8,
}

/// Bytes per encoded point.
pub const POINT_STEP: usize = 32;
/// Most points one message can carry; `row_step` must fit in a `u32`.
pub const MAX_POINTS: usize = u32::MAX as usize / POINT_STEP;

pub const X_OFFSET: usize = 0;
pub const Y_OFFSET: usize = 4;
pub const Z_OFFSET: usize = 8;
pub const INTENSITY_OFFSET: usize = 16;
pub const TIMESTAMP_OFFSET: usize = 24;

static POINTCLOUD_FIELDS: LazyLock<Vec<PointField>> = LazyLock::new(|| {
    vec![
        field("x", X_OFFSET, PointFieldType::FLOAT32),
        field("y", Y_OFFSET, PointFieldType::FLOAT32),
        field("z", Z_OFFSET, PointFieldType::FLOAT32),
        field("intensity", INTENSITY_OFFSET, PointFieldType::UINT8),
        field("timestamp", TIMESTAMP_OFFSET, PointFieldType::FLOAT64),
    ]
});

fn field(name: &str, offset: usize, datatype: PointFieldType) -> PointField {
    PointField {
        name: String::from(name),
        offset: offset as u32,
        datatype: datatype as u8,
        count: 1,
    }
}

/// The field descriptors of the 32-byte record.
///
/// Built on first use and shared by every message afterwards:
/// - x: FLOAT32 at offset 0
/// - y: FLOAT32 at offset 4
/// - z: FLOAT32 at offset 8
/// - intensity: UINT8 at offset 16
/// - timestamp: FLOAT64 at offset 24
pub fn pointcloud_fields() -> &'static [PointField] {
    &POINTCLOUD_FIELDS
}

/// Quantize a raw `[0, 1]` intensity to a byte.
///
/// The scaled value is truncated toward zero and then wrapped to its low
/// eight bits. Nothing is clamped: `1.5` becomes `126` and `-0.5` becomes
/// `129`. NaN maps to `0`.
#[inline]
pub fn quantize_intensity(w: f32) -> u8 {
    (w * 255.0) as i32 as u8
}

/// Write one point into a 32-byte slot.
///
/// Only the position and intensity bytes are touched.
///
/// # Panics
///
/// Panics if `slot` is shorter than [`INTENSITY_OFFSET`] + 1 bytes.
#[inline]
pub fn write_record(slot: &mut [u8], position: &Point3<f32>, intensity: u8) {
    slot[X_OFFSET..X_OFFSET + 4].copy_from_slice(&position.x.to_le_bytes());
    slot[Y_OFFSET..Y_OFFSET + 4].copy_from_slice(&position.y.to_le_bytes());
    slot[Z_OFFSET..Z_OFFSET + 4].copy_from_slice(&position.z.to_le_bytes());
    slot[INTENSITY_OFFSET] = intensity;
}

/// Decode the position stored in a 32-byte slot.
#[inline]
pub fn read_position(slot: &[u8]) -> Point3<f32> {
    let f = |offset: usize| {
        f32::from_le_bytes([
            slot[offset],
            slot[offset + 1],
            slot[offset + 2],
            slot[offset + 3],
        ])
    };
    Point3::new(f(X_OFFSET), f(Y_OFFSET), f(Z_OFFSET))
}
