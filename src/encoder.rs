// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Per-frame point cloud encoder.
//!
//! [`PointCloudEncoder`] owns one byte buffer sized to `32 * N` for the most
//! recent input length `N`. Each call transforms, quantizes and packs the
//! non-zero points of the frame into that buffer and returns a
//! [`PointCloudMessage`] borrowing the packed prefix.
//!
//! ```text
//! points (N)              buffer (32 * N bytes)
//! ┌──────────┐            ┌────────┬────────┬────────┬────────────────┐
//! │ p0       │ ─────────► │ slot 0 │ slot 1 │ slot 2 │ unused capacity│
//! │ 0,0,0,0  │  (skipped) └────────┴────────┴────────┴────────────────┘
//! │ p2       │            ◄──── data: valid * 32 ────►
//! │ p3       │
//! └──────────┘
//! ```
//!
//! The buffer is only replaced when `N` changes. Filtering never shrinks it,
//! and slots are not cleared between frames.

use crate::{
    formats::{MAX_POINTS, POINT_STEP, pointcloud_fields, quantize_intensity, write_record},
    message::PointCloudMessage,
    time::to_ros_time,
};
use edgefirst_schemas::std_msgs::Header;
use nalgebra::{Affine3, Point3, Vector4};
use tracing::{instrument, trace, warn};

/// Reusable PointCloud2 encoder for one producer.
///
/// Not meant to be shared: `encode` takes `&mut self` and the returned
/// message borrows the internal buffer, so concurrent producers each need
/// their own encoder.
#[derive(Debug, Default)]
pub struct PointCloudEncoder {
    buffer: Vec<u8>,
    reallocations: u64,
}

impl PointCloudEncoder {
    /// Create an encoder with no buffer; the first non-empty frame allocates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current buffer size in bytes (`32 * N` of the last frame).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Number of times the buffer has been (re)allocated.
    #[inline]
    pub fn reallocations(&self) -> u64 {
        self.reallocations
    }

    /// Address of the buffer, for identity checks across frames.
    #[inline]
    pub fn buffer_ptr(&self) -> *const u8 {
        self.buffer.as_ptr()
    }

    /// Encode one frame.
    ///
    /// # Arguments
    ///
    /// * `points` - Sensor-local `(x, y, z, intensity)` points. The all-zero
    ///   vector marks a missing return and is dropped.
    /// * `transform` - Applied to every kept position.
    /// * `timestamp` - Frame time in seconds, converted with
    ///   [`to_ros_time`].
    /// * `frame_id` - Header frame identifier.
    ///
    /// # Returns
    ///
    /// A message whose `width` is the number of kept points and whose `data`
    /// is the first `width * 32` bytes of the internal buffer. Kept points
    /// retain their input order.
    #[instrument(skip_all, fields(n_points = points.len()))]
    pub fn encode(
        &mut self,
        points: &[Vector4<f32>],
        transform: &Affine3<f32>,
        timestamp: f64,
        frame_id: &str,
    ) -> PointCloudMessage<'_> {
        let n_bytes = POINT_STEP * points.len();
        if self.buffer.len() != n_bytes {
            trace!(
                old = self.buffer.len(),
                new = n_bytes,
                "reallocating point cloud buffer"
            );
            self.buffer = vec![0u8; n_bytes];
            self.reallocations += 1;
        }

        let count = self.pack(points, transform, MAX_POINTS);
        if count == MAX_POINTS && points.len() > MAX_POINTS {
            warn!(
                n_points = points.len(),
                "frame exceeds {} points, remainder dropped", MAX_POINTS
            );
        }

        // count <= MAX_POINTS, so both fit in u32.
        let width = count as u32;
        let row_step = (count * POINT_STEP) as u32;
        PointCloudMessage {
            header: Header {
                stamp: to_ros_time(timestamp),
                frame_id: frame_id.to_owned(),
            },
            height: 1,
            width,
            fields: pointcloud_fields(),
            is_bigendian: false,
            point_step: POINT_STEP as u32,
            row_step,
            data: &self.buffer[..count * POINT_STEP],
            is_dense: true,
        }
    }

    /// Pack up to `limit` non-zero points into the buffer, returning how many
    /// were written.
    fn pack(&mut self, points: &[Vector4<f32>], transform: &Affine3<f32>, limit: usize) -> usize {
        let mut count = 0;
        let mut slots = self.buffer.chunks_exact_mut(POINT_STEP).take(limit);
        for point in points {
            // Exact value comparison: -0.0 matches, NaN never does.
            if *point == Vector4::zeros() {
                continue;
            }
            let Some(slot) = slots.next() else {
                break;
            };

            let position = transform.transform_point(&Point3::new(point.x, point.y, point.z));
            write_record(slot, &position, quantize_intensity(point.w));
            count += 1;
        }
        count
    }
}
