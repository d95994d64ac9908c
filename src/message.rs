// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Borrowed PointCloud2 message envelope.
//!
//! [`PointCloudMessage`] mirrors `sensor_msgs/PointCloud2` field for field,
//! but its `data` borrows the encoder's buffer and its `fields` point at the
//! shared static table. It serializes to exactly the same CDR bytes as the
//! owned [`PointCloud2`], without copying the payload into a `Vec` first.

use crate::error::Error;
use edgefirst_schemas::{
    sensor_msgs::{PointCloud2, PointField},
    serde_cdr,
    std_msgs::Header,
};
use serde::Serialize;

/// ROS type name of the serialized message.
pub const POINTCLOUD2_SCHEMA: &str = "sensor_msgs/msg/PointCloud2";

/// A PointCloud2 view over an encoder's buffer.
///
/// The view is valid until the encoder that produced it runs again; the
/// borrow checker enforces this. Use [`PointCloudMessage::to_pointcloud2`]
/// to keep a frame around longer.
#[derive(Debug, Clone, Serialize)]
pub struct PointCloudMessage<'a> {
    pub header: Header,
    pub height: u32,
    pub width: u32,
    pub fields: &'static [PointField],
    pub is_bigendian: bool,
    pub point_step: u32,
    pub row_step: u32,
    pub data: &'a [u8],
    pub is_dense: bool,
}

impl PointCloudMessage<'_> {
    /// Number of points carried by the message.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Serialize to little-endian CDR, ready for a Zenoh payload.
    pub fn serialize(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_cdr::serialize(self)?)
    }

    /// Copy into an owned message that outlives the encoder buffer.
    pub fn to_pointcloud2(&self) -> PointCloud2 {
        PointCloud2 {
            header: self.header.clone(),
            height: self.height,
            width: self.width,
            fields: self.fields.to_vec(),
            is_bigendian: self.is_bigendian,
            point_step: self.point_step,
            row_step: self.row_step,
            data: self.data.to_vec(),
            is_dense: self.is_dense,
        }
    }
}
