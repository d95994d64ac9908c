// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! EdgeFirst PointCloud2 Writer Library
//!
//! Converts per-frame arrays of 3D sensor points into `sensor_msgs/PointCloud2`
//! wire messages and publishes them over Zenoh.
//!
//! # Architecture
//!
//! The library uses an **encoder-owned buffer** pattern so steady-state
//! frames do not allocate:
//!
//! ```text
//! ┌─────────────────┐     ┌───────────────────┐     ┌────────────────────┐
//! │  points (N)     │ ──► │ PointCloudEncoder │ ──► │ PointCloudMessage  │
//! │  + transform    │     │ (32 * N byte buf) │     │ (borrows the buf)  │
//! └─────────────────┘     └───────────────────┘     └────────────────────┘
//!                                                            │
//!                                                            ▼
//!                                                  ┌────────────────────┐
//!                                                  │ MessageSink::send  │
//!                                                  │ (Zenoh, CDR)       │
//!                                                  └────────────────────┘
//! ```
//!
//! 1. The caller hands a point slice, a transform, a time and a frame id to
//!    [`PointCloudEncoder::encode`].
//! 2. The encoder drops all-zero points and packs the rest into its buffer,
//!    32 bytes per point.
//! 3. The returned message borrows the buffer, so it must be consumed (sent
//!    or copied) before the next frame is encoded.
//!
//! # Modules
//!
//! - [`encoder`]: Buffer reuse and the per-point encode loop
//! - [`formats`]: Record layout and the static field table
//! - [`message`]: Borrowed PointCloud2 envelope and CDR serialization
//! - [`writer`]: Transport sink trait and the Zenoh publisher
//! - [`time`]: Header timestamp conversion
//! - [`transform`]: tf vector/quaternion to affine transform
//! - [`scan`]: Synthetic scan source for demos and benchmarks
//!
//! # Example
//!
//! ```
//! use edgefirst_pcdwriter::PointCloudEncoder;
//! use nalgebra::{Affine3, Vector4};
//!
//! let mut encoder = PointCloudEncoder::new();
//! let points = [
//!     Vector4::new(1.0, 2.0, 3.0, 0.5),
//!     Vector4::zeros(), // no return
//! ];
//!
//! let msg = encoder.encode(&points, &Affine3::identity(), 12.5, "lidar");
//! assert_eq!(msg.width, 1);
//! assert_eq!(msg.data.len(), 32);
//! ```

pub mod encoder;
pub mod error;
pub mod formats;
pub mod message;
pub mod scan;
pub mod time;
pub mod transform;
pub mod writer;

// Re-exports for convenience
pub use encoder::PointCloudEncoder;
pub use error::Error;
pub use formats::{MAX_POINTS, POINT_STEP, PointFieldType, pointcloud_fields};
pub use message::PointCloudMessage;
pub use writer::{MessageSink, PointCloudData, PointCloudWriter, ZenohSink};
