// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Point cloud writer bound to a transport topic.
//!
//! A [`PointCloudWriter`] pairs one [`PointCloudEncoder`] with one
//! [`MessageSink`]. Each [`PointCloudWriter::write`] encodes a frame into the
//! encoder's buffer and hands the borrowed message to the sink, which must
//! be done with it before returning. The completion callback fires once the
//! sink has accepted the message.
//!
//! # Example
//!
//! ```ignore
//! use edgefirst_pcdwriter::writer::{PointCloudData, PointCloudWriter, ZenohSink};
//!
//! let session = zenoh::open(zenoh::Config::default()).await?;
//! let sink = ZenohSink::new(&session, "rt/lidar/points")?;
//! let mut writer = PointCloudWriter::new(sink);
//!
//! writer.write(
//!     &PointCloudData {
//!         points: &points,
//!         transform: Affine3::identity(),
//!         time: 12.5,
//!         frame: "lidar",
//!     },
//!     || println!("sent"),
//! )?;
//! ```

use crate::{
    encoder::PointCloudEncoder,
    error::Error,
    message::{POINTCLOUD2_SCHEMA, PointCloudMessage},
};
use nalgebra::{Affine3, Vector4};
use tracing::trace;
use zenoh::{
    Session, Wait as _,
    bytes::{Encoding, ZBytes},
    pubsub::Publisher,
    qos::{CongestionControl, Priority},
};

/// Completion callback handed to a sink.
pub type Completed = Box<dyn FnOnce() + Send>;

/// Destination for encoded point cloud messages.
pub trait MessageSink {
    /// Send a message and invoke `completed` once the send is accepted.
    ///
    /// `msg` borrows the encoder buffer and is only valid for the duration
    /// of this call; implementations copy or serialize it before returning.
    /// On error `completed` is dropped without being called.
    ///
    /// Sends are synchronous. From async code call it inside
    /// `tokio::task::block_in_place` on a multi-threaded runtime; it must not
    /// run on a current-thread runtime.
    fn send(&mut self, msg: &PointCloudMessage<'_>, completed: Completed) -> Result<(), Error>;
}

/// Sink publishing CDR-encoded `sensor_msgs/msg/PointCloud2` on a Zenoh topic.
///
/// Puts block with `wait()`; with `CongestionControl::Drop` they do not stall
/// on slow subscribers.
pub struct ZenohSink {
    publisher: Publisher<'static>,
    topic: String,
}

impl ZenohSink {
    /// Declare a publisher for `topic` on an open session.
    pub fn new(session: &Session, topic: impl Into<String>) -> Result<Self, Error> {
        let topic = topic.into();
        let publisher = session
            .declare_publisher(topic.clone())
            .priority(Priority::DataHigh)
            .congestion_control(CongestionControl::Drop)
            .wait()?;
        Ok(Self { publisher, topic })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl MessageSink for ZenohSink {
    fn send(&mut self, msg: &PointCloudMessage<'_>, completed: Completed) -> Result<(), Error> {
        let payload = ZBytes::from(msg.serialize()?);
        let encoding = Encoding::APPLICATION_CDR.with_schema(POINTCLOUD2_SCHEMA);
        self.publisher.put(payload).encoding(encoding).wait()?;
        trace!("{} message sent ({} points)", self.topic, msg.width);
        completed();
        Ok(())
    }
}

/// One frame of sensor output to write.
#[derive(Debug, Clone)]
pub struct PointCloudData<'a> {
    /// Sensor-local `(x, y, z, intensity)` points, zero vector for no return
    pub points: &'a [Vector4<f32>],
    /// Sensor-local to output frame transform
    pub transform: Affine3<f32>,
    /// Capture time in seconds
    pub time: f64,
    /// Output frame identifier
    pub frame: &'a str,
}

/// Encoder and sink for one topic.
pub struct PointCloudWriter<S> {
    encoder: PointCloudEncoder,
    sink: S,
}

impl<S: MessageSink> PointCloudWriter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            encoder: PointCloudEncoder::new(),
            sink,
        }
    }

    /// Encode `data` and send it, returning the number of points written.
    ///
    /// Sink errors are returned as-is; there is no retry and `completed` is
    /// not called in that case.
    pub fn write(
        &mut self,
        data: &PointCloudData<'_>,
        completed: impl FnOnce() + Send + 'static,
    ) -> Result<usize, Error> {
        let msg = self
            .encoder
            .encode(data.points, &data.transform, data.time, data.frame);
        let n_points = msg.len();
        self.sink.send(&msg, Box::new(completed))?;
        Ok(n_points)
    }

    pub fn encoder(&self) -> &PointCloudEncoder {
        &self.encoder
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
