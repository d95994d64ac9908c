// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

mod args;

use args::Args;
use clap::Parser as _;
use edgefirst_pcdwriter::{
    Error, PointCloudData, PointCloudWriter, ZenohSink,
    scan::SyntheticScan,
    time::{from_nanos, timestamp},
    transform,
};
use edgefirst_schemas::{
    builtin_interfaces::Time, geometry_msgs::TransformStamped, serde_cdr, std_msgs::Header,
};
use nalgebra::Affine3;
use std::time::Duration;
use tracing::{error, info, trace};
use tracing_subscriber::{Layer as _, layer::SubscriberExt as _, util::SubscriberInitExt as _};
use zenoh::{
    Session,
    bytes::{Encoding, ZBytes},
    qos::{CongestionControl, Priority},
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Args::parse();

    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(args.rust_log);

    #[cfg(feature = "tracy")]
    let tracy = args
        .tracy
        .then(|| tracing_tracy::TracyLayer::default().with_filter(args.rust_log));
    #[cfg(not(feature = "tracy"))]
    let tracy: Option<tracing_subscriber::layer::Identity> = {
        if args.tracy {
            eprintln!("--tracy requested but pcdwriter was built without the tracy feature");
        }
        None
    };

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(tracy)
        .init();

    if !(args.rate.is_finite() && args.rate > 0.0) {
        return Err(Error::Config(format!("invalid rate: {}", args.rate)));
    }

    let session = zenoh::open(zenoh::Config::from(args.clone())).await?;
    info!("opened zenoh session");

    spawn_tf_static(session.clone(), &args).await?;

    let sink = ZenohSink::new(&session, args.topic.clone())?;
    let mut writer = PointCloudWriter::new(sink);
    let mut scan = SyntheticScan::new(args.beams, args.columns, args.max_range, args.dropout);

    let (points_transform, frame_id) = match args.transform_points {
        true => (
            transform::from_tf(args.translation(), args.rotation()),
            args.base_frame_id.clone(),
        ),
        false => (Affine3::identity(), args.frame_id.clone()),
    };

    info!(
        "publishing {} points per frame at {} Hz on {}",
        scan.len(),
        args.rate,
        args.topic
    );

    let mut interval = tokio::time::interval(Duration::from_secs_f64(1.0 / args.rate));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        let now = timestamp()?;
        let frame = scan.frame();
        let data = PointCloudData {
            points: scan.next_frame(),
            transform: points_transform,
            time: now as f64 / 1e9,
            frame: &frame_id,
        };

        // The zenoh put blocks; keep it off the async worker.
        let result = tokio::task::block_in_place(|| {
            writer.write(&data, move || trace!("frame {} completed", frame))
        });
        match result {
            Ok(n_points) => trace!("frame {} wrote {} points", frame, n_points),
            Err(e) => error!("{} publish error: {}", args.topic, e),
        }
    }
}

async fn spawn_tf_static(session: Session, args: &Args) -> Result<(), Error> {
    let publisher = session
        .declare_publisher("rt/tf_static")
        .priority(Priority::Background)
        .congestion_control(CongestionControl::Drop)
        .await?;

    let stamp = timestamp().map(from_nanos).unwrap_or(Time { sec: 0, nanosec: 0 });
    let msg = TransformStamped {
        header: Header {
            frame_id: args.base_frame_id.clone(),
            stamp,
        },
        child_frame_id: args.frame_id.clone(),
        transform: transform::to_ros_transform(args.translation(), args.rotation()),
    };

    let msg = ZBytes::from(serde_cdr::serialize(&msg)?);
    let enc = Encoding::APPLICATION_CDR.with_schema("geometry_msgs/msg/TransformStamped");

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            match publisher.put(msg.clone()).encoding(enc.clone()).await {
                Ok(_) => trace!("publishing rt/tf_static"),
                Err(e) => error!("rt/tf_static publish error: {:?}", e),
            }
        }
    });

    Ok(())
}
