// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

use clap::Parser;
use serde_json::json;
use tracing::level_filters::LevelFilter;
use zenoh::config::{Config, WhatAmI};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Point cloud topic
    #[arg(long, env, default_value = "rt/lidar/points")]
    pub topic: String,

    /// Frames published per second
    #[arg(long, env, default_value = "10")]
    pub rate: f64,

    /// Simulated beams (rows) per frame
    #[arg(long, env, default_value = "32")]
    pub beams: usize,

    /// Simulated azimuth columns per frame
    #[arg(long, env, default_value = "1024")]
    pub columns: usize,

    /// Maximum simulated range in meters
    #[arg(long, env, default_value = "50")]
    pub max_range: f32,

    /// Percentage of dropped returns per frame
    #[arg(long, env, default_value = "10",
          value_parser = clap::value_parser!(u32).range(0..=100))]
    pub dropout: u32,

    /// Frame transformation vector from the base_link
    #[arg(
        long,
        env,
        default_value = "0 0 0",
        value_delimiter = ' ',
        num_args = 3
    )]
    pub tf_vec: Vec<f64>,

    /// Frame transformation quaternion from the base_link
    #[arg(
        long,
        env,
        default_value = "0 0 0 1",
        value_delimiter = ' ',
        num_args = 4
    )]
    pub tf_quat: Vec<f64>,

    /// Publish points already transformed into the base frame instead of the
    /// sensor frame.
    #[arg(long, env)]
    pub transform_points: bool,

    /// The name of the base frame
    #[arg(long, env, default_value = "base_link")]
    pub base_frame_id: String,

    /// The name of the lidar frame
    #[arg(long, env, default_value = "lidar")]
    pub frame_id: String,

    /// Application log level
    #[arg(long, env, default_value = "info")]
    pub rust_log: LevelFilter,

    /// Enable Tracy profiler broadcast
    #[arg(long, env)]
    pub tracy: bool,

    /// zenoh connection mode
    #[arg(long, env, default_value = "peer")]
    mode: WhatAmI,

    /// connect to zenoh endpoints
    #[arg(long, env)]
    connect: Vec<String>,

    /// listen to zenoh endpoints
    #[arg(long, env)]
    listen: Vec<String>,

    /// disable zenoh multicast scouting
    #[arg(long, env)]
    no_multicast_scouting: bool,
}

impl Args {
    pub fn translation(&self) -> [f64; 3] {
        [self.tf_vec[0], self.tf_vec[1], self.tf_vec[2]]
    }

    pub fn rotation(&self) -> [f64; 4] {
        [self.tf_quat[0], self.tf_quat[1], self.tf_quat[2], self.tf_quat[3]]
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let mut config = Config::default();

        config
            .insert_json5("mode", &json!(args.mode).to_string())
            .unwrap();

        if !args.connect.is_empty() {
            config
                .insert_json5("connect/endpoints", &json!(args.connect).to_string())
                .unwrap();
        }

        if !args.listen.is_empty() {
            config
                .insert_json5("listen/endpoints", &json!(args.listen).to_string())
                .unwrap();
        }

        if args.no_multicast_scouting {
            config
                .insert_json5("scouting/multicast/enabled", &json!(false).to_string())
                .unwrap();
        }

        config
    }
}
