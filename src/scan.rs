// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Deterministic synthetic spinning-LiDAR scan.
//!
//! Generates `beams * columns` points per frame, sensor-local, with a
//! configurable share of dropped returns encoded as the all-zero vector. The
//! point count is fixed per generator so downstream encoders keep reusing
//! their buffers frame after frame.

use nalgebra::Vector4;
use std::f32::consts::TAU;

#[derive(Debug, Clone)]
pub struct SyntheticScan {
    beams: usize,
    columns: usize,
    max_range: f32,
    vertical_fov: f32,
    dropout_percent: u32,
    frame: u64,
    points: Vec<Vector4<f32>>,
}

impl SyntheticScan {
    /// Create a scan of `beams` rows by `columns` azimuth steps.
    ///
    /// # Arguments
    ///
    /// * `max_range` - Furthest simulated return in meters
    /// * `dropout_percent` - Share of returns replaced by the zero sentinel
    pub fn new(beams: usize, columns: usize, max_range: f32, dropout_percent: u32) -> Self {
        Self {
            beams,
            columns,
            max_range,
            vertical_fov: 45f32.to_radians(),
            dropout_percent: dropout_percent.min(100),
            frame: 0,
            points: vec![Vector4::zeros(); beams * columns],
        }
    }

    /// Points per frame, dropped returns included.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the next frame to be generated.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Generate the next frame into the internal buffer.
    pub fn next_frame(&mut self) -> &[Vector4<f32>] {
        let phase = (self.frame % 360) as f32 * TAU / 360.0;

        for beam in 0..self.beams {
            let elevation = if self.beams > 1 {
                self.vertical_fov * (beam as f32 / (self.beams - 1) as f32 - 0.5)
            } else {
                0.0
            };

            for column in 0..self.columns {
                let index = beam * self.columns + column;
                if self.dropped(index) {
                    self.points[index] = Vector4::zeros();
                    continue;
                }

                let azimuth = TAU * column as f32 / self.columns as f32;
                // Gently varying walls so successive frames differ.
                let range = self.max_range * (0.55 + 0.4 * (3.0 * azimuth + phase).sin().abs());
                let intensity = 1.0 - range / self.max_range;

                self.points[index] = Vector4::new(
                    range * elevation.cos() * azimuth.cos(),
                    range * elevation.cos() * azimuth.sin(),
                    range * elevation.sin(),
                    intensity,
                );
            }
        }

        self.frame += 1;
        &self.points
    }

    fn dropped(&self, index: usize) -> bool {
        if self.dropout_percent == 0 {
            return false;
        }
        (mix(index as u64 ^ self.frame.rotate_left(32)) % 100) < self.dropout_percent as u64
    }
}

// splitmix64 finalizer
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
