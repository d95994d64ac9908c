// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Integration tests for the PointCloud2 encoder.
//!
//! Frames come from the synthetic scan generator and a small deterministic
//! generator so the properties are checked on realistic sizes as well as on
//! hand-built edge cases.

use edgefirst_pcdwriter::{
    POINT_STEP, PointCloudEncoder,
    formats::{INTENSITY_OFFSET, quantize_intensity, read_position},
    scan::SyntheticScan,
    transform,
};
use edgefirst_schemas::{sensor_msgs::PointCloud2, serde_cdr};
use nalgebra::{Affine3, Point3, Vector4};

/// Deterministic frame with roughly one in `zero_every` points dropped.
fn frame(n_points: usize, zero_every: usize, seed: u32) -> Vec<Vector4<f32>> {
    (0..n_points)
        .map(|i| {
            if zero_every > 0 && (i + seed as usize) % zero_every == 0 {
                return Vector4::zeros();
            }
            let t = (i as f32 + seed as f32) * 0.37;
            Vector4::new(
                t.sin() * 20.0,
                t.cos() * 15.0,
                (t * 0.1) % 4.0 - 2.0,
                (i % 97) as f32 / 96.0,
            )
        })
        .collect()
}

fn non_zero(points: &[Vector4<f32>]) -> Vec<Vector4<f32>> {
    points
        .iter()
        .copied()
        .filter(|p| *p != Vector4::zeros())
        .collect()
}

fn assert_close(actual: Point3<f32>, expected: Point3<f32>) {
    let tolerance = 1e-4 * (1.0 + expected.coords.norm());
    assert!(
        (actual - expected).norm() <= tolerance,
        "{:?} != {:?}",
        actual,
        expected
    );
}

#[test]
fn test_valid_count_and_length() {
    let mut encoder = PointCloudEncoder::new();

    for (n_points, zero_every) in [(1, 0), (7, 3), (1000, 5), (4096, 2), (333, 1)] {
        let points = frame(n_points, zero_every, 11);
        let expected = non_zero(&points).len();

        let msg = encoder.encode(&points, &Affine3::identity(), 0.0, "lidar");
        assert_eq!(msg.width as usize, expected);
        assert_eq!(msg.data.len(), expected * POINT_STEP);
        assert_eq!(msg.row_step as usize, expected * POINT_STEP);
        assert!(msg.width as usize <= n_points);
        assert_eq!(encoder.capacity(), n_points * POINT_STEP);
    }
}

#[test]
fn test_positions_and_order() {
    let mut encoder = PointCloudEncoder::new();
    let tf = transform::from_tf([0.5, -1.0, 1.8], [0.0, 0.0, 0.38268343, 0.9238795]);
    let points = frame(2048, 4, 3);
    let kept = non_zero(&points);

    let msg = encoder.encode(&points, &tf, 0.0, "base_link");
    assert_eq!(msg.width as usize, kept.len());

    for (slot, point) in msg.data.chunks_exact(POINT_STEP).zip(&kept) {
        let expected = tf.transform_point(&Point3::new(point.x, point.y, point.z));
        assert_close(read_position(slot), expected);
        assert_eq!(slot[INTENSITY_OFFSET], quantize_intensity(point.w));
    }
}

#[test]
fn test_intensity_wraps_without_clamping() {
    let mut encoder = PointCloudEncoder::new();
    let points = [
        Vector4::new(1.0, 0.0, 0.0, 1.5),
        Vector4::new(1.0, 0.0, 0.0, -0.5),
        Vector4::new(1.0, 0.0, 0.0, 2.0),
        Vector4::new(1.0, 0.0, 0.0, 0.5),
    ];

    let msg = encoder.encode(&points, &Affine3::identity(), 0.0, "lidar");
    let intensities: Vec<u8> = msg
        .data
        .chunks_exact(POINT_STEP)
        .map(|slot| slot[INTENSITY_OFFSET])
        .collect();
    assert_eq!(intensities, [126, 129, 254, 127]);
}

#[test]
fn test_empty_and_all_zero() {
    let mut encoder = PointCloudEncoder::new();

    let msg = encoder.encode(&[], &Affine3::identity(), 0.0, "lidar");
    assert_eq!(msg.width, 0);
    assert!(msg.data.is_empty());

    let zeros = vec![Vector4::zeros(); 64];
    let msg = encoder.encode(&zeros, &Affine3::identity(), 0.0, "lidar");
    assert_eq!(msg.width, 0);
    assert!(msg.data.is_empty());
    assert!(msg.is_dense);
    // Capacity is still sized by the raw input.
    assert_eq!(encoder.capacity(), 64 * POINT_STEP);
}

#[test]
fn test_zero_sentinel_is_value_equality() {
    let mut encoder = PointCloudEncoder::new();
    let points = [
        Vector4::new(-0.0, 0.0, -0.0, -0.0),
        Vector4::new(f32::NAN, 0.0, 0.0, 0.0),
        Vector4::new(1.0, 0.0, 0.0, 0.0),
    ];

    // Signed zeros compare equal to zero; NaN compares equal to nothing.
    let msg = encoder.encode(&points, &Affine3::identity(), 0.0, "lidar");
    assert_eq!(msg.width, 2);
    assert_eq!(msg.data.len(), 2 * POINT_STEP);
    assert!(read_position(&msg.data[..POINT_STEP]).x.is_nan());
    assert_eq!(
        read_position(&msg.data[POINT_STEP..]),
        Point3::new(1.0, 0.0, 0.0)
    );
}

#[test]
fn test_buffer_reuse_across_frames() {
    let mut encoder = PointCloudEncoder::new();
    let mut scan = SyntheticScan::new(16, 256, 40.0, 15);

    let mut widths = Vec::new();
    for _ in 0..10 {
        let msg = encoder.encode(scan.next_frame(), &Affine3::identity(), 0.0, "lidar");
        widths.push(msg.width);
    }

    assert_eq!(encoder.reallocations(), 1);
    assert_eq!(encoder.capacity(), 16 * 256 * POINT_STEP);
    // Dropouts vary frame to frame while the buffer stays put.
    assert!(widths.iter().any(|w| *w != widths[0]));
}

#[test]
fn test_reallocation_on_length_change() {
    let mut encoder = PointCloudEncoder::new();

    encoder.encode(&frame(100, 0, 0), &Affine3::identity(), 0.0, "lidar");
    encoder.encode(&frame(100, 0, 1), &Affine3::identity(), 0.0, "lidar");
    assert_eq!(encoder.reallocations(), 1);

    encoder.encode(&frame(101, 0, 0), &Affine3::identity(), 0.0, "lidar");
    assert_eq!(encoder.reallocations(), 2);

    encoder.encode(&frame(100, 0, 0), &Affine3::identity(), 0.0, "lidar");
    assert_eq!(encoder.reallocations(), 3);
    assert_eq!(encoder.capacity(), 100 * POINT_STEP);
}

#[test]
fn test_stale_padding_does_not_affect_fields() {
    let mut encoder = PointCloudEncoder::new();
    let first = frame(32, 0, 5);
    let mut second = frame(32, 0, 9);
    second[0] = Vector4::zeros();

    encoder.encode(&first, &Affine3::identity(), 0.0, "lidar");
    let msg = encoder.encode(&second, &Affine3::identity(), 0.0, "lidar");

    // Only the declared position and intensity bytes are checked; padding and
    // the reserved timestamp may carry bytes from the previous frame.
    for (slot, point) in msg.data.chunks_exact(POINT_STEP).zip(&second[1..]) {
        assert_eq!(read_position(slot), Point3::new(point.x, point.y, point.z));
        assert_eq!(slot[INTENSITY_OFFSET], quantize_intensity(point.w));
    }
}

#[test]
fn test_fields_identical_across_calls() {
    let mut encoder = PointCloudEncoder::new();
    let mut names = Vec::new();

    for n_points in [0, 10, 20] {
        let msg = encoder.encode(&frame(n_points, 2, 0), &Affine3::identity(), 0.0, "lidar");
        let fields: Vec<(String, u32, u8, u32)> = msg
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.offset, f.datatype, f.count))
            .collect();
        names.push(fields);
    }

    assert_eq!(names[0], names[1]);
    assert_eq!(names[1], names[2]);
    assert_eq!(
        names[0].iter().map(|f| f.0.as_str()).collect::<Vec<_>>(),
        ["x", "y", "z", "intensity", "timestamp"]
    );
}

#[test]
fn test_wire_message() {
    let mut encoder = PointCloudEncoder::new();
    let points = frame(50, 7, 2);
    let kept = non_zero(&points).len();

    let msg = encoder.encode(&points, &Affine3::identity(), 1712.125, "lidar");
    let bytes = msg.serialize().unwrap();
    let decoded: PointCloud2 = serde_cdr::deserialize(&bytes).unwrap();

    assert_eq!(decoded.header.frame_id, "lidar");
    assert_eq!(decoded.header.stamp.sec, 1712);
    assert_eq!(decoded.header.stamp.nanosec, 125_000_000);
    assert_eq!(decoded.height, 1);
    assert_eq!(decoded.width as usize, kept);
    assert_eq!(decoded.point_step, 32);
    assert_eq!(decoded.row_step as usize, kept * 32);
    assert!(!decoded.is_bigendian);
    assert!(decoded.is_dense);
    assert_eq!(decoded.fields.len(), 5);
    assert_eq!(decoded.data.as_slice(), msg.data);
}
