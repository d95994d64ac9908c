// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Sensor-to-output frame transforms.

use edgefirst_schemas::geometry_msgs;
use nalgebra::{Affine3, Isometry3, Quaternion, Translation3, UnitQuaternion};

/// Build an affine transform from a translation and an `(x, y, z, w)`
/// rotation quaternion, the same convention as `--tf-vec`/`--tf-quat`.
///
/// The quaternion is normalized, so `0 0 0 1` and `0 0 0 2` both mean
/// identity.
pub fn from_tf(translation: [f64; 3], rotation: [f64; 4]) -> Affine3<f32> {
    let [tx, ty, tz] = translation;
    let [qx, qy, qz, qw] = rotation;
    let isometry = Isometry3::from_parts(
        Translation3::new(tx as f32, ty as f32, tz as f32),
        UnitQuaternion::from_quaternion(Quaternion::new(
            qw as f32, qx as f32, qy as f32, qz as f32,
        )),
    );
    Affine3::from_matrix_unchecked(isometry.to_homogeneous())
}

/// The `geometry_msgs/Transform` matching [`from_tf`].
pub fn to_ros_transform(translation: [f64; 3], rotation: [f64; 4]) -> geometry_msgs::Transform {
    geometry_msgs::Transform {
        translation: geometry_msgs::Vector3 {
            x: translation[0],
            y: translation[1],
            z: translation[2],
        },
        rotation: geometry_msgs::Quaternion {
            x: rotation[0],
            y: rotation[1],
            z: rotation[2],
            w: rotation[3],
        },
    }
}
