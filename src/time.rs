// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Au-Zone Technologies. All Rights Reserved.

//! Header timestamp helpers.

use crate::error::Error;
use edgefirst_schemas::builtin_interfaces::Time;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Convert a time in seconds to a ROS `builtin_interfaces/Time`.
///
/// `sec` holds the floor of the value and `nanosec` the remainder rounded to
/// the nearest nanosecond, so `nanosec` is always below one second. Values
/// outside the `i32` second range saturate; NaN and infinities map to zero.
pub fn to_ros_time(seconds: f64) -> Time {
    if !seconds.is_finite() {
        return Time { sec: 0, nanosec: 0 };
    }

    let whole = seconds.floor();
    let mut sec = whole.clamp(i32::MIN as f64, i32::MAX as f64) as i32;
    let mut nanosec = ((seconds - whole) * NANOS_PER_SEC as f64).round() as u32;
    if nanosec as u64 >= NANOS_PER_SEC {
        if sec == i32::MAX {
            nanosec = (NANOS_PER_SEC - 1) as u32;
        } else {
            sec += 1;
            nanosec -= NANOS_PER_SEC as u32;
        }
    }

    Time { sec, nanosec }
}

/// Convert a nanosecond count to a ROS `builtin_interfaces/Time`.
pub fn from_nanos(nanos: u64) -> Time {
    Time {
        sec: (nanos / NANOS_PER_SEC).min(i32::MAX as u64) as i32,
        nanosec: (nanos % NANOS_PER_SEC) as u32,
    }
}

/// Get current timestamp in nanoseconds.
///
/// On Linux, uses `CLOCK_MONOTONIC_RAW` for best accuracy.
/// On other platforms, falls back to `SystemTime`.
#[cfg(target_os = "linux")]
pub fn timestamp() -> Result<u64, Error> {
    let mut tp = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    let err = unsafe { libc::clock_gettime(libc::CLOCK_MONOTONIC_RAW, &mut tp) };
    if err != 0 {
        return Err(std::io::Error::last_os_error().into());
    }

    Ok(tp.tv_sec as u64 * NANOS_PER_SEC + tp.tv_nsec as u64)
}

#[cfg(not(target_os = "linux"))]
pub fn timestamp() -> Result<u64, Error> {
    let now = std::time::SystemTime::now();
    let duration = now.duration_since(std::time::UNIX_EPOCH)?;
    Ok(duration.as_nanos() as u64)
}
