//! Tilt estimation from a single accelerometer sample.
//!
//! With the device at rest the accelerometer only sees gravity, so the
//! angle of each horizontal axis against the plane formed by the other
//! two is the tilt around it:
//!
//! ```text
//! angle_x = atan2(x, sqrt(y² + z²))
//! angle_y = atan2(y, sqrt(x² + z²))
//! ```
//!
//! Each angle in [-90°, 90°] maps linearly onto an integer scale in
//! [-12, 12] - the indicator's pixel throw from the display center.

use crate::config::{MAX_SCALE, MAX_TILT_DEG};

/// One raw accelerometer reading (g).
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Tilt angles and indicator scales derived from one [`Vector3`].
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OrientationSample {
    /// Tilt around the Y axis, positive towards +X (degrees, -90..=90).
    pub angle_x: f32,
    /// Tilt around the X axis, positive towards +Y (degrees, -90..=90).
    pub angle_y: f32,
    /// `angle_x` scaled to -12..=12.
    pub scale_x: i8,
    /// `angle_y` scaled to -12..=12.
    pub scale_y: i8,
}

/// Convert a raw acceleration vector into tilt angles and scales.
///
/// Pure and total for finite input; an all-zero vector is level.
pub fn estimate(v: Vector3) -> OrientationSample {
    let angle_x = tilt_deg(v.x, v.y, v.z);
    let angle_y = tilt_deg(v.y, v.x, v.z);
    OrientationSample {
        angle_x,
        angle_y,
        scale_x: angle_to_scale(angle_x),
        scale_y: angle_to_scale(angle_y),
    }
}

fn tilt_deg(axis: f32, a: f32, b: f32) -> f32 {
    let rest = libm::sqrtf(a * a + b * b);
    if axis == 0.0 && rest == 0.0 {
        return 0.0;
    }
    libm::atan2f(axis, rest).to_degrees()
}

/// Map an angle onto the indicator scale, truncating toward zero.
pub fn angle_to_scale(angle_deg: f32) -> i8 {
    let max = MAX_SCALE as f32;
    let mut scaled = angle_deg * max / MAX_TILT_DEG;

    // atan2 lands a hair below exact steps (45° → 5.9999995); snap those
    // so truncation does not lose a whole pixel.
    let nearest = libm::roundf(scaled);
    if libm::fabsf(scaled - nearest) < 1e-4 {
        scaled = nearest;
    }

    // `as` truncates toward zero and maps NaN to 0.
    (scaled.clamp(-max, max) as i32) as i8
}
