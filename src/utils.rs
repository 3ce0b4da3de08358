//! Shared angle helpers

use std::f64::consts::PI;

/// Two times PI (full circle in radians)
pub const TWO_PI: f64 = 2.0 * PI;

/// Remove whole turns from a heading (radians)
///
/// Uses truncating division, so the result keeps the sign of the input and
/// lies in (-2π, 2π). Headings already in [0, 2π) are returned unchanged.
#[inline]
pub fn normalize_heading(heading_rad: f64) -> f64 {
    heading_rad - (heading_rad / TWO_PI).trunc() * TWO_PI
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if d >= 360.0 { 0.0 } else { d }
}
