//! Unity convention to target convention, applied once per authored sample.
//!
//! The two conventions disagree on axis sign and unit scale. Every sample is
//! converted exactly once, at parse time; running any of these twice
//! double-converts, so the parser is the only caller.

use glam::{Quat, Vec3, Vec4};

/// Unit scale between the two conventions (metres to centimetres).
pub const UNIT_SCALE: f32 = 100.0;

/// Flip a rotation into the target convention and renormalize.
/// Degenerate (zero-length) input falls back to identity.
pub fn convert_rotation(q: Quat) -> Quat {
  let flipped = Vec4::new(-q.x, -q.y, q.z, q.w);
  flipped
    .try_normalize()
    .map(Quat::from_vec4)
    .unwrap_or(Quat::IDENTITY)
}

/// Flip and rescale a position into the target convention.
pub fn convert_position(v: Vec3) -> Vec3 {
  Vec3::new(-v.x * UNIT_SCALE, -v.y * UNIT_SCALE, v.z * UNIT_SCALE)
}

/// Scale is convention-agnostic and passes through unchanged.
pub fn convert_scale(v: Vec3) -> Vec3 {
  v
}

#[cfg(test)]
mod tests {
  use super::*;
  use float_cmp::approx_eq;

  #[test]
  fn rotation_flips_x_and_y() {
    let converted = convert_rotation(Quat::from_xyzw(1.0, 0.0, 0.0, 0.0));
    assert!(approx_eq!(f32, converted.x, -1.0, epsilon = 1e-6));
    assert!(approx_eq!(f32, converted.y, 0.0, epsilon = 1e-6));
    assert!(approx_eq!(f32, converted.z, 0.0, epsilon = 1e-6));
    assert!(approx_eq!(f32, converted.w, 0.0, epsilon = 1e-6));
  }

  #[test]
  fn rotation_is_renormalized() {
    // Authored data is not always unit length.
    let converted = convert_rotation(Quat::from_xyzw(2.0, 0.0, 0.0, 0.0));
    assert!(approx_eq!(f32, converted.length(), 1.0, epsilon = 1e-6));
    assert!(approx_eq!(f32, converted.x, -1.0, epsilon = 1e-6));
  }

  #[test]
  fn zero_length_rotation_falls_back_to_identity() {
    // Nothing sensible to renormalize; identity is the safe answer.
    let converted = convert_rotation(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0));
    assert_eq!(converted, Quat::IDENTITY);
  }

  #[test]
  fn position_flips_and_rescales() {
    let converted = convert_position(Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(converted, Vec3::new(-100.0, -200.0, 300.0));
  }

  #[test]
  fn scale_passes_through() {
    let scale = Vec3::new(1.0, 0.5, 2.0);
    assert_eq!(convert_scale(scale), scale);
  }
}
