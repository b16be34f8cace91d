//! Irregular keyframe curves with derived tangents and Hermite evaluation.
//!
//! A curve owns its keys in ascending time order. Tangents are never stored:
//! they are recomputed from neighboring keys on demand, Catmull-Rom style, so
//! a curve is fully described by its (time, value) samples alone.

use glam::{Quat, Vec3, Vec4};

/// One authored sample in a source curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<T> {
  pub time: f32,
  pub value: T,
}

///
/// The operations curve math needs from a sample type.
///
/// A tangent shares its sample's representation (one slope per component),
/// so the same type serves both roles.
///
pub trait CurveValue: Copy {
  /// Secant slope from one value to another over `dt` seconds.
  fn slope(from: Self, to: Self, dt: f32) -> Self;

  /// Component-wise average of two slopes.
  fn average(a: Self, b: Self) -> Self;

  /// The slope of a degenerate segment (two keys on one timestamp).
  fn zero_slope() -> Self;

  /// Cubic Hermite blend from `p0` to `p1` with tangents `m0` and `m1`, at
  /// normalized position `t` of a segment `dt` seconds long.
  fn hermite(p0: Self, m0: Self, p1: Self, m1: Self, t: f32, dt: f32) -> Self;

  /// Clean up an interpolated value before it leaves the curve.
  fn renormalize(self) -> Self;
}

/// Standard Hermite basis, shared by every `CurveValue` impl.
fn hermite_basis(t: f32) -> (f32, f32, f32, f32) {
  let t2 = t * t;
  let t3 = t2 * t;
  let s2 = -2.0 * t3 + 3.0 * t2;
  let s3 = t3 - t2;
  let s0 = 1.0 - s2;
  let s1 = s3 - t2 + t;
  (s0, s1, s2, s3)
}

impl CurveValue for Vec3 {
  fn slope(from: Self, to: Self, dt: f32) -> Self {
    (to - from) / dt
  }

  fn average(a: Self, b: Self) -> Self {
    (a + b) * 0.5
  }

  fn zero_slope() -> Self {
    Vec3::ZERO
  }

  fn hermite(p0: Self, m0: Self, p1: Self, m1: Self, t: f32, dt: f32) -> Self {
    let (s0, s1, s2, s3) = hermite_basis(t);
    p0 * s0 + m0 * dt * s1 + p1 * s2 + m1 * dt * s3
  }

  fn renormalize(self) -> Self {
    self
  }
}

///
/// Interpolates component-wise on raw quaternion coordinates, deliberately
/// not slerp: a segment spanning more than a half-turn can run through the
/// long arc. That matches the importer this crate reproduces; correcting it
/// would change output for existing inputs.
///
impl CurveValue for Quat {
  fn slope(from: Self, to: Self, dt: f32) -> Self {
    Quat::from_vec4((Vec4::from(to) - Vec4::from(from)) / dt)
  }

  fn average(a: Self, b: Self) -> Self {
    Quat::from_vec4((Vec4::from(a) + Vec4::from(b)) * 0.5)
  }

  fn zero_slope() -> Self {
    Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)
  }

  fn hermite(p0: Self, m0: Self, p1: Self, m1: Self, t: f32, dt: f32) -> Self {
    let (s0, s1, s2, s3) = hermite_basis(t);
    let blended = Vec4::from(p0) * s0
      + Vec4::from(m0) * dt * s1
      + Vec4::from(p1) * s2
      + Vec4::from(m1) * dt * s3;
    Quat::from_vec4(blended)
  }

  fn renormalize(self) -> Self {
    // Hermite over raw components does not preserve unit length.
    Vec4::from(self)
      .try_normalize()
      .map(Quat::from_vec4)
      .unwrap_or(Quat::IDENTITY)
  }
}

///
/// An ordered set of keyframes for one bone and channel.
///
#[derive(Debug, Clone)]
pub struct KeyframeCurve<T> {
  keys: Vec<Keyframe<T>>,
}

impl<T> Default for KeyframeCurve<T> {
  fn default() -> Self {
    KeyframeCurve { keys: Vec::new() }
  }
}

impl<T: CurveValue> KeyframeCurve<T> {
  /// Insert a key, keeping ascending time order. Keys sharing a timestamp
  /// keep their insertion order.
  pub fn push_key(&mut self, time: f32, value: T) {
    let at = self.keys.partition_point(|key| key.time <= time);
    self.keys.insert(at, Keyframe { time, value });
  }

  /// The keys, ascending by time.
  pub fn keys(&self) -> &[Keyframe<T>] {
    &self.keys
  }

  pub fn len(&self) -> usize {
    self.keys.len()
  }

  pub fn is_empty(&self) -> bool {
    self.keys.is_empty()
  }

  ///
  /// Evaluate the curve at `time`.
  ///
  /// * Zero keys: `fallback`, untouched.
  /// * One key: that key's value, at any query time.
  /// * Outside the covered range: the first or last key's value.
  /// * Otherwise: cubic Hermite over the bracketing pair, using each key's
  ///   derived auto-tangent, renormalized on the way out.
  ///
  pub fn eval(&self, time: f32, fallback: T) -> T {
    match self.keys.len() {
      0 => return fallback,
      1 => return self.keys[0].value,
      _ => {}
    }

    let last = self.keys.len() - 1;
    // The lower clamp is strict so a query landing exactly on a stacked
    // timestamp resolves through the upper clamp to the latest key.
    if time < self.keys[0].time {
      return self.keys[0].value;
    }
    if time >= self.keys[last].time {
      return self.keys[last].value;
    }

    // First key strictly past `time`; the segment starts one key earlier.
    let next = self.keys.partition_point(|key| key.time <= time);
    let prev = next - 1;

    let k0 = self.keys[prev];
    let k1 = self.keys[next];
    let dt = k1.time - k0.time;
    let t = if dt > 0.0 { (time - k0.time) / dt } else { 0.0 };

    let m0 = self.tangent_at(prev);
    let m1 = self.tangent_at(next);
    T::hermite(k0.value, m0, k1.value, m1, t, dt).renormalize()
  }

  /// Derived auto-tangent at key `index`: interior keys average their
  /// incoming and outgoing secant slopes, endpoints take the single adjacent
  /// slope. Neighbors on the same timestamp contribute a zero slope.
  fn tangent_at(&self, index: usize) -> T {
    let incoming = (index > 0).then(|| Self::secant(&self.keys[index - 1], &self.keys[index]));
    let outgoing =
      (index + 1 < self.keys.len()).then(|| Self::secant(&self.keys[index], &self.keys[index + 1]));

    match (incoming, outgoing) {
      (Some(a), Some(b)) => T::average(a, b),
      (Some(m), None) | (None, Some(m)) => m,
      (None, None) => T::zero_slope(),
    }
  }

  fn secant(from: &Keyframe<T>, to: &Keyframe<T>) -> T {
    let dt = to.time - from.time;
    if dt > 0.0 {
      T::slope(from.value, to.value, dt)
    } else {
      T::zero_slope()
    }
  }
}
