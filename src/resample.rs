//! Reconciling three independently-timed curve families onto one time base.
//!
//! Two derived quantities govern everything here: the resample interval (the
//! smallest positive gap between consecutive keys of any single curve) and
//! the duration (the latest key time anywhere). Every channel is then walked
//! at `0, Δ, 2Δ, …` with the previous sample carried forward as the eval
//! fallback, so sparse curves hold their last known value instead of
//! snapping back to a hard default.

use std::collections::hash_map::Entry;

use ahash::AHashMap;
use glam::{Quat, Vec3};
use itertools::Itertools;
use log::{error, warn};

use crate::clip::{Clip, ImportSettings, Track};
use crate::curve::{CurveValue, KeyframeCurve};
use crate::curve_set::{CurveFamily, CurveSet};
use crate::error::ImportError;

/// "Basically zero" tolerance for durations and the resample stop condition.
pub(crate) const EPSILON: f32 = 1.0e-4;

/// Sentinel the interval scan starts from. Survives only if no curve
/// anywhere has two keys on distinct timestamps.
const INTERVAL_SENTINEL: f32 = 1.0e7;

/// The common time base every curve gets resampled onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTiming {
  /// Minimum strictly-positive delta between consecutive keys observed
  /// within any single curve. Always positive.
  pub sample_interval: f32,

  /// Maximum key time over every curve of every family.
  pub duration: f32,
}

///
/// Scan every keyframe of every family and derive the common time base.
///
/// A duration at or below epsilon is the one hard failure of the pipeline:
/// there is no animation to emit. Keys all stacked on a single timestamp are
/// soft: the interval keeps its sentinel, a warning is logged, and every
/// channel later resamples to exactly one frame.
///
pub fn resolve_timing(curves: &CurveSet) -> Result<ResolvedTiming, ImportError> {
  let mut interval = INTERVAL_SENTINEL;
  let mut duration = 0.0_f32;

  scan_family(&curves.rotations, &mut interval, &mut duration);
  scan_family(&curves.positions, &mut interval, &mut duration);
  scan_family(&curves.scales, &mut interval, &mut duration);

  if interval >= INTERVAL_SENTINEL {
    warn!("unity-anim: no positive key spacing in any curve; channels will resample to a single frame.");
  }

  if duration <= EPSILON {
    error!("unity-anim: animation duration could not be deduced, nothing to resample.");
    return Err(ImportError::DegenerateDuration { max_time: duration });
  }

  Ok(ResolvedTiming {
    sample_interval: interval,
    duration,
  })
}

fn scan_family<T: CurveValue>(family: &CurveFamily<T>, interval: &mut f32, duration: &mut f32) {
  for (_bone, curve) in family.iter() {
    for key in curve.keys() {
      *duration = duration.max(key.time);
    }
    // Deltas only count between consecutive keys of the same curve, never
    // across curves.
    for (a, b) in curve.keys().iter().tuple_windows() {
      let delta = b.time - a.time;
      if delta > 0.0 && delta < *interval {
        *interval = delta;
      }
    }
  }
}

/// Per-bone tracks in first-seen order across the three family passes.
#[derive(Default)]
struct TrackBuilder {
  order: Vec<String>,
  tracks: AHashMap<String, Track>,
}

impl TrackBuilder {
  fn track_mut(&mut self, bone: &str) -> &mut Track {
    match self.tracks.entry(bone.to_owned()) {
      Entry::Occupied(slot) => slot.into_mut(),
      Entry::Vacant(slot) => {
        self.order.push(bone.to_owned());
        slot.insert(Track::new(bone))
      }
    }
  }

  fn into_tracks(mut self) -> Vec<Track> {
    let order = std::mem::take(&mut self.order);
    order
      .iter()
      .filter_map(|bone| self.tracks.remove(bone))
      .collect()
  }
}

///
/// Resample every curve onto the resolved time base and assemble the clip.
///
/// Families run in rotation, position, scale order; a bone's track is
/// created the first time any family mentions it, and that order is the
/// final track order.
///
pub fn build_clip(curves: &CurveSet, timing: ResolvedTiming, settings: &ImportSettings) -> Clip {
  let mut builder = TrackBuilder::default();
  let mut frame_count = 0_usize;

  for (bone, curve) in curves.rotations.iter() {
    let track = builder.track_mut(bone);
    track.rotations = resample_channel(curve, timing, Quat::IDENTITY);
    frame_count = frame_count.max(track.rotations.len());
  }

  // A track first touched by the position or scale pass still needs a valid
  // rotation channel for the runtime, hence the synthetic identity key. The
  // same courtesy is NOT extended to missing position or scale channels;
  // faithfully reproduced from the importer this replaces.
  for (bone, curve) in curves.positions.iter() {
    let track = builder.track_mut(bone);
    if track.rotations.is_empty() {
      track.rotations.push(Quat::IDENTITY);
    }
    track.positions = resample_channel(curve, timing, Vec3::ZERO);
    frame_count = frame_count.max(track.positions.len());
  }

  for (bone, curve) in curves.scales.iter() {
    let track = builder.track_mut(bone);
    if track.rotations.is_empty() {
      track.rotations.push(Quat::IDENTITY);
    }
    track.scales = resample_channel(curve, timing, Vec3::ONE);
    frame_count = frame_count.max(track.scales.len());
  }

  let source_frame_rate = 1.0 / timing.sample_interval;

  Clip {
    sample_interval: timing.sample_interval,
    duration: timing.duration * settings.retime_factor,
    frame_count,
    source_frame_rate,
    resample_frame_rate: source_frame_rate * settings.retime_factor,
    tracks: builder.into_tracks(),
  }
}

/// Walk one curve at `0, Δ, 2Δ, …` up to `duration + ε`, carrying the
/// previous sample forward as the fallback for uncovered queries.
fn resample_channel<T: CurveValue>(
  curve: &KeyframeCurve<T>,
  timing: ResolvedTiming,
  initial: T,
) -> Vec<T> {
  let mut samples = Vec::new();
  let mut last = initial;
  let mut time = 0.0_f32;
  while time < timing.duration + EPSILON {
    let value = curve.eval(time, last);
    samples.push(value);
    last = value;
    time += timing.sample_interval;
  }
  samples
}
