//! The finished clip and the configuration that shapes it.

use glam::{Quat, Vec3};

///
/// Caller-supplied import configuration.
///
/// The interactive settings dialog of the workflow this replaces collapses
/// into this plain value. Whether to prompt again per file is the
/// orchestrator's business, not this crate's.
///
#[derive(Debug, Clone)]
pub struct ImportSettings {
  /// Skeleton the host resolves default-pose context against. Carried for
  /// the host collaborator; the resampler itself never reads it.
  pub skeleton: Option<String>,

  /// Scales the resolved duration and resample rate before assembly.
  pub retime_factor: f32,
}

impl Default for ImportSettings {
  fn default() -> Self {
    ImportSettings {
      skeleton: None,
      retime_factor: 1.0,
    }
  }
}

///
/// One bone's uniformly resampled channels.
///
/// Channel lengths are independent. A channel whose source family never
/// mentioned this bone stays empty, with one exception: a track touched only
/// by the position or scale pass gets a single synthetic identity rotation
/// (see the resampler).
///
#[derive(Debug, Clone, Default)]
pub struct Track {
  /// Canonical bone identifier, unique within the clip.
  pub bone: String,
  pub rotations: Vec<Quat>,
  pub positions: Vec<Vec3>,
  pub scales: Vec<Vec3>,
}

impl Track {
  pub(crate) fn new(bone: &str) -> Self {
    Track {
      bone: bone.to_owned(),
      ..Track::default()
    }
  }
}

///
/// The final uniformly-sampled multi-bone animation.
///
/// Handed to the host's asset-persistence collaborator, which owns it from
/// that point.
///
#[derive(Debug, Clone)]
pub struct Clip {
  /// Fixed time step every channel was resampled at. Always positive.
  pub sample_interval: f32,

  /// Resolved source duration scaled by the retime factor. Always positive.
  pub duration: f32,

  /// Longest channel length over every track.
  pub frame_count: usize,

  /// Capture rate of the source curves, `1 / sample_interval`.
  pub source_frame_rate: f32,

  /// Playback rate the host should resample at: source rate times the
  /// retime factor. The target asset format distinguishes the two.
  pub resample_frame_rate: f32,

  /// Per-bone tracks, ordered by first encounter across the three families.
  pub tracks: Vec<Track>,
}
