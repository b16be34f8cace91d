//! The validated shape of a Unity `.anim` document.
//!
//! Text parsing is not this crate's job. The host hands us a generic node
//! tree (a [`serde_json::Value`]) and we check it against the field layout
//! Unity writes: an `AnimationClip` object holding `m_RotationCurves`,
//! `m_PositionCurves` and `m_ScaleCurves`.
//!
//! The distinction that matters here: a family Unity left out entirely
//! deserializes to an empty list and contributes nothing, while a family of
//! the wrong shape is a [`MalformedDocument`](crate::ImportError) error.

use serde::Deserialize;

use crate::error::ImportError;

/// Root of a `.anim` document.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimDocument {
  /// The one clip a `.anim` file carries.
  #[serde(rename = "AnimationClip")]
  pub animation_clip: ClipDocument,
}

/// The three curve families of a clip.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClipDocument {
  /// Per-bone rotation curves, 4-component values.
  #[serde(rename = "m_RotationCurves", default)]
  pub rotation_curves: Vec<CurveEntry>,

  /// Per-bone position curves, 3-component values.
  #[serde(rename = "m_PositionCurves", default)]
  pub position_curves: Vec<CurveEntry>,

  /// Per-bone scale curves, 3-component values.
  #[serde(rename = "m_ScaleCurves", default)]
  pub scale_curves: Vec<CurveEntry>,
}

/// One bone's curve within a family.
#[derive(Debug, Clone, Deserialize)]
pub struct CurveEntry {
  /// Hierarchical actor path, e.g. `"Root/Spine/actor:Hand_L"`.
  pub path: String,

  /// The authored keyframes.
  #[serde(default)]
  pub curve: CurveData,
}

/// The key list wrapper Unity nests below each entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurveData {
  #[serde(rename = "m_Curve", default)]
  pub keys: Vec<CurvePoint>,
}

/// An authored keyframe.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CurvePoint {
  pub time: f32,
  pub value: Components,
}

/// Raw sample components. Rotations carry `w`; vectors leave it defaulted.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Components {
  #[serde(default)]
  pub x: f32,
  #[serde(default)]
  pub y: f32,
  #[serde(default)]
  pub z: f32,
  #[serde(default)]
  pub w: f32,
}

impl AnimDocument {
  /// Validate a generic node tree against the `.anim` schema.
  pub fn from_value(value: serde_json::Value) -> Result<Self, ImportError> {
    Ok(serde_json::from_value(value)?)
  }
}
