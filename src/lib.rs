//! Decode a Unity `.anim` animation description into a uniformly-sampled
//! [`Clip`] a skeletal-animation runtime can consume.
//!
//! The hard part is not the text. The host hands this crate an
//! already-parsed node tree; the work is reconciling three independently
//! timed curve families (rotation, position, scale) onto one common time
//! base: deriving smooth tangents from irregular keyframes, evaluating with
//! a carry-forward fallback, and converting every sample between the Unity
//! and target spatial conventions along the way.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use unity_anim::{import_clip, ImportSettings};
//!
//! let document = json!({
//!   "AnimationClip": {
//!     "m_RotationCurves": [{
//!       "path": "Root/actor:Hip",
//!       "curve": { "m_Curve": [
//!         { "time": 0.0, "value": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 } },
//!         { "time": 0.5, "value": { "x": 0.0, "y": 0.0, "z": 0.0, "w": 1.0 } }
//!       ]}
//!     }]
//!   }
//! });
//!
//! let clip = import_clip(document, &ImportSettings::default()).expect("Failed to import clip");
//! assert_eq!(clip.tracks[0].bone, "Hip");
//! ```

mod bone_path;
mod clip;
mod convert;
mod curve;
mod curve_set;
mod document;
mod error;
mod resample;

pub use bone_path::bone_name;
pub use clip::{Clip, ImportSettings, Track};
pub use curve::{CurveValue, Keyframe, KeyframeCurve};
pub use curve_set::{CurveFamily, CurveSet};
pub use document::{AnimDocument, ClipDocument, Components, CurveData, CurveEntry, CurvePoint};
pub use error::ImportError;
pub use resample::ResolvedTiming;

///
/// Convert a parsed `.anim` document tree into a uniformly-sampled clip.
///
/// The pipeline is synchronous and owns everything it touches: validate the
/// schema, build per-bone curves with coordinate conversion applied once per
/// sample, resolve the common time base, resample every channel, assemble.
/// On failure nothing partial escapes.
///
pub fn import_clip(
  document: serde_json::Value,
  settings: &ImportSettings,
) -> Result<Clip, ImportError> {
  let document = AnimDocument::from_value(document)?;
  let curves = CurveSet::from_document(&document.animation_clip);
  let timing = resample::resolve_timing(&curves)?;
  Ok(resample::build_clip(&curves, timing, settings))
}

// ? ////////////////////////////////////////////////////////////////////////////////////////////// ? //
// ?                            CODE ENDS HERE, BEGIN UNIT TESTS.                                   ? //
// ? ////////////////////////////////////////////////////////////////////////////////////////////// ? //
