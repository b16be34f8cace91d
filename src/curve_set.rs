//! Bone curves collected out of a validated document, one family at a time.

use ahash::AHashMap;
use glam::{Quat, Vec3};

use crate::bone_path::bone_name;
use crate::convert::{convert_position, convert_rotation, convert_scale};
use crate::curve::{CurveValue, KeyframeCurve};
use crate::document::{ClipDocument, Components, CurveEntry};

///
/// An insertion-ordered map from bone id to that bone's curve in one family.
///
/// Track ordering in the final clip depends on the order bones were first
/// seen, so iteration has to be reproducible. A hash map alone is not; the
/// map only backs the id lookup.
///
#[derive(Debug, Default)]
pub struct CurveFamily<T> {
  entries: Vec<(String, KeyframeCurve<T>)>,
  index: AHashMap<String, usize>,
}

impl<T: CurveValue> CurveFamily<T> {
  /// The curve for `bone`, created empty on first encounter.
  pub(crate) fn curve_mut(&mut self, bone: &str) -> &mut KeyframeCurve<T> {
    let at = match self.index.get(bone) {
      Some(at) => *at,
      None => {
        let at = self.entries.len();
        self.entries.push((bone.to_owned(), KeyframeCurve::default()));
        self.index.insert(bone.to_owned(), at);
        at
      }
    };
    &mut self.entries[at].1
  }

  /// Bone and curve pairs, in first-seen order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &KeyframeCurve<T>)> {
    self.entries.iter().map(|(bone, curve)| (bone.as_str(), curve))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

///
/// Every curve of every family. Built once at parse time, immutable after.
///
#[derive(Debug, Default)]
pub struct CurveSet {
  pub rotations: CurveFamily<Quat>,
  pub positions: CurveFamily<Vec3>,
  pub scales: CurveFamily<Vec3>,
}

impl CurveSet {
  ///
  /// Walk the three curve families of a validated document, resolving bone
  /// names and converting every sample into the target convention.
  ///
  /// An absent or empty family or entry contributes nothing: that bone simply
  /// has no curve there. That is a smaller curve set, not an error.
  ///
  pub fn from_document(doc: &ClipDocument) -> Self {
    let mut set = CurveSet::default();
    collect_family(&mut set.rotations, &doc.rotation_curves, |value| {
      convert_rotation(Quat::from_xyzw(value.x, value.y, value.z, value.w))
    });
    collect_family(&mut set.positions, &doc.position_curves, |value| {
      convert_position(Vec3::new(value.x, value.y, value.z))
    });
    collect_family(&mut set.scales, &doc.scale_curves, |value| {
      convert_scale(Vec3::new(value.x, value.y, value.z))
    });
    set
  }
}

fn collect_family<T, F>(family: &mut CurveFamily<T>, entries: &[CurveEntry], decode: F)
where
  T: CurveValue,
  F: Fn(&Components) -> T,
{
  for entry in entries {
    if entry.curve.keys.is_empty() {
      continue;
    }
    let curve = family.curve_mut(bone_name(&entry.path));
    for point in &entry.curve.keys {
      curve.push_key(point.time, decode(&point.value));
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::document::AnimDocument;
  use float_cmp::approx_eq;
  use serde_json::json;

  fn parse(value: serde_json::Value) -> CurveSet {
    let document = match AnimDocument::from_value(value) {
      Ok(document) => document,
      Err(e) => panic!("test document failed to parse. {}", e),
    };
    CurveSet::from_document(&document.animation_clip)
  }

  #[test]
  fn bone_names_are_resolved_and_samples_converted() {
    let set = parse(json!({
      "AnimationClip": {
        "m_PositionCurves": [{
          "path": "Root/Spine/actor:Hand_L",
          "curve": { "m_Curve": [
            { "time": 0.0, "value": { "x": 1.0, "y": 2.0, "z": 3.0 } }
          ]}
        }]
      }
    }));

    let (bone, curve) = match set.positions.iter().next() {
      Some(entry) => entry,
      None => panic!("position curve went missing"),
    };
    assert_eq!(bone, "Hand_L");
    assert_eq!(curve.keys()[0].value, Vec3::new(-100.0, -200.0, 300.0));
  }

  #[test]
  fn rotation_samples_are_converted_and_unit_length() {
    let set = parse(json!({
      "AnimationClip": {
        "m_RotationCurves": [{
          "path": "Hip",
          "curve": { "m_Curve": [
            { "time": 0.0, "value": { "x": 1.0, "y": 0.0, "z": 0.0, "w": 0.0 } }
          ]}
        }]
      }
    }));

    let (_, curve) = match set.rotations.iter().next() {
      Some(entry) => entry,
      None => panic!("rotation curve went missing"),
    };
    let q = curve.keys()[0].value;
    assert!(approx_eq!(f32, q.x, -1.0, epsilon = 1e-6));
    assert!(approx_eq!(f32, q.length(), 1.0, epsilon = 1e-6));
  }

  #[test]
  fn first_seen_order_is_preserved() {
    let set = parse(json!({
      "AnimationClip": {
        "m_RotationCurves": [
          { "path": "B", "curve": { "m_Curve": [ { "time": 0.0, "value": { "w": 1.0 } } ] } },
          { "path": "A", "curve": { "m_Curve": [ { "time": 0.0, "value": { "w": 1.0 } } ] } },
          { "path": "C", "curve": { "m_Curve": [ { "time": 0.0, "value": { "w": 1.0 } } ] } }
        ]
      }
    }));

    let order: Vec<&str> = set.rotations.iter().map(|(bone, _)| bone).collect();
    assert_eq!(order, vec!["B", "A", "C"]);
  }

  #[test]
  fn entries_for_one_bone_merge_into_one_curve() {
    // Two entries resolving to the same bone id append into a single curve,
    // kept in time order.
    let set = parse(json!({
      "AnimationClip": {
        "m_PositionCurves": [
          { "path": "Root/actor:Hip", "curve": { "m_Curve": [
            { "time": 0.2, "value": { "x": 2.0, "y": 0.0, "z": 0.0 } }
          ]}},
          { "path": "Other/actor:Hip", "curve": { "m_Curve": [
            { "time": 0.1, "value": { "x": 1.0, "y": 0.0, "z": 0.0 } }
          ]}}
        ]
      }
    }));

    assert_eq!(set.positions.len(), 1);
    let (_, curve) = match set.positions.iter().next() {
      Some(entry) => entry,
      None => panic!("merged curve went missing"),
    };
    let times: Vec<f32> = curve.keys().iter().map(|key| key.time).collect();
    assert_eq!(times, vec![0.1, 0.2]);
  }

  #[test]
  fn empty_entries_yield_no_curve() {
    let set = parse(json!({
      "AnimationClip": {
        "m_ScaleCurves": [
          { "path": "Hip", "curve": { "m_Curve": [] } },
          { "path": "Chest", "curve": {} }
        ]
      }
    }));
    assert!(set.scales.is_empty());
  }
}
