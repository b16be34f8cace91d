//! Canonical bone identifiers from Unity actor paths.

/// Marker Unity puts in front of the bone segment of an actor path.
const ACTOR_MARKER: &str = "actor:";

///
/// Derive the canonical bone name from a hierarchical actor path like
/// `"Root/Spine/actor:Hand_L"`.
///
/// Takes the substring after the last `/`, then drops everything up to and
/// including a literal `actor:` marker. A path with neither comes back
/// unchanged, so already-canonical names pass through untouched.
///
pub fn bone_name(actor_path: &str) -> &str {
  let tail = match actor_path.rfind('/') {
    Some(offset) => &actor_path[offset + 1..],
    None => actor_path,
  };
  match tail.find(ACTOR_MARKER) {
    Some(offset) => &tail[offset + ACTOR_MARKER.len()..],
    None => tail,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn full_actor_path() {
    assert_eq!(bone_name("Root/Spine/actor:Hand_L"), "Hand_L");
  }

  #[test]
  fn plain_name_is_unchanged() {
    assert_eq!(bone_name("SimpleName"), "SimpleName");
  }

  #[test]
  fn path_without_marker() {
    assert_eq!(bone_name("Root/Spine/Hand_L"), "Hand_L");
  }

  #[test]
  fn marker_without_path() {
    assert_eq!(bone_name("actor:Hip"), "Hip");
  }

  #[test]
  fn idempotent_on_canonical_names() {
    let once = bone_name("Root/Spine/actor:Hand_L");
    assert_eq!(bone_name(once), once);
  }
}
