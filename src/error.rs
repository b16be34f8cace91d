use thiserror::Error;

///
/// Failure modes of the import pipeline.
///
/// Anything recoverable (an absent curve family, an empty entry) is absorbed
/// where it happens. These are the only conditions that abort an import.
///
#[derive(Debug, Error)]
pub enum ImportError {
  /// The document tree does not match the AnimationClip schema.
  ///
  /// An absent curve family is fine. A family of the wrong shape is not.
  #[error("malformed animation document: {0}")]
  MalformedDocument(#[from] serde_json::Error),

  /// No usable key time was found, so the animation length cannot be deduced.
  /// There is nothing to resample.
  #[error("animation duration could not be deduced (max key time {max_time})")]
  DegenerateDuration {
    /// The maximum key time actually observed across every curve.
    max_time: f32,
  },
}
