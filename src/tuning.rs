use thiserror::Error;

/// Queues shorter than this (after the drawn item is removed) always append the drawn item.
pub const TINY_QUEUE_THRESHOLD: usize = 5;
/// A drawn item goes back into the front half with probability `1 / FRONT_REINSERT_ONE_IN`.
pub const FRONT_REINSERT_ONE_IN: u32 = 100;
/// In the common case a drawn item lands in `[ceil(BACK_BIAS_PERCENT * n / 100), n]`.
pub const BACK_BIAS_PERCENT: usize = 58;
/// Rare items are added no earlier than `len / RARE_FLOOR_DIVISOR`.
pub const RARE_FLOOR_DIVISOR: usize = 2;

/// Knobs of the reinsertion heuristic. The defaults are the constants above.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tuning {
  pub tiny_queue_threshold: usize,
  pub front_reinsert_one_in: u32,
  pub back_bias_percent: usize,
  pub rare_floor_divisor: usize,
}

impl Default for Tuning {
  fn default() -> Self {
    Self {
      tiny_queue_threshold: TINY_QUEUE_THRESHOLD,
      front_reinsert_one_in: FRONT_REINSERT_ONE_IN,
      back_bias_percent: BACK_BIAS_PERCENT,
      rare_floor_divisor: RARE_FLOOR_DIVISOR,
    }
  }
}

/// Reasons a `Tuning` can't drive a queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TuningError {
  #[error("tiny queue threshold must be at least 2, got {0}")]
  TinyThresholdTooSmall(usize),
  #[error("front reinsertion odds must be at least 1 in 1")]
  ZeroFrontOdds,
  #[error("back bias must be a percentage, got {0}")]
  BackBiasOutOfRange(usize),
  #[error("rare floor divisor must be non-zero")]
  ZeroRareDivisor,
}

impl Tuning {
  /// Check that every range the heuristic draws from is non-empty.
  pub fn validate(&self) -> Result<(), TuningError> {
    // The front-half range is [1, n/2], which is empty for n < 2.
    if self.tiny_queue_threshold < 2 {
      return Err(TuningError::TinyThresholdTooSmall(self.tiny_queue_threshold));
    };
    if self.front_reinsert_one_in == 0 {
      return Err(TuningError::ZeroFrontOdds);
    };
    if self.back_bias_percent > 100 {
      return Err(TuningError::BackBiasOutOfRange(self.back_bias_percent));
    };
    if self.rare_floor_divisor == 0 {
      return Err(TuningError::ZeroRareDivisor);
    };
    Ok(())
  }

  /// Lowest index the common-case reinsertion may pick, rounded up.
  pub(crate) fn back_floor(&self, n: usize) -> usize {
    (self.back_bias_percent * n).div_ceil(100)
  }

  /// Lowest index a new rare item may be inserted at.
  pub(crate) fn rare_floor(&self, len: usize) -> usize {
    len / self.rare_floor_divisor
  }
}
