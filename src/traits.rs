//! # Traits
//!
//! $$
//! \text{Trait contracts: }\mathcal{A}:\text{inputs}\to\text{samples/prices}
//! $$
//!
use ndarray::Array2;

/// Pricer trait.
pub trait PricerExt {
  /// Calculate the price.
  fn calculate_price(&self) -> f64;
}

/// A process simulated from an externally supplied noise matrix.
///
/// All randomness lives in the noise, so two calls with the same matrix
/// return the same ensemble.
pub trait ProcessExt {
  /// Simulate one path per row of `noise`; column `t` of `noise` drives step `t + 1`.
  fn sample_with_noise(&self, noise: &Array2<f64>) -> Array2<f64>;
}

/// Low-discrepancy sequence over the unit hypercube.
pub trait LowDiscrepancySequence {
  /// Returns the dimensionality of the sequence.
  fn dimension(&self) -> usize;

  /// Writes the next point into `out` (length `dimension()`), each coordinate in (0, 1).
  ///
  /// Returns `false` once the sequence is exhausted.
  fn next_into(&mut self, out: &mut [f64]) -> bool;

  /// Rewinds to the first point.
  fn reset(&mut self);

  /// Skips ahead by `n` points.
  fn skip(&mut self, n: usize);
}
