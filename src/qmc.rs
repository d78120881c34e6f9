//! # Quasi-Monte Carlo
//!
//! $$
//! Z_{ij}=\Phi^{-1}(u_{ij}),\quad u_i\in(0,1)^d\ \text{scrambled Sobol'}
//! $$
//!
pub mod polynomial;
pub mod sobol;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;
use tracing::debug;

pub use sobol::Sobol;

use crate::traits::LowDiscrepancySequence;

/// RNG driving the scramble; OS entropy when no seed is given.
pub fn scrambling_rng(seed: Option<u64>) -> StdRng {
  match seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  }
}

/// Standard-normal shocks drawn row by row from one scrambled Sobol' sequence.
///
/// Consecutive blocks continue the same sequence, so splitting `n` rows into
/// blocks yields exactly the rows of a single `n`-row draw.
pub struct NormalShocks {
  sobol: Sobol,
  normal: Normal,
  point: Vec<f64>,
}

impl NormalShocks {
  pub fn new(dim: usize, seed: Option<u64>) -> Self {
    let mut rng = scrambling_rng(seed);

    Self {
      sobol: Sobol::scrambled(dim, &mut rng),
      normal: Normal::new(0.0, 1.0).expect("standard normal parameters are valid"),
      point: vec![0.0; dim],
    }
  }

  /// Number of rows drawn so far.
  pub fn rows_drawn(&self) -> u64 {
    self.sobol.index()
  }

  /// Next `rows x dim` block of shocks.
  pub fn next_block(&mut self, rows: usize) -> Array2<f64> {
    let mut shocks = Array2::<f64>::zeros((rows, self.sobol.dimension()));
    for mut row in shocks.rows_mut() {
      self.sobol.next_into(&mut self.point);
      for (z, &u) in row.iter_mut().zip(&self.point) {
        *z = self.normal.inverse_cdf(u);
      }
    }
    shocks
  }
}

/// `n x dim` matrix of standard-normal shocks from a scrambled Sobol' point set.
///
/// `n` should be a power of two, otherwise the point set loses its balance
/// (see [`crate::config::normalize_simulations`]).
pub fn normal_shocks(dim: usize, n: usize, seed: Option<u64>) -> Array2<f64> {
  debug_assert!(n.is_power_of_two(), "sample count {n} is not a power of two");

  let shocks = NormalShocks::new(dim, seed).next_block(n);
  debug!(dim, n, "generated quasi-random normal shocks");
  shocks
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;

  #[test]
  fn shocks_have_requested_shape() {
    let shocks = normal_shocks(100, 256, Some(1));
    assert_eq!(shocks.dim(), (256, 100));
    assert!(shocks.iter().all(|z| z.is_finite()));
  }

  #[test]
  fn shocks_are_standard_normal_per_column() {
    let shocks = normal_shocks(8, 4096, Some(11));
    for col in shocks.columns() {
      let mean = col.mean().unwrap();
      let var = col.var(0.0);
      assert_abs_diff_eq!(mean, 0.0, epsilon = 5e-3);
      assert_abs_diff_eq!(var, 1.0, epsilon = 5e-2);
    }
  }

  #[test]
  fn seeded_shocks_are_reproducible() {
    assert_eq!(normal_shocks(3, 32, Some(5)), normal_shocks(3, 32, Some(5)));
  }

  #[test]
  fn blocks_continue_the_same_sequence() {
    let whole = normal_shocks(6, 64, Some(21));
    let mut shocks = NormalShocks::new(6, Some(21));
    let first = shocks.next_block(16);
    let rest = shocks.next_block(48);

    assert_eq!(shocks.rows_drawn(), 64);
    assert_eq!(first, whole.slice(ndarray::s![..16, ..]));
    assert_eq!(rest, whole.slice(ndarray::s![16.., ..]));
  }

  #[test]
  fn single_sample_is_supported() {
    let shocks = normal_shocks(4, 1, Some(9));
    assert_eq!(shocks.dim(), (1, 4));
  }
}
