use impl_new_derive::ImplNew;
use ndarray::s;
use ndarray::Array2;
use ndarray::Zip;

use crate::config::ModelParams;
use crate::traits::ProcessExt;

/// Vasicek short rate, Euler-Maruyama discretised.
/// dr(t) = kappa(theta - r(t))dt + sigma dW(t)
/// Negative rates are kept as they are.
#[derive(ImplNew, Debug, Clone)]
pub struct Vasicek {
  /// Initial short rate
  pub r0: f64,
  /// Volatility
  pub sigma: f64,
  /// Mean reversion speed and long-term mean
  pub model: ModelParams,
  /// Euler step in years
  pub dt: f64,
  /// Number of time steps
  pub n: usize,
}

impl Vasicek {
  /// Expected rate after `step` Euler steps given zero-mean shocks.
  ///
  /// The recurrence is linear, so `E[r_t] = theta + (r0 - theta)(1 - kappa dt)^t` exactly.
  pub fn mean_rate(&self, step: usize) -> f64 {
    let ModelParams { kappa, theta } = self.model;
    theta + (self.r0 - theta) * (1.0 - kappa * self.dt).powi(step as i32)
  }
}

impl ProcessExt for Vasicek {
  fn sample_with_noise(&self, noise: &Array2<f64>) -> Array2<f64> {
    assert_eq!(
      noise.ncols(),
      self.n,
      "noise must have one column per time step"
    );

    let ModelParams { kappa, theta } = self.model;
    let dt = self.dt;
    let vol = self.sigma * dt.sqrt();

    let mut paths = Array2::from_elem((noise.nrows(), self.n + 1), self.r0);
    for t in 1..=self.n {
      let (prev, next) = paths.multi_slice_mut((s![.., t - 1], s![.., t]));
      Zip::from(next)
        .and(prev)
        .and(noise.column(t - 1))
        .for_each(|r, r_prev, &z| {
          *r = *r_prev + kappa * (theta - *r_prev) * dt + vol * z;
        });
    }

    paths
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use ndarray::array;

  use super::*;
  use crate::qmc::normal_shocks;

  fn vasicek(n: usize) -> Vasicek {
    Vasicek::new(0.03, 0.02, ModelParams::new(0.1, 0.05), 0.25, n)
  }

  #[test]
  fn vasicek_starts_with_r0() {
    let v = vasicek(100);
    let paths = v.sample_with_noise(&normal_shocks(100, 64, Some(1)));

    assert_eq!(paths.dim(), (64, 101));
    assert!(paths.column(0).iter().all(|&r| r == 0.03));
  }

  #[test]
  fn vasicek_follows_euler_recurrence() {
    let v = vasicek(2);
    let paths = v.sample_with_noise(&array![[1.0, -0.5], [0.0, 0.0]]);

    // 0.03 + 0.1 * 0.02 * 0.25 + 0.02 * 0.5
    assert_relative_eq!(paths[[0, 1]], 0.0405, epsilon = 1e-15);
    // 0.0405 + 0.1 * 0.0095 * 0.25 - 0.02 * 0.5 * 0.5
    assert_relative_eq!(paths[[0, 2]], 0.0357375, epsilon = 1e-15);
    // no noise: deterministic drift towards theta
    assert_relative_eq!(paths[[1, 2]], v.mean_rate(2), epsilon = 1e-15);
  }

  #[test]
  fn vasicek_is_deterministic_given_noise() {
    let v = vasicek(40);
    let noise = normal_shocks(40, 128, Some(17));
    assert_eq!(v.sample_with_noise(&noise), v.sample_with_noise(&noise));
  }

  #[test]
  fn vasicek_allows_negative_rates() {
    let v = Vasicek::new(0.0, 0.5, ModelParams::default(), 0.01, 1);
    let paths = v.sample_with_noise(&array![[-3.0]]);
    assert!(paths[[0, 1]] < 0.0);
  }

  #[test]
  fn vasicek_mean_rate_matches_ensemble_mean() {
    let v = vasicek(20);
    let paths = v.sample_with_noise(&normal_shocks(20, 4096, Some(23)));
    let terminal = paths.column(20).mean().unwrap();
    assert_relative_eq!(terminal, v.mean_rate(20), epsilon = 5e-4);
  }
}
