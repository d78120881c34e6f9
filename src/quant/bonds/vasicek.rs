use impl_new_derive::ImplNew;

use crate::config::ModelParams;
use crate::traits::PricerExt;

/// Vasicek model for zero-coupon bond pricing
/// dR(t) = kappa(theta - R(t))dt + sigma dW(t)
/// where R(t) is the short rate.
#[derive(ImplNew, Default, Debug, Clone)]
pub struct Vasicek {
  /// Short rate
  pub r_t: f64,
  /// Volatility
  pub sigma: f64,
  /// Mean reversion speed and long-term mean
  pub model: ModelParams,
  /// Maturity of the bond in years
  pub tau: f64,
}

impl PricerExt for Vasicek {
  fn calculate_price(&self) -> f64 {
    vasicek_bond_price(self.tau, self.r_t, self.sigma, &self.model)
  }
}

/// Affine closed form `P = A(T) exp(-B(T) r0)`.
pub fn vasicek_bond_price(tau: f64, r0: f64, sigma: f64, model: &ModelParams) -> f64 {
  let ModelParams { kappa, theta } = *model;

  let b = (1.0 - (-kappa * tau).exp()) / kappa;
  let a = ((theta - sigma.powi(2) / (2.0 * kappa.powi(2))) * (b - tau)
    - sigma.powi(2) * b.powi(2) / (4.0 * kappa))
    .exp();

  a * (-b * r0).exp()
}
