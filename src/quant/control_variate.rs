//! # Control Variates
//!
//! $$
//! \hat P=\bar Y-\beta\,(\bar X-\mathbb E[X]),\qquad \beta=\frac{\operatorname{Cov}(Y,X)}{\operatorname{Var}(X)}
//! $$
//!
use ndarray::stack;
use ndarray::Array1;
use ndarray::Axis;
use ndarray_stats::CorrelationExt;

use crate::error::PricingError;
use crate::error::Result;

/// Point estimate and the variance reported alongside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlVariateEstimate {
  /// Adjusted price
  pub price: f64,
  /// Population variance of the samples the price is averaged from
  pub variance: f64,
  /// Estimated control coefficient; `None` for the literal adjustment
  pub beta: Option<f64>,
}

fn sample_mean(values: &Array1<f64>) -> Result<f64> {
  values
    .mean()
    .ok_or_else(|| PricingError::SimulationSize("no simulated paths".into()))
}

/// `mean - (mean - closed_form)` with the raw discount-factor variance.
///
/// The adjustment cancels to the closed-form price up to rounding.
pub fn literal(discount_factors: &Array1<f64>, closed_form: f64) -> Result<ControlVariateEstimate> {
  let mc_mean = sample_mean(discount_factors)?;

  Ok(ControlVariateEstimate {
    price: mc_mean - (mc_mean - closed_form),
    variance: discount_factors.var(0.0),
    beta: None,
  })
}

/// Regression control variate on `control` with known mean `control_mean`.
///
/// Falls back to `beta = 0` when the control is constant or there is a single sample.
pub fn regression(
  discount_factors: &Array1<f64>,
  control: &Array1<f64>,
  control_mean: f64,
) -> Result<ControlVariateEstimate> {
  assert_eq!(
    discount_factors.len(),
    control.len(),
    "one control value per path"
  );

  let constant = control.iter().all(|&x| x == control[0]);
  let beta = if discount_factors.len() < 2 || constant {
    0.0
  } else {
    let samples = stack(Axis(0), &[discount_factors.view(), control.view()])
      .map_err(|e| PricingError::SimulationSize(e.to_string()))?;
    let cov = samples
      .cov(1.0)
      .map_err(|e| PricingError::SimulationSize(e.to_string()))?;
    let var_x = cov[[1, 1]];
    if var_x > 0.0 && var_x.is_finite() {
      cov[[0, 1]] / var_x
    } else {
      0.0
    }
  };

  let adjusted = discount_factors - &control.mapv(|x| beta * (x - control_mean));

  Ok(ControlVariateEstimate {
    price: sample_mean(&adjusted)?,
    variance: adjusted.var(0.0),
    beta: Some(beta),
  })
}
