use ndarray::Array1;

use crate::error::PricingError;
use crate::error::Result;

/// Equally spaced simulation grid on `[0, T]`, both ends included.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
  /// Maturity in years
  pub maturity: f64,
  /// Number of intervals
  pub num_steps: usize,
  /// `num_steps + 1` grid points
  pub points: Array1<f64>,
}

impl TimeGrid {
  /// Grid with `round(maturity / time_step)` intervals.
  pub fn new(maturity: f64, time_step: f64) -> Result<Self> {
    if !(maturity.is_finite() && maturity > 0.0) {
      return Err(PricingError::invalid(
        "Maturity Time",
        format!("must be positive and finite, got {maturity} years"),
      ));
    }
    if !(time_step.is_finite() && time_step > 0.0) {
      return Err(PricingError::invalid(
        "TimeStep",
        format!("must be positive and finite, got {time_step}"),
      ));
    }

    let steps = (maturity / time_step).round();
    if steps < 1.0 {
      return Err(PricingError::invalid(
        "Maturity Time",
        format!("{maturity} years is shorter than half a time step of {time_step}"),
      ));
    }
    if steps > usize::MAX as f64 {
      return Err(PricingError::SimulationSize(format!(
        "{steps} time steps cannot be represented"
      )));
    }

    Ok(Self::with_steps(maturity, steps as usize))
  }

  pub fn with_steps(maturity: f64, num_steps: usize) -> Self {
    Self {
      maturity,
      num_steps,
      points: Array1::linspace(0.0, maturity, num_steps + 1),
    }
  }

  /// Widths of the `num_steps` grid intervals.
  pub fn increments(&self) -> Array1<f64> {
    &self.points.slice(ndarray::s![1..]) - &self.points.slice(ndarray::s![..-1])
  }
}
