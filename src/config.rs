//! # Configuration
//!
//! $$
//! dr_t=\kappa(\theta-r_t)dt+\sigma dW_t
//! $$
//!
//! Model constants and simulation settings.
//!
use std::fmt::Display;
use std::str::FromStr;

use crate::error::PricingError;
use crate::error::Result;

/// Default mean reversion speed
pub const KAPPA: f64 = 0.1;
/// Default long-term mean of the short rate
pub const THETA: f64 = 0.03;
/// Default simulation time step in years
pub const TIME_STEP: f64 = 0.01;
/// Simulation count used when the caller gives none
pub const DEFAULT_SIMULATIONS: usize = 10_000;
/// Hard ceiling on the number of simulated paths
pub const MAX_SIMULATIONS: usize = 1 << 16;
/// Hard ceiling on the number of time steps per path
pub const MAX_TIME_STEPS: usize = 10_000;
/// Cells of the path ensemble (`paths * (steps + 1)`) simulated per block
pub const MAX_GRID_CELLS: usize = 1 << 22;

/// Fixed parameters of the Vasicek model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
  /// Mean reversion speed
  pub kappa: f64,
  /// Long-term mean of the short rate
  pub theta: f64,
}

impl Default for ModelParams {
  fn default() -> Self {
    Self {
      kappa: KAPPA,
      theta: THETA,
    }
  }
}

impl ModelParams {
  pub fn new(kappa: f64, theta: f64) -> Self {
    Self { kappa, theta }
  }

  /// The closed form divides by kappa, so it has to be strictly positive.
  pub fn validate(&self) -> Result<()> {
    if !(self.kappa.is_finite() && self.kappa > 0.0) {
      return Err(PricingError::invalid(
        "kappa",
        format!("must be positive and finite, got {}", self.kappa),
      ));
    }
    if !self.theta.is_finite() {
      return Err(PricingError::invalid(
        "theta",
        format!("must be finite, got {}", self.theta),
      ));
    }
    Ok(())
  }
}

/// How the closed-form price enters the Monte Carlo estimate.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlVariate {
  /// `mean - (mean - closed_form)`, reported with the raw discount-factor variance.
  #[default]
  Literal,
  /// Regression on the integrated short rate with an estimated coefficient.
  Regression,
}

impl Display for ControlVariate {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ControlVariate::Literal => write!(f, "literal"),
      ControlVariate::Regression => write!(f, "regression"),
    }
  }
}

impl FromStr for ControlVariate {
  type Err = PricingError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "literal" => Ok(ControlVariate::Literal),
      "regression" => Ok(ControlVariate::Regression),
      other => Err(PricingError::invalid(
        "ControlVariate",
        format!("expected `literal` or `regression`, got `{other}`"),
      )),
    }
  }
}

/// Settings of a single simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
  /// Euler step in years
  pub time_step: f64,
  /// Requested count used when the scenario omits one
  pub default_simulations: usize,
  /// Cap on the normalised simulation count, a power of two
  pub max_simulations: usize,
  /// Cap on the number of grid steps
  pub max_time_steps: usize,
  /// Cells of the path ensemble held in memory at once; larger ensembles run in row blocks
  pub max_grid_cells: usize,
  /// Scrambling seed; `None` draws one from the OS
  pub seed: Option<u64>,
  /// Control variate formula
  pub control_variate: ControlVariate,
}

impl Default for SimulationConfig {
  fn default() -> Self {
    Self {
      time_step: TIME_STEP,
      default_simulations: DEFAULT_SIMULATIONS,
      max_simulations: MAX_SIMULATIONS,
      max_time_steps: MAX_TIME_STEPS,
      max_grid_cells: MAX_GRID_CELLS,
      seed: None,
      control_variate: ControlVariate::default(),
    }
  }
}

impl SimulationConfig {
  pub fn validate(&self) -> Result<()> {
    if !(self.time_step.is_finite() && self.time_step > 0.0) {
      return Err(PricingError::invalid(
        "TimeStep",
        format!("must be positive and finite, got {}", self.time_step),
      ));
    }
    if !self.max_simulations.is_power_of_two() {
      return Err(PricingError::SimulationSize(format!(
        "simulation cap {} is not a power of two",
        self.max_simulations
      )));
    }
    if self.max_grid_cells == 0 {
      return Err(PricingError::SimulationSize(
        "grid cell budget must be positive".into(),
      ));
    }
    if self.default_simulations == 0 {
      return Err(PricingError::SimulationSize(
        "default simulation count must be positive".into(),
      ));
    }
    Ok(())
  }

  /// Normalise a requested simulation count against this config's cap.
  pub fn normalize(&self, requested: usize) -> usize {
    normalize_simulations(requested, self.max_simulations)
  }

  /// Paths simulated per block so that one block stays within `max_grid_cells`.
  ///
  /// The block is a power of two, at least 1 and at most `num_simulations`.
  /// Fails only when `num_steps` exceeds `max_time_steps`.
  pub fn block_rows(&self, num_simulations: usize, num_steps: usize) -> Result<usize> {
    if num_steps > self.max_time_steps {
      return Err(PricingError::SimulationSize(format!(
        "{num_steps} time steps exceed the limit of {}",
        self.max_time_steps
      )));
    }
    let fit = (self.max_grid_cells / (num_steps + 1)).max(1);
    let block = 1usize << fit.ilog2();
    Ok(block.min(num_simulations.max(1)))
  }
}

/// Smallest power of two not below `requested`, at least 1, at most `max_simulations`.
pub fn normalize_simulations(requested: usize, max_simulations: usize) -> usize {
  requested
    .max(1)
    .checked_next_power_of_two()
    .unwrap_or(usize::MAX)
    .min(max_simulations)
}
