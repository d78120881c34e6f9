//! # Monte Carlo bond pricing
//!
//! $$
//! P(0,T)\approx\frac1N\sum_{i=1}^N e^{-\sum_t r_{i,t}\Delta t_t}
//! $$
//!
//! Scrambled Sobol' shocks drive an Euler-discretised Vasicek ensemble; each
//! path is discounted and the mean is adjusted with the closed-form price.
//!
use ndarray::Array1;
use tracing::debug;
use tracing::info;
use tracing::instrument;

use crate::config::ControlVariate;
use crate::config::ModelParams;
use crate::config::SimulationConfig;
use crate::error::PricingError;
use crate::error::Result;
use crate::qmc::NormalShocks;
use crate::quant::bonds::vasicek::Vasicek as VasicekBond;
use crate::quant::control_variate;
use crate::quant::discount::integrated_rates;
use crate::quant::discount::terminal;
use crate::stochastic::grid::TimeGrid;
use crate::stochastic::interest::vasicek::Vasicek;
use crate::traits::PricerExt;
use crate::traits::ProcessExt;

/// Number of decimals kept in reported figures.
pub const DECIMALS: i32 = 10;

/// Round `x` to `digits` decimals; values too large to scale are returned unchanged.
pub fn round_decimals(x: f64, digits: i32) -> f64 {
  let scale = 10f64.powi(digits);
  let scaled = x * scale;
  if scaled.is_finite() {
    scaled.round() / scale
  } else {
    x
  }
}

/// Full result of one pricing run.
#[derive(Debug, Clone, PartialEq)]
pub struct BondPriceEstimate {
  /// Control-variate adjusted price
  pub price: f64,
  /// Variance reported with the price
  pub variance: f64,
  /// Plain Monte Carlo mean of the terminal discount factors
  pub mc_mean: f64,
  /// Closed-form Vasicek price
  pub closed_form: f64,
  /// Estimated control coefficient, regression control variate only
  pub beta: Option<f64>,
  /// Number of simulated paths
  pub num_simulations: usize,
  /// Number of grid steps per path
  pub num_steps: usize,
}

impl BondPriceEstimate {
  /// `(price, variance)` rounded to [`DECIMALS`] decimals.
  pub fn rounded(&self) -> (f64, f64) {
    (
      round_decimals(self.price, DECIMALS),
      round_decimals(self.variance, DECIMALS),
    )
  }
}

/// Monte Carlo zero-coupon bond pricer.
#[derive(Debug, Clone, Default)]
pub struct MonteCarloBondPricer {
  pub model: ModelParams,
  pub config: SimulationConfig,
}

impl MonteCarloBondPricer {
  pub fn new(model: ModelParams, config: SimulationConfig) -> Self {
    Self { model, config }
  }

  /// Price a bond paying 1 at `maturity` years.
  ///
  /// `num_simulations` is normalised to a power of two within the configured cap.
  #[instrument(skip(self), fields(control_variate = %self.config.control_variate))]
  pub fn price(
    &self,
    maturity: f64,
    initial_rate: f64,
    volatility: f64,
    num_simulations: usize,
  ) -> Result<BondPriceEstimate> {
    self.model.validate()?;
    self.config.validate()?;
    if !initial_rate.is_finite() {
      return Err(PricingError::invalid(
        "Initial Interest Rate",
        format!("must be finite, got {initial_rate}"),
      ));
    }
    if !(volatility.is_finite() && volatility >= 0.0) {
      return Err(PricingError::invalid(
        "Volatility",
        format!("must be non-negative and finite, got {volatility}"),
      ));
    }

    let grid = TimeGrid::new(maturity, self.config.time_step)?;
    let num_simulations = self.config.normalize(num_simulations);
    let block = self.config.block_rows(num_simulations, grid.num_steps)?;

    let process = Vasicek::new(
      initial_rate,
      volatility,
      self.model,
      self.config.time_step,
      grid.num_steps,
    );
    let mut shocks = NormalShocks::new(grid.num_steps, self.config.seed);
    let mut control = Vec::with_capacity(num_simulations);
    while control.len() < num_simulations {
      let rows = block.min(num_simulations - control.len());
      let paths = process.sample_with_noise(&shocks.next_block(rows));
      control.extend(terminal(&integrated_rates(&paths, &grid)).iter().copied());
    }
    debug!(
      num_simulations,
      num_steps = grid.num_steps,
      block,
      "simulated short-rate paths"
    );

    let control = Array1::from_vec(control);
    let discount_factors = control.mapv(|x| (-x).exp());

    let mc_mean = discount_factors
      .mean()
      .ok_or_else(|| PricingError::SimulationSize("no simulated paths".into()))?;
    let closed_form =
      VasicekBond::new(initial_rate, volatility, self.model, maturity).calculate_price();
    debug!(mc_mean, closed_form, "discounted paths");

    let estimate = match self.config.control_variate {
      ControlVariate::Literal => control_variate::literal(&discount_factors, closed_form)?,
      ControlVariate::Regression => control_variate::regression(
        &discount_factors,
        &control,
        expected_integrated_rate(&process, &grid),
      )?,
    };

    info!(
      price = estimate.price,
      variance = estimate.variance,
      num_simulations,
      "bond priced"
    );

    Ok(BondPriceEstimate {
      price: estimate.price,
      variance: estimate.variance,
      mc_mean,
      closed_form,
      beta: estimate.beta,
      num_simulations,
      num_steps: grid.num_steps,
    })
  }
}

/// Exact mean of the discretised integral `sum_t r_t (t_{t+1} - t_t)` under the Euler scheme.
pub fn expected_integrated_rate(process: &Vasicek, grid: &TimeGrid) -> f64 {
  let mean_rates = Array1::from_shape_fn(grid.num_steps, |t| process.mean_rate(t));
  mean_rates.dot(&grid.increments())
}
