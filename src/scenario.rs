//! # Scenario
//!
//! Entry point over loosely typed records: a `data` record with the bond
//! scenario, a `solver_params` record with simulation settings and an
//! `extra_arguments` record that is accepted and ignored.
//!
//! ```json
//! {
//!   "data": { "Initial Interest Rate": 0.03, "Volatility": 0.01, "Maturity Time": 12 },
//!   "solver_params": { "NumberOfSimulations": 1024 }
//! }
//! ```
//!
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use tracing::debug;

use crate::config::ControlVariate;
use crate::config::ModelParams;
use crate::config::SimulationConfig;
use crate::error::PricingError;
use crate::error::Result;
use crate::quant::monte_carlo::MonteCarloBondPricer;

pub const INITIAL_RATE: &str = "Initial Interest Rate";
pub const VOLATILITY: &str = "Volatility";
pub const MATURITY_TIME: &str = "Maturity Time";
pub const NUMBER_OF_SIMULATIONS: &str = "NumberOfSimulations";
pub const CONTROL_VARIATE: &str = "ControlVariate";
pub const SEED: &str = "Seed";
pub const TIME_STEP: &str = "TimeStep";

const MONTHS_PER_YEAR: f64 = 12.0;

/// Whole input document as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputDocument {
  pub data: Map<String, Value>,
  #[serde(default)]
  pub solver_params: Map<String, Value>,
  #[serde(default)]
  pub extra_arguments: Map<String, Value>,
}

/// Output record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondPricing {
  pub bond_price: f64,
  pub variance: f64,
}

/// Validated bond scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
  pub initial_rate: f64,
  pub volatility: f64,
  /// Maturity in years
  pub maturity: f64,
}

fn number(record: &Map<String, Value>, key: &'static str) -> Result<Option<f64>> {
  match record.get(key) {
    None | Some(Value::Null) => Ok(None),
    Some(value) => value
      .as_f64()
      .filter(|x| x.is_finite())
      .map(Some)
      .ok_or_else(|| PricingError::invalid(key, format!("expected a finite number, got {value}"))),
  }
}

fn required(record: &Map<String, Value>, key: &'static str) -> Result<f64> {
  number(record, key)?.ok_or(PricingError::MissingField(key))
}

fn integer(record: &Map<String, Value>, key: &'static str) -> Result<Option<i64>> {
  match number(record, key)? {
    None => Ok(None),
    Some(x) if x.fract() == 0.0 => Ok(Some(record[key].as_i64().unwrap_or(x as i64))),
    Some(x) => Err(PricingError::invalid(
      key,
      format!("expected an integer, got {x}"),
    )),
  }
}

impl Scenario {
  pub fn from_record(record: &Map<String, Value>) -> Result<Self> {
    let initial_rate = required(record, INITIAL_RATE)?;
    let volatility = required(record, VOLATILITY)?;
    let months = required(record, MATURITY_TIME)?;

    if volatility < 0.0 {
      return Err(PricingError::invalid(
        VOLATILITY,
        format!("must be non-negative, got {volatility}"),
      ));
    }
    if months <= 0.0 {
      return Err(PricingError::invalid(
        MATURITY_TIME,
        format!("must be positive, got {months} months"),
      ));
    }

    Ok(Self {
      initial_rate,
      volatility,
      maturity: months / MONTHS_PER_YEAR,
    })
  }
}

/// Requested simulation count and config, with solver overrides applied on top of `base`.
pub fn solver_settings(
  record: &Map<String, Value>,
  base: SimulationConfig,
) -> Result<(usize, SimulationConfig)> {
  let mut config = base;

  if let Some(seed) = integer(record, SEED)? {
    config.seed = Some(u64::try_from(seed).map_err(|_| {
      PricingError::invalid(SEED, format!("must be non-negative, got {seed}"))
    })?);
  }
  if let Some(time_step) = number(record, TIME_STEP)? {
    config.time_step = time_step;
  }
  match record.get(CONTROL_VARIATE) {
    None | Some(Value::Null) => {}
    Some(Value::String(s)) => config.control_variate = s.parse::<ControlVariate>()?,
    Some(other) => {
      return Err(PricingError::invalid(
        CONTROL_VARIATE,
        format!("expected a string, got {other}"),
      ))
    }
  }
  config.validate()?;

  let requested = match integer(record, NUMBER_OF_SIMULATIONS)? {
    None => config.default_simulations,
    Some(n) if n <= 0 => {
      return Err(PricingError::SimulationSize(format!(
        "{NUMBER_OF_SIMULATIONS} must be positive, got {n}"
      )))
    }
    Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
  };

  Ok((requested, config))
}

/// Price the scenario in `data` with the default model and simulation settings.
pub fn run(
  data: &Map<String, Value>,
  solver_params: &Map<String, Value>,
  extra_arguments: &Map<String, Value>,
) -> Result<BondPricing> {
  run_with(
    data,
    solver_params,
    extra_arguments,
    ModelParams::default(),
    SimulationConfig::default(),
  )
}

pub fn run_with(
  data: &Map<String, Value>,
  solver_params: &Map<String, Value>,
  extra_arguments: &Map<String, Value>,
  model: ModelParams,
  base: SimulationConfig,
) -> Result<BondPricing> {
  if !extra_arguments.is_empty() {
    debug!(keys = ?extra_arguments.keys().collect::<Vec<_>>(), "ignoring extra arguments");
  }

  let scenario = Scenario::from_record(data)?;
  let (requested, config) = solver_settings(solver_params, base)?;
  let estimate = MonteCarloBondPricer::new(model, config).price(
    scenario.maturity,
    scenario.initial_rate,
    scenario.volatility,
    requested,
  )?;

  let (bond_price, variance) = estimate.rounded();
  Ok(BondPricing {
    bond_price,
    variance,
  })
}

pub fn run_document(document: &InputDocument) -> Result<BondPricing> {
  run(
    &document.data,
    &document.solver_params,
    &document.extra_arguments,
  )
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::quant::bonds::vasicek::vasicek_bond_price;
  use crate::quant::monte_carlo::round_decimals;

  fn record(value: Value) -> Map<String, Value> {
    match value {
      Value::Object(map) => map,
      _ => panic!("expected a JSON object"),
    }
  }

  fn one_year() -> Map<String, Value> {
    record(json!({ INITIAL_RATE: 0.03, VOLATILITY: 0.01, MATURITY_TIME: 12 }))
  }

  #[test]
  fn one_year_scenario_prices_near_closed_form() {
    let result = run(
      &one_year(),
      &record(json!({ NUMBER_OF_SIMULATIONS: 1024, SEED: 1 })),
      &Map::new(),
    )
    .unwrap();

    let closed_form = vasicek_bond_price(1.0, 0.03, 0.01, &ModelParams::default());
    assert!((result.bond_price - closed_form).abs() < 1e-3);
    assert!((result.bond_price - (-0.03_f64).exp()).abs() < 1e-3);
    assert!(result.variance >= 0.0);
  }

  #[test]
  fn outputs_are_rounded_to_ten_decimals() {
    for cv in ["literal", "regression"] {
      let result = run(
        &one_year(),
        &record(json!({ NUMBER_OF_SIMULATIONS: 256, SEED: 2, CONTROL_VARIATE: cv })),
        &Map::new(),
      )
      .unwrap();
      assert_eq!(round_decimals(result.bond_price, 10), result.bond_price);
      assert_eq!(round_decimals(result.variance, 10), result.variance);
    }
  }

  #[test]
  fn missing_fields_are_named() {
    for key in [INITIAL_RATE, VOLATILITY, MATURITY_TIME] {
      let mut data = one_year();
      data.remove(key);
      assert_eq!(
        run(&data, &Map::new(), &Map::new()),
        Err(PricingError::MissingField(key))
      );
    }
  }

  #[test]
  fn non_numeric_and_out_of_range_fields_are_invalid() {
    let cases = [
      json!({ INITIAL_RATE: "3%", VOLATILITY: 0.01, MATURITY_TIME: 12 }),
      json!({ INITIAL_RATE: 0.03, VOLATILITY: -0.01, MATURITY_TIME: 12 }),
      json!({ INITIAL_RATE: 0.03, VOLATILITY: 0.01, MATURITY_TIME: 0 }),
      json!({ INITIAL_RATE: 0.03, VOLATILITY: 0.01, MATURITY_TIME: -6 }),
    ];
    for case in cases {
      assert!(matches!(
        Scenario::from_record(&record(case)),
        Err(PricingError::InvalidParameter { .. })
      ));
    }
  }

  #[test]
  fn maturity_is_given_in_months() {
    let scenario = Scenario::from_record(&record(
      json!({ INITIAL_RATE: 0.03, VOLATILITY: 0.01, MATURITY_TIME: 18 }),
    ))
    .unwrap();
    assert_eq!(scenario.maturity, 1.5);
  }

  #[test]
  fn simulation_count_defaults_and_caps() {
    let base = SimulationConfig::default();

    let (requested, config) = solver_settings(&Map::new(), base.clone()).unwrap();
    assert_eq!(requested, 10_000);
    assert_eq!(config.normalize(requested), 16_384);

    let (requested, config) =
      solver_settings(&record(json!({ NUMBER_OF_SIMULATIONS: 1_000_000 })), base.clone()).unwrap();
    assert_eq!(config.normalize(requested), 65_536);

    for bad in [json!(0), json!(-5)] {
      assert!(matches!(
        solver_settings(&record(json!({ NUMBER_OF_SIMULATIONS: bad })), base.clone()),
        Err(PricingError::SimulationSize(_))
      ));
    }
    assert!(matches!(
      solver_settings(&record(json!({ NUMBER_OF_SIMULATIONS: 10.5 })), base),
      Err(PricingError::InvalidParameter { .. })
    ));
  }

  #[test]
  fn omitted_count_matches_explicit_default() {
    let seeded = record(json!({ SEED: 4 }));
    let explicit = record(json!({
      SEED: 4,
      NUMBER_OF_SIMULATIONS: 10_000,
      CONTROL_VARIATE: "regression"
    }));
    let implicit = record(json!({ SEED: 4, CONTROL_VARIATE: "regression" }));
    let data = record(json!({ INITIAL_RATE: 0.03, VOLATILITY: 0.01, MATURITY_TIME: 3 }));

    assert_eq!(
      run(&data, &explicit, &Map::new()),
      run(&data, &implicit, &Map::new())
    );
    assert!(run(&data, &seeded, &Map::new()).is_ok());
  }

  #[test]
  fn solver_overrides_are_applied() {
    let (_, config) = solver_settings(
      &record(json!({ SEED: 7, TIME_STEP: 0.02, CONTROL_VARIATE: "Regression" })),
      SimulationConfig::default(),
    )
    .unwrap();

    assert_eq!(config.seed, Some(7));
    assert_eq!(config.time_step, 0.02);
    assert_eq!(config.control_variate, ControlVariate::Regression);

    let base = SimulationConfig::default();
    assert!(solver_settings(&record(json!({ SEED: -1 })), base.clone()).is_err());
    assert!(solver_settings(&record(json!({ CONTROL_VARIATE: 1 })), base).is_err());
  }

  #[test]
  fn fifteen_year_bond_with_oversized_request_is_priced() {
    let data = record(json!({ INITIAL_RATE: 0.03, VOLATILITY: 0.01, MATURITY_TIME: 180 }));
    let solver = record(json!({ NUMBER_OF_SIMULATIONS: 1_000_000, SEED: 1, TIME_STEP: 0.1 }));
    let result = run(&data, &solver, &Map::new()).unwrap();

    let closed_form = vasicek_bond_price(15.0, 0.03, 0.01, &ModelParams::default());
    assert!((result.bond_price - closed_form).abs() < 1e-9);
    assert!(result.variance > 0.0);
  }

  #[test]
  fn extra_arguments_are_ignored() {
    let solver = record(json!({ NUMBER_OF_SIMULATIONS: 64, SEED: 3 }));
    let extra = record(json!({ "anything": [1, 2, 3] }));
    assert_eq!(
      run(&one_year(), &solver, &extra),
      run(&one_year(), &solver, &Map::new())
    );
  }

  #[test]
  fn document_parses_with_optional_records() {
    let document: InputDocument = serde_json::from_value(json!({
      "data": { INITIAL_RATE: 0.03, VOLATILITY: 0.01, MATURITY_TIME: 6 }
    }))
    .unwrap();
    assert!(document.solver_params.is_empty());

    let output = serde_json::to_value(BondPricing {
      bond_price: 0.985,
      variance: 1e-6,
    })
    .unwrap();
    assert_eq!(output, json!({ "bond_price": 0.985, "variance": 1e-6 }));
  }
}
