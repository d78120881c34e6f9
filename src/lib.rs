//! # vasicek-qmc
//!
//! Zero-coupon bond pricing under the Vasicek short-rate model.
//!
//! $$
//! dr_t=\kappa(\theta-r_t)\,dt+\sigma\,dW_t,\qquad P(0,T)=\mathbb E\Big[e^{-\int_0^T r_s\,ds}\Big]
//! $$
//!
//! Short-rate paths are driven by scrambled Sobol' normals, discounted along an
//! equally spaced grid and averaged with a control variate against the closed form.
//!
//! | Module         | Description                                                    |
//! |----------------|----------------------------------------------------------------|
//! | [`config`]     | Model constants, simulation limits and sample-count rules.     |
//! | [`error`]      | Error type shared by every fallible operation.                 |
//! | [`qmc`]        | Scrambled Sobol' sequence and normal shock matrices.           |
//! | [`stochastic`] | Simulation grid and Euler short-rate paths.                    |
//! | [`quant`]      | Closed-form price, discounting and Monte Carlo estimators.     |
//! | [`scenario`]   | Record-level entry point returning price and variance.         |
//! | [`traits`]     | Shared pricer, process and sequence traits.                    |
//!
pub mod config;
pub mod error;
pub mod qmc;
pub mod quant;
pub mod scenario;
pub mod stochastic;
pub mod traits;

pub use config::ControlVariate;
pub use config::ModelParams;
pub use config::SimulationConfig;
pub use error::PricingError;
pub use quant::monte_carlo::BondPriceEstimate;
pub use quant::monte_carlo::MonteCarloBondPricer;
pub use scenario::run;
pub use scenario::BondPricing;
