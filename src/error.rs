//! # Errors
//!
//! Failures surfaced by the pricing entry points. Every error is raised before
//! any path is simulated; the pipeline itself has no failure modes once its
//! inputs are validated.
//!
use thiserror::Error;

/// Error returned by scenario parsing, configuration checks and the pricer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
  /// A required scenario field is absent.
  #[error("missing required field `{0}`")]
  MissingField(&'static str),
  /// A field is present but unusable (non-numeric, non-finite, out of range).
  #[error("invalid parameter `{name}`: {reason}")]
  InvalidParameter { name: &'static str, reason: String },
  /// The simulation count or ensemble size is outside what the pricer accepts.
  #[error("invalid simulation size: {0}")]
  SimulationSize(String),
}

impl PricingError {
  pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
    Self::InvalidParameter {
      name,
      reason: reason.into(),
    }
  }
}

pub type Result<T> = std::result::Result<T, PricingError>;
