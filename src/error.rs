//! # Errors
//!
//! $$
//! \text{inputs} \to \text{Result}\langle V_0,\ \text{PricingError}\rangle
//! $$
//!
use std::fmt::Display;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PricingError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
  /// Count parameters out of range or non-finite values reaching the engine.
  #[error("invalid input: {0}")]
  InvalidInput(String),

  /// Every invariant violated by a set of contract terms.
  #[error("invalid contract terms: {}", join_violations(.0))]
  InvalidTerms(Vec<TermsViolation>),

  /// Least-squares solve produced a non-finite result.
  #[error("numeric instability: {0}")]
  NumericInstability(String),
}

/// Contract field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermsField {
  Strike,
  Volatility,
  RiskFreeRate,
  Time,
  InitialPrice,
  Timesteps,
}

impl Display for TermsField {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      TermsField::Strike => write!(f, "strike price"),
      TermsField::Volatility => write!(f, "volatility"),
      TermsField::RiskFreeRate => write!(f, "risk-free rate"),
      TermsField::Time => write!(f, "time to maturity"),
      TermsField::InitialPrice => write!(f, "initial price"),
      TermsField::Timesteps => write!(f, "timesteps"),
    }
  }
}

/// Which invariant a field broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
  NotFinite,
  NotPositive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermsViolation {
  pub field: TermsField,
  pub kind: ViolationKind,
}

impl Display for TermsViolation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.kind {
      ViolationKind::NotFinite => write!(f, "{} is not a finite number", self.field),
      ViolationKind::NotPositive => write!(f, "{} must be strictly positive", self.field),
    }
  }
}

fn join_violations(violations: &[TermsViolation]) -> String {
  violations
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}
