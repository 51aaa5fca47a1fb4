//! # Contract terms
//!
//! $$
//! (K,\ \sigma,\ r,\ T,\ S_0,\ n),\qquad \Delta t = T / n
//! $$
//!
//! Static parameters of a single pricing call. Every field is validated at
//! construction and the full list of broken invariants is returned at once.

use crate::error::PricingError;
use crate::error::Result;
use crate::error::TermsField;
use crate::error::TermsViolation;
use crate::error::ViolationKind;
use crate::traits::TimeExt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContractTerms {
  /// Strike price $K$.
  pub strike: f64,
  /// Volatility $\sigma$.
  pub volatility: f64,
  /// Continuously compounded risk-free rate $r$.
  pub rf_rate: f64,
  /// Time to maturity in years $T$.
  pub time: f64,
  /// Spot level $S_0$.
  pub initial_price: f64,
  /// Number of discrete exercise opportunities.
  pub timesteps: usize,
}

impl ContractTerms {
  pub fn new(
    strike: f64,
    volatility: f64,
    rf_rate: f64,
    time: f64,
    initial_price: f64,
    timesteps: usize,
  ) -> Result<Self> {
    let terms = Self {
      strike,
      volatility,
      rf_rate,
      time,
      initial_price,
      timesteps,
    };

    let violations = terms.validate();
    if violations.is_empty() {
      Ok(terms)
    } else {
      Err(PricingError::InvalidTerms(violations))
    }
  }

  /// Build terms whose tenor is measured between two calendar dates (ACT/365).
  pub fn from_dates(
    strike: f64,
    volatility: f64,
    rf_rate: f64,
    eval: chrono::NaiveDate,
    expiration: chrono::NaiveDate,
    initial_price: f64,
    timesteps: usize,
  ) -> Result<Self> {
    let tenor = DatedTenor { eval, expiration };
    Self::new(
      strike,
      volatility,
      rf_rate,
      tenor.calculate_tau_in_years()?,
      initial_price,
      timesteps,
    )
  }

  /// All violated invariants, empty when the terms are usable.
  pub fn validate(&self) -> Vec<TermsViolation> {
    let mut violations = Vec::new();

    let positive = [
      (TermsField::Strike, self.strike),
      (TermsField::Volatility, self.volatility),
      (TermsField::Time, self.time),
      (TermsField::InitialPrice, self.initial_price),
    ];
    for (field, value) in positive {
      if !value.is_finite() {
        violations.push(TermsViolation {
          field,
          kind: ViolationKind::NotFinite,
        });
      } else if value <= 0.0 {
        violations.push(TermsViolation {
          field,
          kind: ViolationKind::NotPositive,
        });
      }
    }

    if !self.rf_rate.is_finite() {
      violations.push(TermsViolation {
        field: TermsField::RiskFreeRate,
        kind: ViolationKind::NotFinite,
      });
    }

    if self.timesteps == 0 {
      violations.push(TermsViolation {
        field: TermsField::Timesteps,
        kind: ViolationKind::NotPositive,
      });
    }

    violations
  }

  /// Fail fast with `InvalidInput` before any simulation work.
  pub(crate) fn ensure_valid(&self) -> Result<()> {
    let violations = self.validate();
    if violations.is_empty() {
      return Ok(());
    }
    let reasons = violations
      .iter()
      .map(ToString::to_string)
      .collect::<Vec<_>>()
      .join("; ");
    Err(PricingError::InvalidInput(reasons))
  }

  /// Copy of the terms with a different spot level.
  pub fn with_initial_price(&self, initial_price: f64) -> Self {
    Self {
      initial_price,
      ..*self
    }
  }

  /// Length of one timestep.
  pub fn dt(&self) -> f64 {
    self.time / self.timesteps as f64
  }

  /// One-period discount factor $e^{-r\Delta t}$.
  pub fn step_discount(&self) -> f64 {
    (-self.rf_rate * self.dt()).exp()
  }

  /// Discount factor to maturity $e^{-rT}$.
  pub fn maturity_discount(&self) -> f64 {
    (-self.rf_rate * self.time).exp()
  }
}

impl TimeExt for ContractTerms {
  fn tau(&self) -> Option<f64> {
    Some(self.time)
  }
}

struct DatedTenor {
  eval: chrono::NaiveDate,
  expiration: chrono::NaiveDate,
}

impl TimeExt for DatedTenor {
  fn tau(&self) -> Option<f64> {
    None
  }

  fn eval(&self) -> Option<chrono::NaiveDate> {
    Some(self.eval)
  }

  fn expiration(&self) -> Option<chrono::NaiveDate> {
    Some(self.expiration)
  }
}
