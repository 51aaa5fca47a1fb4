//! # Traits
//!
//! $$
//! \text{Trait contracts: }\mathcal{A}:\text{inputs}\to\text{samples/prices}
//! $$
//!
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::PricingError;
use crate::error::Result;

/// Anything that can be sampled from a caller-supplied random source.
pub trait ProcessExt {
  type Output;

  fn sample_using<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self::Output>;

  /// Reproducible sample.
  fn sample_seeded(&self, seed: u64) -> Result<Self::Output> {
    self.sample_using(&mut StdRng::seed_from_u64(seed))
  }
}

/// Pricer trait.
pub trait PricerExt: TimeExt {
  /// Calculate the call and put price.
  fn calculate_call_put(&self) -> Result<(f64, f64)>;

  /// Calculate the price.
  fn calculate_price(&self) -> Result<f64>;
}

pub trait TimeExt {
  fn tau(&self) -> Option<f64>;

  fn eval(&self) -> Option<chrono::NaiveDate> {
    None
  }

  fn expiration(&self) -> Option<chrono::NaiveDate> {
    None
  }

  /// Return tau directly, or compute it from eval/expiration dates (ACT/365).
  fn tau_or_from_dates(&self) -> Result<f64> {
    if let Some(tau) = self.tau() {
      return Ok(tau);
    }
    match (self.eval(), self.expiration()) {
      (Some(e), Some(x)) => Ok(x.signed_duration_since(e).num_days() as f64 / 365.0),
      _ => Err(PricingError::InvalidInput(
        "either tau or both eval and expiration must be set".to_string(),
      )),
    }
  }

  /// Calculate tau in years.
  fn calculate_tau_in_years(&self) -> Result<f64> {
    self.tau_or_from_dates()
  }
}
