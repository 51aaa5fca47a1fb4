//! # Bump-and-reprice delta
//!
//! $$
//! \Delta\approx\frac{V\big(S_0(1+h)\big)-V(S_0)}{S_0\,h}
//! $$
//!
//! Both valuations should share the random numbers (same seed) or the
//! difference is dominated by Monte Carlo noise.

use tracing::debug;

use crate::error::PricingError;
use crate::error::Result;
use crate::quant::terms::ContractTerms;

pub fn forward_delta<F>(terms: &ContractTerms, bump: f64, mut price: F) -> Result<f64>
where
  F: FnMut(&ContractTerms) -> Result<f64>,
{
  if !(bump.is_finite() && bump > 0.0) {
    return Err(PricingError::InvalidInput(format!(
      "bump must be finite and positive, got {bump}"
    )));
  }
  terms.ensure_valid()?;

  let base = price(terms)?;
  let bumped_terms = terms.with_initial_price(terms.initial_price * (1.0 + bump));
  let bumped = price(&bumped_terms)?;
  let delta = (bumped - base) / (terms.initial_price * bump);

  debug!(base, bumped, delta, bump, "finite difference delta");
  Ok(delta)
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;
  use crate::quant::pricing::american::AmericanPricer;
  use crate::quant::pricing::bsm::BSMPricer;
  use crate::quant::pricing::lsm::ExerciseStart;
  use crate::quant::OptionType;
  use crate::traits::PricerExt;

  fn terms() -> ContractTerms {
    ContractTerms::new(100.0, 0.2, 0.04, 1.0, 100.0, 20).unwrap()
  }

  #[test]
  fn closed_form_delta_is_recovered() {
    let delta = forward_delta(&terms(), 1e-5, |t| {
      BSMPricer::from_terms(t, OptionType::Call).calculate_price()
    })
    .unwrap();
    let exact = BSMPricer::from_terms(&terms(), OptionType::Call)
      .delta()
      .unwrap();
    assert_abs_diff_eq!(delta, exact, epsilon = 1e-4);
  }

  #[test]
  fn american_deltas_have_the_right_sign() {
    for (option_type, range) in [(OptionType::Call, 0.0..1.0), (OptionType::Put, -1.0..0.0)] {
      let delta = forward_delta(&terms(), 0.01, |t| {
        AmericanPricer::new(*t, option_type, 10_000, Some(31), ExerciseStart::FirstStep)
          .calculate_price()
      })
      .unwrap();
      assert!(range.contains(&delta), "{option_type} delta = {delta}");
    }
  }

  #[test]
  fn bump_must_be_positive() {
    let err = forward_delta(&terms(), 0.0, |_| Ok(1.0)).unwrap_err();
    assert!(matches!(err, PricingError::InvalidInput(_)));
  }

  #[test]
  fn pricing_errors_propagate() {
    let err = forward_delta(&terms(), 0.01, |_| {
      Err(PricingError::NumericInstability("boom".to_string()))
    })
    .unwrap_err();
    assert!(matches!(err, PricingError::NumericInstability(_)));
  }
}
