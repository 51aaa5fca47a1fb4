//! # American options (least-squares Monte Carlo)
//!
//! $$
//! V_0=\frac1N\sum_{i=1}^N Y_0^{(i)}
//! $$
//!
//! where $Y_0^{(i)}$ is the cash flow of path $i$ under the exercise policy
//! produced by [`BackwardInduction`], already discounted to the contract start.

use impl_new_derive::ImplNew;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::debug;

use super::lsm::BackwardInduction;
use super::lsm::ExerciseStart;
use super::lsm::StepReport;
use crate::error::PricingError;
use crate::error::Result;
use crate::quant::terms::ContractTerms;
use crate::quant::MonteCarloEstimate;
use crate::quant::OptionType;
use crate::stats::summary::discounted_estimate;
use crate::stochastic::diffusion::gbm::GBM;
use crate::traits::PricerExt;
use crate::traits::ProcessExt;
use crate::traits::TimeExt;

/// Price together with the per-step exercise diagnostics.
#[derive(Debug, Clone)]
pub struct LsmOutput {
  pub estimate: MonteCarloEstimate,
  pub steps: Vec<StepReport>,
}

#[derive(ImplNew, Debug, Clone)]
pub struct AmericanPricer {
  pub terms: ContractTerms,
  pub option_type: OptionType,
  /// Number of simulated paths.
  pub paths: usize,
  /// Fixed seed for reproducible prices; OS entropy when `None`.
  pub seed: Option<u64>,
  pub exercise_start: ExerciseStart,
}

impl AmericanPricer {
  /// Simulate, run the backward induction and average the cash flows.
  pub fn price_using<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<LsmOutput> {
    self.terms.ensure_valid()?;
    if self.paths < 1 {
      return Err(PricingError::InvalidInput(
        "path count must be at least 1".to_string(),
      ));
    }

    let paths = GBM::from_terms(&self.terms, self.paths).sample_using(rng)?;
    let engine =
      BackwardInduction::from_terms(&self.terms, self.option_type, self.exercise_start);
    let induction = engine.run(&paths)?;
    let estimate = discounted_estimate(&induction.cash_flows, 1.0)?;

    debug!(
      option_type = %self.option_type,
      price = estimate.price,
      std_error = estimate.std_error,
      paths = estimate.paths,
      "american option priced"
    );

    Ok(LsmOutput {
      estimate,
      steps: induction.steps,
    })
  }

  pub fn price_with_boundary(&self) -> Result<LsmOutput> {
    self.price_using(&mut self.rng())
  }

  pub fn estimate(&self) -> Result<MonteCarloEstimate> {
    Ok(self.price_with_boundary()?.estimate)
  }

  /// Same contract with the other side of the call/put pair.
  pub fn with_option_type(&self, option_type: OptionType) -> Self {
    Self {
      option_type,
      ..self.clone()
    }
  }

  fn rng(&self) -> StdRng {
    match self.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_entropy(),
    }
  }
}

impl PricerExt for AmericanPricer {
  /// Call and put on the same seed when one is set.
  fn calculate_call_put(&self) -> Result<(f64, f64)> {
    let call = self.with_option_type(OptionType::Call).estimate()?;
    let put = self.with_option_type(OptionType::Put).estimate()?;
    Ok((call.price, put.price))
  }

  fn calculate_price(&self) -> Result<f64> {
    Ok(self.estimate()?.price)
  }
}

impl TimeExt for AmericanPricer {
  fn tau(&self) -> Option<f64> {
    Some(self.terms.time)
  }
}

/// Present value of an early-exercise option, exercisable at each of
/// `terms.timesteps` dates after the contract start.
pub fn price_early_exercise_option(
  terms: &ContractTerms,
  option_type: OptionType,
  path_count: usize,
) -> Result<f64> {
  price_early_exercise_option_with_rng(
    terms,
    option_type,
    path_count,
    &mut StdRng::from_entropy(),
  )
}

pub fn price_early_exercise_option_with_rng<R: Rng + ?Sized>(
  terms: &ContractTerms,
  option_type: OptionType,
  path_count: usize,
  rng: &mut R,
) -> Result<f64> {
  let pricer = AmericanPricer::new(
    *terms,
    option_type,
    path_count,
    None,
    ExerciseStart::default(),
  );
  Ok(pricer.price_using(rng)?.estimate.price)
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;

  use super::*;
  use crate::quant::pricing::bsm::BSMPricer;
  use crate::stochastic::K;
  use crate::stochastic::M;
  use crate::stochastic::N;
  use crate::stochastic::S0;

  fn reference_terms(timesteps: usize) -> ContractTerms {
    ContractTerms::new(K, 0.2, 0.04, 1.0, S0, timesteps).unwrap()
  }

  fn seeded(
    terms: ContractTerms,
    option_type: OptionType,
    paths: usize,
    seed: u64,
  ) -> AmericanPricer {
    AmericanPricer::new(terms, option_type, paths, Some(seed), ExerciseStart::FirstStep)
  }

  #[test]
  fn reference_put_is_in_band_and_reproducible() {
    let terms = reference_terms(N);
    let mut rng = StdRng::seed_from_u64(2024);
    let first =
      price_early_exercise_option_with_rng(&terms, OptionType::Put, M, &mut rng).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let second =
      price_early_exercise_option_with_rng(&terms, OptionType::Put, M, &mut rng).unwrap();

    // 20-date Bermudan binomial reference is about 6.38
    assert!((5.5..=6.5).contains(&first), "price = {first}");
    assert_eq!(first, second);
  }

  #[test]
  fn single_exercise_date_converges_to_black_scholes() {
    let terms = reference_terms(1);
    let est = seeded(terms, OptionType::Put, 100_000, 7).estimate().unwrap();
    let bs = BSMPricer::from_terms(&terms, OptionType::Put)
      .calculate_price()
      .unwrap();

    assert!(
      (est.price - bs).abs() < 5.0 * est.std_error,
      "mc = {} +/- {}, bs = {bs}",
      est.price,
      est.std_error
    );
  }

  #[test]
  fn american_put_is_worth_at_least_european_put() {
    let terms = reference_terms(N);
    let est = seeded(terms, OptionType::Put, M, 99).estimate().unwrap();
    let european = BSMPricer::from_terms(&terms, OptionType::Put)
      .calculate_price()
      .unwrap();
    assert!(est.price > european - 3.0 * est.std_error);
  }

  #[test]
  fn deep_in_the_money_call_approaches_forward_intrinsic() {
    let terms = ContractTerms::new(100.0, 0.2, 0.04, 1.0, 300.0, 10).unwrap();
    let price = seeded(terms, OptionType::Call, 20_000, 3)
      .calculate_price()
      .unwrap();
    let bound = terms.initial_price - terms.strike * terms.maturity_discount();
    assert!((price - bound).abs() < 3.0, "price = {price}, bound = {bound}");
  }

  #[test]
  fn deep_out_of_the_money_call_is_worthless() {
    let terms = ContractTerms::new(300.0, 0.2, 0.04, 1.0, 100.0, 10).unwrap();
    let price = seeded(terms, OptionType::Call, 20_000, 3)
      .calculate_price()
      .unwrap();
    assert!(price < 1e-2, "price = {price}");
  }

  #[test]
  fn call_put_pair_is_reproducible_with_seed() {
    let pricer = seeded(reference_terms(N), OptionType::Put, 2_000, 5);
    let (call, put) = pricer.calculate_call_put().unwrap();
    assert_eq!((call, put), pricer.calculate_call_put().unwrap());
    assert!(call > 0.0 && put > 0.0);
    assert_eq!(put, pricer.calculate_price().unwrap());
    let call_pricer = seeded(reference_terms(N), OptionType::Call, 2_000, 5);
    assert_eq!(call, call_pricer.calculate_price().unwrap());
    assert_eq!(pricer.with_option_type(OptionType::Call).terms, pricer.terms);
  }

  #[test]
  fn inception_exercise_prices_deep_put_at_intrinsic() {
    let terms = ContractTerms::new(100.0, 0.2, 0.1, 1.0, 40.0, 10).unwrap();
    let pricer =
      AmericanPricer::new(terms, OptionType::Put, 2_000, Some(1), ExerciseStart::Inception);
    assert_relative_eq!(pricer.calculate_price().unwrap(), 60.0, max_relative = 1e-12);
  }

  #[test]
  fn boundary_report_covers_every_step() {
    let output = seeded(reference_terms(N), OptionType::Put, 4_000, 11)
      .price_with_boundary()
      .unwrap();
    assert_eq!(output.steps.len(), N);
    assert!(output.steps.iter().any(|s| s.exercised_paths > 0));
    assert!(output.estimate.std_error > 0.0);
  }

  #[test]
  fn zero_paths_fail_before_simulation() {
    let err = price_early_exercise_option(&reference_terms(N), OptionType::Put, 0).unwrap_err();
    assert!(matches!(err, PricingError::InvalidInput(_)));
  }

  #[test]
  fn zero_timesteps_fail_before_simulation() {
    let terms = ContractTerms {
      timesteps: 0,
      ..reference_terms(N)
    };
    let err = price_early_exercise_option(&terms, OptionType::Call, 100).unwrap_err();
    assert!(matches!(err, PricingError::InvalidInput(_)));
  }

  #[test]
  fn non_finite_terms_are_rejected() {
    let terms = ContractTerms {
      volatility: f64::NAN,
      ..reference_terms(N)
    };
    let err = price_early_exercise_option(&terms, OptionType::Put, 100).unwrap_err();
    assert!(matches!(err, PricingError::InvalidInput(_)));
  }

  #[test]
  fn unseeded_price_is_non_negative() {
    let price = price_early_exercise_option(&reference_terms(5), OptionType::Put, 500).unwrap();
    assert!(price >= 0.0);
  }
}
