//! # European options (Monte Carlo)
//!
//! $$
//! V_0=e^{-rT}\,\frac1N\sum_{i=1}^N g\!\left(S_T^{(i)}\right)
//! $$
//!
//! Only the terminal distribution is simulated, in one exact step.

use impl_new_derive::ImplNew;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::error::PricingError;
use crate::error::Result;
use crate::quant::payoff::Payoff;
use crate::quant::terms::ContractTerms;
use crate::quant::MonteCarloEstimate;
use crate::quant::OptionType;
use crate::stats::summary::discounted_estimate;
use crate::stochastic::diffusion::gbm::GBM;
use crate::traits::PricerExt;
use crate::traits::TimeExt;

#[derive(ImplNew, Debug, Clone)]
pub struct EuropeanPricer {
  pub terms: ContractTerms,
  pub option_type: OptionType,
  pub paths: usize,
  pub seed: Option<u64>,
}

impl EuropeanPricer {
  pub fn price_using<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<MonteCarloEstimate> {
    self.terms.ensure_valid()?;
    if self.paths < 1 {
      return Err(PricingError::InvalidInput(
        "path count must be at least 1".to_string(),
      ));
    }

    let terminal = GBM::from_terms(&self.terms, self.paths).sample_terminal_using(rng)?;
    let payoffs = Payoff::new(self.option_type, self.terms.strike).evaluate(&terminal);
    discounted_estimate(&payoffs, self.terms.maturity_discount())
  }

  pub fn estimate(&self) -> Result<MonteCarloEstimate> {
    self.price_using(&mut self.rng())
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

impl PricerExt for EuropeanPricer {
  fn calculate_call_put(&self) -> Result<(f64, f64)> {
    let call = self.with_option_type(OptionType::Call).estimate()?;
    let put = self.with_option_type(OptionType::Put).estimate()?;
    Ok((call.price, put.price))
  }

  fn calculate_price(&self) -> Result<f64> {
    Ok(self.estimate()?.price)
  }
}

impl TimeExt for EuropeanPricer {
  fn tau(&self) -> Option<f64> {
    Some(self.terms.time)
  }
}
