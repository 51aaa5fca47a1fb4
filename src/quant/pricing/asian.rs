//! # Asian options (Monte Carlo)
//!
//! $$
//! V_0=e^{-rT}\,\mathbb E^{\mathbb Q}\!\left[g\!\left(A\right)\right],\qquad
//! A_{\text{arith}}=\frac1{n+1}\sum_{t=0}^{n}S_t,\quad
//! A_{\text{geom}}=\Big(\prod_{t=0}^{n}S_t\Big)^{1/(n+1)}
//! $$
//!
//! The average runs over every simulated date including the contract start.

use impl_new_derive::ImplNew;
use ndarray::Array1;
use ndarray::Axis;
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
use crate::stochastic::diffusion::gbm::PathSet;
use crate::stochastic::diffusion::gbm::GBM;
use crate::traits::PricerExt;
use crate::traits::ProcessExt;
use crate::traits::TimeExt;

#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Averaging {
  #[default]
  Arithmetic,
  Geometric,
}

impl Averaging {
  /// Average of each path.
  pub fn apply(self, paths: &PathSet) -> Array1<f64> {
    let prices = paths.prices();
    match self {
      Averaging::Arithmetic => prices.map_axis(Axis(1), |row| row.mean().unwrap_or(0.0)),
      Averaging::Geometric => {
        prices.map_axis(Axis(1), |row| row.mapv(f64::ln).mean().unwrap_or(f64::NEG_INFINITY).exp())
      }
    }
  }
}

#[derive(ImplNew, Debug, Clone)]
pub struct AsianPricer {
  pub terms: ContractTerms,
  pub option_type: OptionType,
  pub averaging: Averaging,
  pub paths: usize,
  pub seed: Option<u64>,
}

impl AsianPricer {
  pub fn price_using<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<MonteCarloEstimate> {
    self.terms.ensure_valid()?;
    if self.paths < 1 {
      return Err(PricingError::InvalidInput(
        "path count must be at least 1".to_string(),
      ));
    }

    let paths = GBM::from_terms(&self.terms, self.paths).sample_using(rng)?;
    let averages = self.averaging.apply(&paths);
    let payoffs = Payoff::new(self.option_type, self.terms.strike).evaluate(&averages);
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

impl PricerExt for AsianPricer {
  fn calculate_call_put(&self) -> Result<(f64, f64)> {
    let call = self.with_option_type(OptionType::Call).estimate()?;
    let put = self.with_option_type(OptionType::Put).estimate()?;
    Ok((call.price, put.price))
  }

  fn calculate_price(&self) -> Result<f64> {
    Ok(self.estimate()?.price)
  }
}

impl TimeExt for AsianPricer {
  fn tau(&self) -> Option<f64> {
    Some(self.terms.time)
  }
}
