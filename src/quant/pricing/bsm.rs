use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;

use crate::error::PricingError;
use crate::error::Result;
use crate::quant::terms::ContractTerms;
use crate::quant::OptionType;
use crate::traits::PricerExt;
use crate::traits::TimeExt;

/// Black-Scholes-Merton closed form for European options.
#[derive(Debug, Clone)]
pub struct BSMPricer {
  /// Underlying price
  pub s: f64,
  /// Volatility
  pub v: f64,
  /// Strike price
  pub k: f64,
  /// Risk-free rate
  pub r: f64,
  /// Dividend yield
  pub q: Option<f64>,
  /// Time to maturity in years
  pub tau: Option<f64>,
  /// Evaluation date
  pub eval: Option<chrono::NaiveDate>,
  /// Expiration date
  pub expiration: Option<chrono::NaiveDate>,
  /// Option type
  pub option_type: OptionType,
}

impl BSMPricer {
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    s: f64,
    v: f64,
    k: f64,
    r: f64,
    q: Option<f64>,
    tau: Option<f64>,
    eval: Option<chrono::NaiveDate>,
    expiration: Option<chrono::NaiveDate>,
    option_type: OptionType,
  ) -> Self {
    Self {
      s,
      v,
      k,
      r,
      q,
      tau,
      eval,
      expiration,
      option_type,
    }
  }

  pub fn from_terms(terms: &ContractTerms, option_type: OptionType) -> Self {
    Self::new(
      terms.initial_price,
      terms.volatility,
      terms.strike,
      terms.rf_rate,
      None,
      Some(terms.time),
      None,
      None,
      option_type,
    )
  }

  /// Calculate d1 and d2
  fn d1_d2(&self, tau: f64) -> (f64, f64) {
    let d1 =
      ((self.s / self.k).ln() + (self.b() + 0.5 * self.v.powi(2)) * tau) / (self.v * tau.sqrt());
    let d2 = d1 - self.v * tau.sqrt();

    (d1, d2)
  }

  /// Cost of carry
  fn b(&self) -> f64 {
    self.r - self.q.unwrap_or(0.0)
  }

  fn checked_tau(&self) -> Result<f64> {
    let tau = self.tau_or_from_dates()?;
    let inputs = [self.s, self.v, self.k, tau];
    if inputs.iter().any(|x| !(x.is_finite() && *x > 0.0)) || !self.r.is_finite() {
      return Err(PricingError::InvalidInput(
        "s, v, k and tau must be finite and positive, r finite".to_string(),
      ));
    }
    Ok(tau)
  }

  /// Calculate the delta
  pub fn delta(&self) -> Result<f64> {
    let tau = self.checked_tau()?;
    let (d1, _) = self.d1_d2(tau);
    let n = Normal::default();
    let exp_bt = ((self.b() - self.r) * tau).exp();

    Ok(match self.option_type {
      OptionType::Call => exp_bt * n.cdf(d1),
      OptionType::Put => exp_bt * (n.cdf(d1) - 1.0),
    })
  }
}

impl PricerExt for BSMPricer {
  fn calculate_call_put(&self) -> Result<(f64, f64)> {
    let tau = self.checked_tau()?;
    let (d1, d2) = self.d1_d2(tau);
    let n = Normal::default();

    let call = self.s * ((self.b() - self.r) * tau).exp() * n.cdf(d1)
      - self.k * (-self.r * tau).exp() * n.cdf(d2);
    let put = -self.s * ((self.b() - self.r) * tau).exp() * n.cdf(-d1)
      + self.k * (-self.r * tau).exp() * n.cdf(-d2);

    Ok((call, put))
  }

  fn calculate_price(&self) -> Result<f64> {
    let (call, put) = self.calculate_call_put()?;
    Ok(match self.option_type {
      OptionType::Call => call,
      OptionType::Put => put,
    })
  }
}

impl TimeExt for BSMPricer {
  fn tau(&self) -> Option<f64> {
    self.tau
  }

  fn eval(&self) -> Option<chrono::NaiveDate> {
    self.eval
  }

  fn expiration(&self) -> Option<chrono::NaiveDate> {
    self.expiration
  }
}
