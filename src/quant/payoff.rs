//! # Payoff
//!
//! $$
//! g_{\text{call}}(S)=(S-K)^+,\qquad g_{\text{put}}(S)=(K-S)^+
//! $$
//!
use ndarray::Array;
use ndarray::ArrayBase;
use ndarray::Data;
use ndarray::Dimension;

use super::OptionType;

/// Intrinsic exercise value of a vanilla put or call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payoff {
  pub option_type: OptionType,
  pub strike: f64,
}

impl Payoff {
  pub fn new(option_type: OptionType, strike: f64) -> Self {
    Self {
      option_type,
      strike,
    }
  }

  #[inline]
  pub fn intrinsic(&self, s: f64) -> f64 {
    match self.option_type {
      OptionType::Call => (s - self.strike).max(0.0),
      OptionType::Put => (self.strike - s).max(0.0),
    }
  }

  /// Strictly positive immediate payoff.
  #[inline]
  pub fn is_in_the_money(&self, s: f64) -> bool {
    self.intrinsic(s) > 0.0
  }

  /// Elementwise payoff over a price vector or a whole path matrix.
  pub fn evaluate<S, D>(&self, prices: &ArrayBase<S, D>) -> Array<f64, D>
  where
    S: Data<Elem = f64>,
    D: Dimension,
  {
    prices.mapv(|s| self.intrinsic(s))
  }
}

#[cfg(test)]
mod tests {
  use ndarray::array;

  use super::*;

  #[test]
  fn put_and_call_are_hockey_sticks() {
    let put = Payoff::new(OptionType::Put, 100.0);
    let call = Payoff::new(OptionType::Call, 100.0);

    assert_eq!(put.intrinsic(90.0), 10.0);
    assert_eq!(put.intrinsic(110.0), 0.0);
    assert_eq!(call.intrinsic(110.0), 10.0);
    assert_eq!(call.intrinsic(90.0), 0.0);
  }

  #[test]
  fn at_the_money_is_not_in_the_money() {
    let put = Payoff::new(OptionType::Put, 100.0);
    assert!(!put.is_in_the_money(100.0));
    assert!(put.is_in_the_money(99.99));
  }

  #[test]
  fn evaluate_keeps_shape_and_is_non_negative() {
    let call = Payoff::new(OptionType::Call, 100.0);
    let prices = array![[80.0, 100.0, 120.0], [100.0, 130.0, 70.0]];
    let payoffs = call.evaluate(&prices);

    assert_eq!(payoffs, array![[0.0, 0.0, 20.0], [0.0, 30.0, 0.0]]);
    assert!(payoffs.iter().all(|&p| p >= 0.0));
  }

  #[test]
  fn evaluate_works_on_views() {
    let put = Payoff::new(OptionType::Put, 50.0);
    let prices = array![[40.0, 60.0], [45.0, 55.0]];
    assert_eq!(put.evaluate(&prices.column(0)), array![10.0, 5.0]);
  }
}
