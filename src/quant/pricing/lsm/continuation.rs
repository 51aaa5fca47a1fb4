//! # Continuation value regression
//!
//! $$
//! C(S_t)\approx\beta_0+\beta_1\frac{S_t}{K}+\beta_2\left(\frac{S_t}{K}\right)^2
//! $$
//!
//! fitted on in-the-money paths only, against the cash flows already
//! discounted to $t$. Scaling by $K$ spans the same polynomials as
//! $\{1, S, S^2\}$ and keeps the design well conditioned.

use nalgebra::DMatrix;
use nalgebra::DVector;
use ndarray::Array1;

use crate::error::PricingError;
use crate::error::Result;
use crate::stats::ols::least_squares;
use crate::stats::ols::OlsResult;

/// Degree of the polynomial basis.
pub const BASIS_DEGREE: usize = 2;

#[derive(Debug, Clone)]
pub struct RegressionFit {
  ols: OlsResult,
  scale: f64,
}

impl RegressionFit {
  pub fn rank(&self) -> usize {
    self.ols.rank
  }

  pub fn nobs(&self) -> usize {
    self.ols.nobs
  }

  pub fn predict(&self, s: f64) -> f64 {
    self.ols.predict(&basis(s / self.scale))
  }
}

#[derive(Debug, Clone, Copy)]
pub struct ContinuationEstimator {
  scale: f64,
}

impl ContinuationEstimator {
  pub fn new(scale: f64) -> Result<Self> {
    if !(scale.is_finite() && scale > 0.0) {
      return Err(PricingError::InvalidInput(format!(
        "regression scale must be finite and positive, got {scale}"
      )));
    }
    Ok(Self { scale })
  }

  /// Least-squares fit, `None` when there is nothing to regress on.
  pub fn fit(&self, prices: &[f64], discounted_flows: &[f64]) -> Result<Option<RegressionFit>> {
    if prices.len() != discounted_flows.len() {
      return Err(PricingError::InvalidInput(format!(
        "{} prices but {} cash flows",
        prices.len(),
        discounted_flows.len()
      )));
    }
    if prices.is_empty() {
      return Ok(None);
    }

    let design = DMatrix::from_fn(prices.len(), BASIS_DEGREE + 1, |i, j| {
      (prices[i] / self.scale).powi(j as i32)
    });
    let target = DVector::from_column_slice(discounted_flows);
    let ols = least_squares(design, &target)?;

    Ok(Some(RegressionFit {
      ols,
      scale: self.scale,
    }))
  }

  /// Predicted continuation value for every in-the-money path passed in.
  pub fn estimate(&self, prices: &[f64], discounted_flows: &[f64]) -> Result<Option<Array1<f64>>> {
    let Some(fit) = self.fit(prices, discounted_flows)? else {
      return Ok(None);
    };

    let continuation = prices.iter().map(|&s| fit.predict(s)).collect::<Array1<f64>>();
    if continuation.iter().any(|c| !c.is_finite()) {
      return Err(PricingError::NumericInstability(
        "continuation estimate is not finite".to_string(),
      ));
    }
    Ok(Some(continuation))
  }
}

fn basis(x: f64) -> [f64; BASIS_DEGREE + 1] {
  [1.0, x, x * x]
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;

  #[test]
  fn empty_in_the_money_set_has_no_fit() {
    let est = ContinuationEstimator::new(100.0).unwrap();
    assert!(est.fit(&[], &[]).unwrap().is_none());
    assert!(est.estimate(&[], &[]).unwrap().is_none());
  }

  #[test]
  fn quadratic_cash_flows_are_reproduced() {
    let est = ContinuationEstimator::new(100.0).unwrap();
    let prices = [70.0, 75.0, 80.0, 85.0, 90.0, 95.0];
    let flows = prices.map(|s: f64| 0.002 * (100.0 - s).powi(2) + 1.0);

    let continuation = est.estimate(&prices, &flows).unwrap().unwrap();
    for (c, f) in continuation.iter().zip(flows.iter()) {
      assert_abs_diff_eq!(*c, *f, epsilon = 1e-8);
    }
  }

  #[test]
  fn identical_prices_predict_the_mean_flow() {
    let est = ContinuationEstimator::new(100.0).unwrap();
    let prices = [90.0; 5];
    let flows = [0.0, 5.0, 10.0, 15.0, 20.0];

    let fit = est.fit(&prices, &flows).unwrap().unwrap();
    assert_eq!(fit.rank(), 1);
    assert_eq!(fit.nobs(), 5);
    assert_abs_diff_eq!(fit.predict(90.0), 10.0, epsilon = 1e-9);
  }

  #[test]
  fn single_observation_is_interpolated() {
    let est = ContinuationEstimator::new(100.0).unwrap();
    let continuation = est.estimate(&[95.0], &[4.2]).unwrap().unwrap();
    assert_abs_diff_eq!(continuation[0], 4.2, epsilon = 1e-9);
  }

  #[test]
  fn non_finite_flow_is_fatal() {
    let est = ContinuationEstimator::new(100.0).unwrap();
    assert!(matches!(
      est.estimate(&[90.0, 95.0], &[1.0, f64::NAN]),
      Err(PricingError::NumericInstability(_))
    ));
  }

  #[test]
  fn scale_must_be_positive() {
    assert!(ContinuationEstimator::new(0.0).is_err());
  }
}
