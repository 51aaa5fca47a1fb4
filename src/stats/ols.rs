//! # Ordinary least squares
//!
//! $$
//! \hat\beta = V\Sigma^{+}U^\top y
//! $$
//!
//! Solved through the singular value decomposition. Singular values below
//! $\sigma_{\max}\cdot\texttt{RCOND}$ are treated as zero, which gives the
//! minimum-norm solution when the design is rank deficient.

use nalgebra::DMatrix;
use nalgebra::DVector;

use crate::error::PricingError;
use crate::error::Result;

/// Relative singular value cut-off.
pub const RCOND: f64 = 1e-10;

#[derive(Debug, Clone)]
pub struct OlsResult {
  pub beta: DVector<f64>,
  /// Numerical rank of the design matrix.
  pub rank: usize,
  pub nobs: usize,
}

impl OlsResult {
  pub fn predict(&self, row: &[f64]) -> f64 {
    row.iter().zip(self.beta.iter()).map(|(x, b)| x * b).sum()
  }
}

pub fn least_squares(design: DMatrix<f64>, target: &DVector<f64>) -> Result<OlsResult> {
  let (nobs, k) = design.shape();
  if nobs == 0 || k == 0 {
    return Err(PricingError::InvalidInput(
      "least squares needs a non-empty design matrix".to_string(),
    ));
  }
  if target.len() != nobs {
    return Err(PricingError::InvalidInput(format!(
      "design has {nobs} rows but target has {} entries",
      target.len()
    )));
  }
  if design.iter().chain(target.iter()).any(|v| !v.is_finite()) {
    return Err(PricingError::NumericInstability(
      "least squares input contains non-finite values".to_string(),
    ));
  }

  let svd = design.svd(true, true);
  let sigma_max = svd.singular_values.max();
  let eps = sigma_max * RCOND;
  let rank = svd.singular_values.iter().filter(|&&s| s > eps).count();

  let beta = svd
    .solve(target, eps)
    .map_err(|e| PricingError::NumericInstability(e.to_string()))?;

  if beta.iter().any(|b| !b.is_finite()) {
    return Err(PricingError::NumericInstability(
      "least squares produced non-finite coefficients".to_string(),
    ));
  }

  Ok(OlsResult { beta, rank, nobs })
}
