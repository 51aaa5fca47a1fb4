use ndarray::ArrayBase;
use ndarray::Data;
use ndarray::Ix1;

use crate::error::PricingError;
use crate::error::Result;
use crate::quant::MonteCarloEstimate;

/// Sample mean and standard error of the mean, scaled by `discount`.
pub fn discounted_estimate<S>(
  values: &ArrayBase<S, Ix1>,
  discount: f64,
) -> Result<MonteCarloEstimate>
where
  S: Data<Elem = f64>,
{
  let n = values.len();
  if n == 0 {
    return Err(PricingError::InvalidInput(
      "cannot summarise an empty sample".to_string(),
    ));
  }

  let mean = values.sum() / n as f64;
  let var = if n > 1 {
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64
  } else {
    0.0
  };

  let estimate = MonteCarloEstimate {
    price: discount * mean,
    std_error: discount * (var / n as f64).sqrt(),
    paths: n,
  };
  if !(estimate.price.is_finite() && estimate.std_error.is_finite()) {
    return Err(PricingError::NumericInstability(
      "Monte Carlo estimate is not finite".to_string(),
    ));
  }
  Ok(estimate)
}
