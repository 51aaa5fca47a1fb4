use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::PricingError;
use crate::error::Result;
use crate::traits::ProcessExt;

/// Matrix of independent standard normal draws, one row per path and one
/// column per step.
#[derive(Copy, Clone, Debug)]
pub struct Gn {
  /// Rows (paths).
  pub m: usize,
  /// Columns (steps).
  pub n: usize,
}

impl Gn {
  pub fn new(m: usize, n: usize) -> Self {
    Gn { m, n }
  }
}

impl ProcessExt for Gn {
  type Output = Array2<f64>;

  fn sample_using<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Self::Output> {
    if self.m == 0 || self.n == 0 {
      return Err(PricingError::InvalidInput(format!(
        "noise shape must be non-empty, got {}x{}",
        self.m, self.n
      )));
    }
    Ok(Array2::random_using((self.m, self.n), StandardNormal, rng))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn shape_matches_request() {
    let z = Gn::new(7, 3).sample_seeded(1).unwrap();
    assert_eq!(z.dim(), (7, 3));
  }

  #[test]
  fn same_seed_same_draws() {
    let gn = Gn::new(16, 4);
    assert_eq!(gn.sample_seeded(42).unwrap(), gn.sample_seeded(42).unwrap());
  }

  #[test]
  fn moments_are_standard() {
    let z = Gn::new(200_000, 1).sample_seeded(3).unwrap();
    let mean = z.mean().unwrap();
    let var = z.mapv(|x| (x - mean).powi(2)).mean().unwrap();
    assert!(mean.abs() < 0.01, "mean = {mean}");
    assert!((var - 1.0).abs() < 0.01, "var = {var}");
  }

  #[test]
  fn empty_shape_is_rejected() {
    assert!(matches!(
      Gn::new(0, 3).sample_seeded(1),
      Err(PricingError::InvalidInput(_))
    ));
  }
}
