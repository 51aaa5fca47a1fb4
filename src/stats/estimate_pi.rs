//! # Area sampling estimate of $\pi$
//!
//! $$
//! \hat\pi = \frac4N\sum_{i=1}^N \mathbf 1\{U_i^2+V_i^2<1\},\qquad U_i,V_i\sim\mathcal U(0,1)
//! $$
//!
use rand::Rng;

use crate::error::PricingError;
use crate::error::Result;

pub fn estimate_pi<R: Rng + ?Sized>(samples: usize, rng: &mut R) -> Result<f64> {
  if samples == 0 {
    return Err(PricingError::InvalidInput(
      "sample count must be at least 1".to_string(),
    ));
  }

  let inside = (0..samples)
    .filter(|_| {
      let x: f64 = rng.gen();
      let y: f64 = rng.gen();
      x * x + y * y < 1.0
    })
    .count();

  Ok(4.0 * inside as f64 / samples as f64)
}
