//! # Geometric Brownian Motion
//!
//! Exact log-Euler recursion under the risk-neutral measure:
//! $$
//! S_{t}=S_{t-1}\exp\!\left(\left(r-\tfrac12\sigma^2\right)\Delta t+\sigma\sqrt{\Delta t}\,Z_{t-1}\right),
//! \qquad S_0=s_0.
//! $$
//!
use impl_new_derive::ImplNew;
use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView1;
use ndarray::ArrayView2;
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::StandardNormal;
use tracing::debug;

use crate::error::PricingError;
use crate::error::Result;
use crate::quant::terms::ContractTerms;
use crate::stochastic::noise::gn::Gn;
use crate::traits::ProcessExt;

/// Simulated price trajectories, one row per path and `timesteps + 1` columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PathSet {
  paths: Array2<f64>,
  dt: f64,
}

impl PathSet {
  /// Wrap an existing price matrix. Every price must be finite and non-negative.
  pub fn from_prices(paths: Array2<f64>, dt: f64) -> Result<Self> {
    let (m, cols) = paths.dim();
    if m == 0 || cols < 2 {
      return Err(PricingError::InvalidInput(format!(
        "path set needs at least one path and one step, got {m}x{cols}"
      )));
    }
    if !(dt.is_finite() && dt > 0.0) {
      return Err(PricingError::InvalidInput(format!(
        "step length must be finite and positive, got {dt}"
      )));
    }
    if paths.iter().any(|p| !p.is_finite() || *p < 0.0) {
      return Err(PricingError::InvalidInput(
        "prices must be finite and non-negative".to_string(),
      ));
    }
    Ok(Self { paths, dt })
  }

  pub fn path_count(&self) -> usize {
    self.paths.nrows()
  }

  pub fn timesteps(&self) -> usize {
    self.paths.ncols() - 1
  }

  pub fn dt(&self) -> f64 {
    self.dt
  }

  /// Prices of every path at step `t`.
  pub fn column(&self, t: usize) -> ArrayView1<'_, f64> {
    self.paths.column(t)
  }

  /// Prices at expiry.
  pub fn terminal(&self) -> ArrayView1<'_, f64> {
    self.paths.column(self.timesteps())
  }

  pub fn prices(&self) -> ArrayView2<'_, f64> {
    self.paths.view()
  }
}

#[derive(ImplNew, Debug, Clone, Copy)]
pub struct GBM {
  /// Drift (risk-free rate under $\mathbb Q$)
  pub mu: f64,
  /// Volatility
  pub sigma: f64,
  /// Number of timesteps
  pub n: usize,
  /// Initial value
  pub x0: f64,
  /// Horizon in years
  pub t: f64,
  /// Number of paths
  pub m: usize,
}

impl GBM {
  /// Risk-neutral dynamics implied by a set of contract terms.
  pub fn from_terms(terms: &ContractTerms, m: usize) -> Self {
    Self::new(
      terms.rf_rate,
      terms.volatility,
      terms.timesteps,
      terms.initial_price,
      terms.time,
      m,
    )
  }

  pub fn dt(&self) -> f64 {
    self.t / self.n as f64
  }

  fn validate(&self) -> Result<()> {
    if self.n < 1 {
      return Err(PricingError::InvalidInput(
        "timesteps must be at least 1".to_string(),
      ));
    }
    if self.m < 1 {
      return Err(PricingError::InvalidInput(
        "path count must be at least 1".to_string(),
      ));
    }
    let finite = [self.mu, self.sigma, self.x0, self.t];
    if finite.iter().any(|v| !v.is_finite()) {
      return Err(PricingError::InvalidInput(
        "GBM parameters must be finite".to_string(),
      ));
    }
    if self.sigma <= 0.0 || self.x0 <= 0.0 || self.t <= 0.0 {
      return Err(PricingError::InvalidInput(
        "sigma, x0 and t must be strictly positive".to_string(),
      ));
    }
    Ok(())
  }

  /// Terminal prices only, drawn from the one-shot solution
  /// $S_T=s_0\exp((\mu-\tfrac12\sigma^2)T+\sigma\sqrt T Z)$.
  pub fn sample_terminal_using<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Array1<f64>> {
    self.validate()?;
    let drift = (self.mu - 0.5 * self.sigma.powi(2)) * self.t;
    let diffusion = self.sigma * self.t.sqrt();
    let z = Array1::<f64>::random_using(self.m, StandardNormal, rng);

    Ok(z.mapv(|z| self.x0 * (drift + diffusion * z).exp()))
  }
}

impl ProcessExt for GBM {
  type Output = PathSet;

  /// Sample `m` independent paths of `n + 1` prices each.
  fn sample_using<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PathSet> {
    self.validate()?;
    debug!(paths = self.m, timesteps = self.n, "simulating GBM paths");

    let dt = self.dt();
    let drift = (self.mu - 0.5 * self.sigma.powi(2)) * dt;
    let diffusion = self.sigma * dt.sqrt();
    let z = Gn::new(self.m, self.n).sample_using(rng)?;

    let mut paths = Array2::<f64>::zeros((self.m, self.n + 1));
    for (mut path, z) in paths.outer_iter_mut().zip(z.outer_iter()) {
      path[0] = self.x0;
      for t in 1..=self.n {
        path[t] = path[t - 1] * (drift + diffusion * z[t - 1]).exp();
      }
    }

    PathSet::from_prices(paths, dt)
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use ndarray::array;

  use super::*;
  use crate::stochastic::M;
  use crate::stochastic::N;
  use crate::stochastic::S0;

  fn gbm(m: usize, n: usize) -> GBM {
    GBM::new(0.04, 0.2, n, S0, 1.0, m)
  }

  #[test]
  fn gbm_shape_is_m_by_n_plus_one() {
    let paths = gbm(M, N).sample_seeded(1).unwrap();
    assert_eq!(paths.path_count(), M);
    assert_eq!(paths.timesteps(), N);
    assert_relative_eq!(paths.dt(), 1.0 / N as f64);
  }

  #[test]
  fn gbm_starts_with_x0() {
    let paths = gbm(1_000, N).sample_seeded(2).unwrap();
    assert!(paths.column(0).iter().all(|&s| s == S0));
  }

  #[test]
  fn gbm_prices_are_positive() {
    let paths = GBM::new(0.04, 1.5, 50, S0, 5.0, 2_000)
      .sample_seeded(3)
      .unwrap();
    assert!(paths.prices().iter().all(|&s| s > 0.0));
  }

  #[test]
  fn gbm_discounted_mean_is_martingale() {
    let g = gbm(100_000, 4);
    let paths = g.sample_seeded(4).unwrap();
    let mean = paths.terminal().mean().unwrap() * (-g.mu * g.t).exp();
    // std error of S_T is about 0.07 at 100k paths
    assert!((mean - S0).abs() < 0.35, "discounted mean = {mean}");
  }

  #[test]
  fn terminal_sampler_matches_path_sampler_in_mean() {
    let g = gbm(100_000, 10);
    let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(5);
    let terminal = g.sample_terminal_using(&mut rng).unwrap();
    let paths = g.sample_seeded(6).unwrap();
    let diff = terminal.mean().unwrap() - paths.terminal().mean().unwrap();
    assert!(diff.abs() < 0.5, "diff = {diff}");
  }

  #[test]
  fn same_seed_same_paths() {
    let g = gbm(256, N);
    assert_eq!(g.sample_seeded(9).unwrap(), g.sample_seeded(9).unwrap());
  }

  #[test]
  fn zero_counts_fail_fast() {
    assert!(matches!(
      gbm(0, N).sample_seeded(1),
      Err(PricingError::InvalidInput(_))
    ));
    assert!(matches!(
      gbm(10, 0).sample_seeded(1),
      Err(PricingError::InvalidInput(_))
    ));
  }

  #[test]
  fn from_prices_rejects_negative_prices() {
    let prices = array![[100.0, -1.0], [100.0, 101.0]];
    assert!(PathSet::from_prices(prices, 0.5).is_err());
  }
}
