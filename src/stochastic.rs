//! # Stochastic Process Simulation Modules
//!
//! | Module            | Description                                                        |
//! |-------------------|--------------------------------------------------------------------|
//! | [`diffusion`]     | Geometric Brownian motion price paths under the risk-neutral measure. |
//! | [`noise`]         | Gaussian noise generators feeding the diffusions.                  |
//!
//! All samplers take the random source from the caller so that runs can be
//! reproduced with `StdRng::seed_from_u64`.

pub mod diffusion;
pub mod noise;

pub use crate::traits::ProcessExt;

/// Default number of time steps
pub const N: usize = 20;
/// Default spot price for financial models
pub const S0: f64 = 100.0;
/// Default strike price
pub const K: f64 = 100.0;
/// Default number of Monte Carlo paths
pub const M: usize = 10_000;
