//! # stochastic-lsm
//!
//! $$
//! V_0=\sup_{\tau\in\{t_1,\dots,t_n\}}\mathbb E^{\mathbb Q}\!\left[e^{-r\tau}g(S_\tau)\right]
//! $$
//!
//! Monte Carlo pricing of early-exercise options with the Longstaff-Schwartz
//! least-squares method on risk-neutral geometric Brownian motion.
//!
//! | Module         | Description                                                        |
//! |----------------|--------------------------------------------------------------------|
//! | [`stochastic`] | Path simulation (GBM) and Gaussian noise.                          |
//! | [`quant`]      | Contract terms, payoffs and pricers (American, European, Asian).   |
//! | [`stats`]      | SVD least squares, Monte Carlo summaries, the $\pi$ estimator.     |
//! | [`traits`]     | Sampling and pricing contracts.                                    |
//! | [`error`]      | Error taxonomy.                                                    |
//!
//! ```ignore
//! use stochastic_lsm::quant::pricing::american::price_early_exercise_option;
//! use stochastic_lsm::quant::terms::ContractTerms;
//! use stochastic_lsm::quant::OptionType;
//!
//! let terms = ContractTerms::new(100.0, 0.2, 0.04, 1.0, 100.0, 20)?;
//! let put = price_early_exercise_option(&terms, OptionType::Put, 10_000)?;
//! ```

pub mod error;
pub mod quant;
pub mod stats;
pub mod stochastic;
pub mod traits;

pub use error::PricingError;
pub use quant::pricing::american::price_early_exercise_option;
pub use quant::pricing::american::price_early_exercise_option_with_rng;
pub use quant::terms::ContractTerms;
pub use quant::OptionType;
