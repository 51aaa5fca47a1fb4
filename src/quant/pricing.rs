//! # Pricing
//!
//! $$
//! V_0=\sup_{\tau}\mathbb E^{\mathbb Q}\!\left[e^{-r\tau}\,\Pi(S_\tau)\right]
//! $$
//!
//! | Module                | Method                                              |
//! |-----------------------|-----------------------------------------------------|
//! | [`american`]          | Least-squares Monte Carlo, early exercise           |
//! | [`lsm`]               | Backward induction and continuation regression      |
//! | [`european`]          | Monte Carlo on the terminal distribution            |
//! | [`asian`]             | Monte Carlo on the path average                     |
//! | [`bsm`]               | Black-Scholes closed form                           |
//! | [`finite_difference`] | Bump-and-reprice delta                              |
pub mod american;
pub mod asian;
pub mod bsm;
pub mod european;
pub mod finite_difference;
pub mod lsm;
