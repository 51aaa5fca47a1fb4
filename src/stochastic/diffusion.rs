//! # Diffusion
//!
//! $$
//! dS_t=rS_tdt+\sigma S_tdW_t
//! $$
//!
pub mod gbm;
