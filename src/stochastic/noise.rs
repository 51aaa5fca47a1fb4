//! # Noise
//!
//! $$
//! Z_{i,j}\overset{\text{iid}}{\sim}\mathcal N(0,1)
//! $$
//!
pub mod gn;
