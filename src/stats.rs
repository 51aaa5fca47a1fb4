//! # Stats
//!
//! $$
//! \hat\beta=\arg\min_\beta\lVert X\beta-y\rVert_2,\qquad
//! \hat\mu=\tfrac1N\textstyle\sum_i Y_i
//! $$
//!
pub mod estimate_pi;
pub mod ols;
pub mod summary;
