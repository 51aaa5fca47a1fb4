//! # Longstaff-Schwartz backward induction
//!
//! Cash flows are seeded with the terminal payoff and rolled back one step at
//! a time:
//! $$
//! Y_t \leftarrow e^{-r\Delta t}\,Y_{t+1},\qquad
//! Y_t \leftarrow g(S_t)\ \text{ if } g(S_t) > \hat C(S_t)\ \text{ and } g(S_t)>0,
//! $$
//! where $\hat C$ is the regression estimate of the continuation value fitted on
//! in-the-money paths. Discounting happens before the decision so a freshly
//! exercised payoff is never discounted at its own exercise date.
//!
//! Source:
//! - Longstaff, F. and Schwartz, E. (2001), Valuing American options by simulation
//! - Glasserman, P. (2004), Monte Carlo Methods in Financial Engineering, ch. 8

pub mod continuation;

use ndarray::Array1;
use ndarray::ArrayView1;
use tracing::debug;
use tracing::trace;

use self::continuation::ContinuationEstimator;
use crate::error::PricingError;
use crate::error::Result;
use crate::quant::payoff::Payoff;
use crate::quant::terms::ContractTerms;
use crate::quant::OptionType;
use crate::stochastic::diffusion::gbm::PathSet;

/// First date at which the holder may exercise.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ExerciseStart {
  /// First positive timestep; the contract start only discounts.
  #[default]
  FirstStep,
  /// Contract start is also an exercise date.
  Inception,
}

impl ExerciseStart {
  fn first_step(self) -> usize {
    match self {
      ExerciseStart::FirstStep => 1,
      ExerciseStart::Inception => 0,
    }
  }
}

/// Diagnostics of one backward-induction step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
  pub step: usize,
  /// Paths with strictly positive immediate payoff.
  pub itm_paths: usize,
  pub exercised_paths: usize,
  /// Largest exercised spot for puts, smallest for calls; `None` when no path exercised.
  pub boundary: Option<f64>,
}

impl StepReport {
  fn idle(step: usize) -> Self {
    Self {
      step,
      itm_paths: 0,
      exercised_paths: 0,
      boundary: None,
    }
  }
}

#[derive(Debug, Clone)]
pub struct InductionResult {
  /// Per-path cash flow discounted to the contract start.
  pub cash_flows: Array1<f64>,
  /// Step reports in chronological order, `0..timesteps`.
  pub steps: Vec<StepReport>,
}

#[derive(Debug, Clone, Copy)]
pub struct BackwardInduction {
  pub payoff: Payoff,
  /// One-period discount factor $e^{-r\Delta t}$.
  pub step_discount: f64,
  pub exercise_start: ExerciseStart,
}

impl BackwardInduction {
  pub fn new(payoff: Payoff, step_discount: f64, exercise_start: ExerciseStart) -> Self {
    Self {
      payoff,
      step_discount,
      exercise_start,
    }
  }

  /// Engine for the contract, discounting with `terms.step_discount()`.
  pub fn from_terms(
    terms: &ContractTerms,
    option_type: OptionType,
    exercise_start: ExerciseStart,
  ) -> Self {
    Self::new(
      Payoff::new(option_type, terms.strike),
      terms.step_discount(),
      exercise_start,
    )
  }

  pub fn run(&self, paths: &PathSet) -> Result<InductionResult> {
    let disc = self.step_discount;
    if !(disc.is_finite() && disc > 0.0) {
      return Err(PricingError::InvalidInput(format!(
        "step discount must be finite and positive, got {disc}"
      )));
    }

    let timesteps = paths.timesteps();
    let estimator = ContinuationEstimator::new(self.payoff.strike)?;
    let first = self.exercise_start.first_step();

    let mut flows = self.payoff.evaluate(&paths.terminal());
    let mut steps = Vec::with_capacity(timesteps);

    for t in (0..timesteps).rev() {
      let report = if t >= first {
        self.exercise_step(t, paths.column(t), &mut flows, &estimator)?
      } else {
        flows.mapv_inplace(|f| f * disc);
        StepReport::idle(t)
      };
      trace!(
        step = report.step,
        itm = report.itm_paths,
        exercised = report.exercised_paths,
        boundary = ?report.boundary,
        "lsm step"
      );
      steps.push(report);
    }
    steps.reverse();

    debug!(
      paths = paths.path_count(),
      timesteps,
      exercised = steps.iter().map(|s| s.exercised_paths).sum::<usize>(),
      "backward induction finished"
    );

    Ok(InductionResult {
      cash_flows: flows,
      steps,
    })
  }

  /// Discount `flows` by one period, then exercise every in-the-money path
  /// whose immediate payoff beats its estimated continuation value.
  pub fn exercise_step(
    &self,
    step: usize,
    prices: ArrayView1<'_, f64>,
    flows: &mut Array1<f64>,
    estimator: &ContinuationEstimator,
  ) -> Result<StepReport> {
    if prices.len() != flows.len() {
      return Err(PricingError::InvalidInput(format!(
        "{} prices but {} cash flows at step {step}",
        prices.len(),
        flows.len()
      )));
    }

    let disc = self.step_discount;
    flows.mapv_inplace(|f| f * disc);

    let itm = prices
      .iter()
      .enumerate()
      .filter(|&(_, &s)| self.payoff.is_in_the_money(s))
      .map(|(i, _)| i)
      .collect::<Vec<_>>();

    let x = itm.iter().map(|&i| prices[i]).collect::<Vec<_>>();
    let y = itm.iter().map(|&i| flows[i]).collect::<Vec<_>>();
    let Some(continuation) = estimator.estimate(&x, &y)? else {
      return Ok(StepReport::idle(step));
    };

    let mut exercised = 0;
    let mut boundary: Option<f64> = None;
    for ((&i, &s), &c) in itm.iter().zip(x.iter()).zip(continuation.iter()) {
      let exercise = self.payoff.intrinsic(s);
      if exercise > c {
        flows[i] = exercise;
        exercised += 1;
        boundary = Some(match (self.payoff.option_type, boundary) {
          (_, None) => s,
          (OptionType::Put, Some(b)) => b.max(s),
          (OptionType::Call, Some(b)) => b.min(s),
        });
      }
    }

    Ok(StepReport {
      step,
      itm_paths: itm.len(),
      exercised_paths: exercised,
      boundary,
    })
  }
}
