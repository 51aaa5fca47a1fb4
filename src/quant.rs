use std::fmt::Display;

pub mod payoff;
pub mod pricing;
pub mod terms;

/// Option type.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum OptionType {
  #[default]
  Call,
  Put,
}

impl Display for OptionType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      OptionType::Call => write!(f, "Call"),
      OptionType::Put => write!(f, "Put"),
    }
  }
}

/// Option style.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum OptionStyle {
  /// Exercisable at every simulated timestep.
  American,
  #[default]
  European,
  /// Payoff written on the average price along the path.
  Asian,
}

/// Summary of a Monte Carlo price estimate.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct MonteCarloEstimate {
  /// Present value
  pub price: f64,
  /// Standard error of the sample mean
  pub std_error: f64,
  /// Number of simulated paths
  pub paths: usize,
}
