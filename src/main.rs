use anyhow::Context;
use anyhow::Result;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use prettytable::row;
use prettytable::Table;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stochastic_lsm::quant::pricing::american::AmericanPricer;
use stochastic_lsm::quant::pricing::asian::AsianPricer;
use stochastic_lsm::quant::pricing::asian::Averaging;
use stochastic_lsm::quant::pricing::bsm::BSMPricer;
use stochastic_lsm::quant::pricing::european::EuropeanPricer;
use stochastic_lsm::quant::pricing::finite_difference::forward_delta;
use stochastic_lsm::quant::pricing::lsm::ExerciseStart;
use stochastic_lsm::quant::terms::ContractTerms;
use stochastic_lsm::quant::MonteCarloEstimate;
use stochastic_lsm::quant::OptionStyle;
use stochastic_lsm::quant::OptionType;
use stochastic_lsm::stats::estimate_pi::estimate_pi;
use stochastic_lsm::stochastic::K;
use stochastic_lsm::stochastic::M;
use stochastic_lsm::stochastic::N;
use stochastic_lsm::stochastic::S0;
use stochastic_lsm::traits::PricerExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Monte Carlo option pricing with least-squares early exercise
#[derive(Parser)]
#[command(name = "lsm", version, about)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Price an American option with least-squares Monte Carlo
  American(AmericanArgs),
  /// Price a European option by Monte Carlo next to the Black-Scholes value
  European(EuropeanArgs),
  /// Price an Asian (average price) option by Monte Carlo
  Asian(AsianArgs),
  /// Bump-and-reprice delta of an American option
  Delta(DeltaArgs),
  /// Estimate pi by sampling the unit square
  Pi(PiArgs),
}

#[derive(Args, Clone, Copy)]
struct TermsArgs {
  /// Strike price
  #[arg(long, default_value_t = K)]
  strike: f64,
  /// Volatility
  #[arg(long, default_value_t = 0.2)]
  volatility: f64,
  /// Continuously compounded risk-free rate
  #[arg(long, default_value_t = 0.04, allow_negative_numbers = true)]
  rate: f64,
  /// Time to maturity in years
  #[arg(long, default_value_t = 1.0)]
  time: f64,
  /// Spot price at the contract start
  #[arg(long, default_value_t = S0)]
  initial_price: f64,
  /// Number of exercise dates / simulation steps
  #[arg(long, default_value_t = N)]
  timesteps: usize,
}

impl TermsArgs {
  fn terms(&self) -> Result<ContractTerms> {
    ContractTerms::new(
      self.strike,
      self.volatility,
      self.rate,
      self.time,
      self.initial_price,
      self.timesteps,
    )
    .context("invalid contract terms")
  }
}

#[derive(Args, Clone, Copy)]
struct SimulationArgs {
  /// Number of simulated paths
  #[arg(long, default_value_t = M)]
  paths: usize,
  /// Seed for reproducible runs
  #[arg(long)]
  seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
  Call,
  Put,
}

impl From<Kind> for OptionType {
  fn from(kind: Kind) -> Self {
    match kind {
      Kind::Call => OptionType::Call,
      Kind::Put => OptionType::Put,
    }
  }
}

#[derive(Clone, Copy, ValueEnum)]
enum Start {
  FirstStep,
  Inception,
}

impl From<Start> for ExerciseStart {
  fn from(start: Start) -> Self {
    match start {
      Start::FirstStep => ExerciseStart::FirstStep,
      Start::Inception => ExerciseStart::Inception,
    }
  }
}

#[derive(Clone, Copy, ValueEnum)]
enum Mean {
  Arithmetic,
  Geometric,
}

impl From<Mean> for Averaging {
  fn from(mean: Mean) -> Self {
    match mean {
      Mean::Arithmetic => Averaging::Arithmetic,
      Mean::Geometric => Averaging::Geometric,
    }
  }
}

#[derive(Args)]
struct AmericanArgs {
  #[command(flatten)]
  terms: TermsArgs,
  #[command(flatten)]
  sim: SimulationArgs,
  #[arg(long, value_enum, default_value_t = Kind::Put)]
  kind: Kind,
  /// First exercise date
  #[arg(long, value_enum, default_value_t = Start::FirstStep)]
  exercise_start: Start,
  /// Print the estimated exercise boundary per step
  #[arg(long)]
  boundary: bool,
}

#[derive(Args)]
struct EuropeanArgs {
  #[command(flatten)]
  terms: TermsArgs,
  #[command(flatten)]
  sim: SimulationArgs,
  #[arg(long, value_enum, default_value_t = Kind::Call)]
  kind: Kind,
}

#[derive(Args)]
struct AsianArgs {
  #[command(flatten)]
  terms: TermsArgs,
  #[command(flatten)]
  sim: SimulationArgs,
  #[arg(long, value_enum, default_value_t = Kind::Call)]
  kind: Kind,
  #[arg(long, value_enum, default_value_t = Mean::Arithmetic)]
  averaging: Mean,
}

#[derive(Args)]
struct DeltaArgs {
  #[command(flatten)]
  terms: TermsArgs,
  #[command(flatten)]
  sim: SimulationArgs,
  #[arg(long, value_enum, default_value_t = Kind::Call)]
  kind: Kind,
  /// Relative bump of the initial price
  #[arg(long, default_value_t = 0.01)]
  bump: f64,
}

#[derive(Args)]
struct PiArgs {
  #[arg(long, default_value_t = 100_000)]
  samples: usize,
  #[arg(long)]
  seed: Option<u64>,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  match Cli::parse().command {
    Commands::American(args) => run_american(args),
    Commands::European(args) => run_european(args),
    Commands::Asian(args) => run_asian(args),
    Commands::Delta(args) => run_delta(args),
    Commands::Pi(args) => run_pi(args),
  }
}

fn estimate_table(
  style: OptionStyle,
  option_type: OptionType,
  estimate: &MonteCarloEstimate,
) -> Table {
  let mut table = Table::new();
  table.set_titles(row!["Style", "Type", "Price", "Std. error", "Paths"]);
  table.add_row(row![
    format!("{style:?}"),
    option_type,
    format!("{:.6}", estimate.price),
    format!("{:.6}", estimate.std_error),
    estimate.paths
  ]);
  table
}

fn run_american(args: AmericanArgs) -> Result<()> {
  let terms = args.terms.terms()?;
  let option_type = args.kind.into();
  let pricer = AmericanPricer::new(
    terms,
    option_type,
    args.sim.paths,
    args.sim.seed,
    args.exercise_start.into(),
  );
  let output = pricer
    .price_with_boundary()
    .context("american pricing failed")?;
  info!(price = output.estimate.price, "american option priced");

  estimate_table(OptionStyle::American, option_type, &output.estimate).printstd();

  if args.boundary {
    let mut table = Table::new();
    table.set_titles(row!["Step", "Time", "ITM paths", "Exercised", "Boundary"]);
    for step in &output.steps {
      table.add_row(row![
        step.step,
        format!("{:.4}", step.step as f64 * terms.dt()),
        step.itm_paths,
        step.exercised_paths,
        step
          .boundary
          .map_or_else(|| "-".to_string(), |b| format!("{b:.4}"))
      ]);
    }
    table.printstd();
  }
  Ok(())
}

fn run_european(args: EuropeanArgs) -> Result<()> {
  let terms = args.terms.terms()?;
  let option_type = args.kind.into();
  let estimate = EuropeanPricer::new(terms, option_type, args.sim.paths, args.sim.seed)
    .estimate()
    .context("european pricing failed")?;
  let closed_form = BSMPricer::from_terms(&terms, option_type).calculate_price()?;

  let mut table = estimate_table(OptionStyle::European, option_type, &estimate);
  table.add_row(row![
    "Black-Scholes",
    option_type,
    format!("{closed_form:.6}"),
    "-",
    "-"
  ]);
  table.printstd();
  Ok(())
}

fn run_asian(args: AsianArgs) -> Result<()> {
  let terms = args.terms.terms()?;
  let option_type = args.kind.into();
  let estimate = AsianPricer::new(
    terms,
    option_type,
    args.averaging.into(),
    args.sim.paths,
    args.sim.seed,
  )
  .estimate()
  .context("asian pricing failed")?;

  estimate_table(OptionStyle::Asian, option_type, &estimate).printstd();
  Ok(())
}

fn run_delta(args: DeltaArgs) -> Result<()> {
  let terms = args.terms.terms()?;
  let option_type: OptionType = args.kind.into();
  // common random numbers for both valuations
  let seed = args.sim.seed.unwrap_or_else(rand::random::<u64>);

  let delta = forward_delta(&terms, args.bump, |t| {
    AmericanPricer::new(
      *t,
      option_type,
      args.sim.paths,
      Some(seed),
      ExerciseStart::FirstStep,
    )
    .calculate_price()
  })
  .context("delta computation failed")?;

  let mut table = Table::new();
  table.set_titles(row!["Type", "Bump", "Delta", "Seed"]);
  table.add_row(row![option_type, args.bump, format!("{delta:.6}"), seed]);
  table.printstd();
  Ok(())
}

fn run_pi(args: PiArgs) -> Result<()> {
  let mut rng = match args.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  };
  let pi = estimate_pi(args.samples, &mut rng)?;

  let mut table = Table::new();
  table.set_titles(row!["Samples", "Estimate", "Error"]);
  table.add_row(row![
    args.samples,
    format!("{pi:.6}"),
    format!("{:.6}", (pi - std::f64::consts::PI).abs())
  ]);
  table.printstd();
  Ok(())
}
