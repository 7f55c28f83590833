//! Console for the Chernoff option pricing engine.
//!
//! Gathers pricing parameters from the command line, calls the pricing entry
//! points, and formats a report with the price, moneyness, intrinsic/time
//! value, and elapsed time.
//!
//! # Examples
//!
//! ```bash
//! chernoff price --option-type call --spot 100 --strike 100 --maturity 1.0 \
//!     --sigma 0.2 --rate 0.05
//! chernoff price --option-type put --spot 100 --strike 110 --maturity 0.5 \
//!     --sigma 0.25 --rate 0.03 --adaptive --tolerance 1e-4 --format json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;

pub use error::{CliError, Result};

use commands::price::{OutputFormat, PriceParams};

/// Chernoff approximation option pricing engine
#[derive(Parser)]
#[command(name = "chernoff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Option type accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OptionKind {
    /// European call
    Call,
    /// European put
    Put,
}

impl From<OptionKind> for chernoff::pricing::OptionType {
    fn from(kind: OptionKind) -> Self {
        match kind {
            OptionKind::Call => chernoff::pricing::OptionType::Call,
            OptionKind::Put => chernoff::pricing::OptionType::Put,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option with the Chernoff evolution engine
    Price {
        /// Option type
        #[arg(short = 't', long, value_enum)]
        option_type: OptionKind,

        /// Current asset price S₀
        #[arg(short, long)]
        spot: f64,

        /// Strike price K
        #[arg(short = 'k', long)]
        strike: f64,

        /// Time to maturity in years
        #[arg(short, long)]
        maturity: f64,

        /// Base volatility σ (or σ₀ with --sigma-amplitude)
        #[arg(long)]
        sigma: f64,

        /// Local-volatility amplitude σ₁ in σ(S) = σ₀ + σ₁·sin(S/S₀)
        #[arg(long)]
        sigma_amplitude: Option<f64>,

        /// Base interest rate r (or r₀ with --rate-slope)
        #[arg(long)]
        rate: f64,

        /// Variable-rate slope r₁ in r(S) = r₀ + r₁·(S/S₀ − 1)
        #[arg(long)]
        rate_slope: Option<f64>,

        /// Use adaptive error control instead of a fixed iteration count
        #[arg(short, long)]
        adaptive: bool,

        /// Chernoff iteration count for fixed runs
        #[arg(long, default_value = "1000")]
        steps: usize,

        /// Error tolerance for adaptive runs
        #[arg(long, default_value = "1e-4")]
        tolerance: f64,

        /// Iteration cap for adaptive runs
        #[arg(long, default_value = "8192")]
        max_iterations: usize,

        /// Number of mesh points
        #[arg(long, default_value = "500")]
        grid_size: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Price {
            option_type,
            spot,
            strike,
            maturity,
            sigma,
            sigma_amplitude,
            rate,
            rate_slope,
            adaptive,
            steps,
            tolerance,
            max_iterations,
            grid_size,
            format,
        } => commands::price::run(PriceParams {
            option_type: option_type.into(),
            spot,
            strike,
            maturity,
            sigma,
            sigma_amplitude,
            rate,
            rate_slope,
            adaptive,
            steps,
            tolerance,
            max_iterations,
            grid_size,
            format,
        }),
    }
}
