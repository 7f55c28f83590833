//! Price command implementation.
//!
//! Builds the volatility and rate functions from the command-line choices,
//! runs the requested pricing mode, and formats the report.

use std::time::Instant;

use clap::ValueEnum;
use serde::Serialize;
use tracing::info;

use chernoff::pricing::{
    black_scholes_price, constant_rate, constant_volatility, local_volatility, price_option,
    price_option_adaptive, variable_rate, OptionType,
};

use crate::Result;

/// Report output format.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// Machine-readable JSON
    Json,
}

/// Validated parameters for a pricing run.
pub struct PriceParams {
    /// Option type.
    pub option_type: OptionType,
    /// Current asset price.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to maturity in years.
    pub maturity: f64,
    /// Base volatility.
    pub sigma: f64,
    /// Local-volatility amplitude, if any.
    pub sigma_amplitude: Option<f64>,
    /// Base interest rate.
    pub rate: f64,
    /// Variable-rate slope, if any.
    pub rate_slope: Option<f64>,
    /// Adaptive mode flag.
    pub adaptive: bool,
    /// Iteration count for fixed runs.
    pub steps: usize,
    /// Tolerance for adaptive runs.
    pub tolerance: f64,
    /// Iteration cap for adaptive runs.
    pub max_iterations: usize,
    /// Mesh points.
    pub grid_size: usize,
    /// Output format.
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct PriceReport {
    option_type: String,
    spot: f64,
    strike: f64,
    maturity: f64,
    price: f64,
    moneyness: f64,
    moneyness_class: String,
    intrinsic_value: f64,
    time_value: f64,
    /// Closed-form price; only present when both coefficients are constant.
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimated_error: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iterations: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    converged: Option<bool>,
    elapsed_ms: u128,
}

/// Run the price command.
pub fn run(params: PriceParams) -> Result<()> {
    let volatility: Box<dyn Fn(f64) -> f64> = match params.sigma_amplitude {
        Some(amplitude) => {
            info!(
                "Using local volatility σ(S) = {} + {}·sin(S/{})",
                params.sigma, amplitude, params.spot
            );
            Box::new(local_volatility(params.sigma, amplitude, params.spot))
        }
        None => Box::new(constant_volatility(params.sigma)),
    };

    let rate: Box<dyn Fn(f64) -> f64> = match params.rate_slope {
        Some(slope) => {
            info!(
                "Using variable rate r(S) = {} + {}·(S/{} − 1)",
                params.rate, slope, params.spot
            );
            Box::new(variable_rate(params.rate, slope, params.spot))
        }
        None => Box::new(constant_rate(params.rate)),
    };

    let started = Instant::now();

    let (price, estimated_error, iterations, converged) = if params.adaptive {
        let result = price_option_adaptive(
            params.option_type,
            params.spot,
            params.strike,
            params.maturity,
            volatility,
            rate,
            params.tolerance,
            params.max_iterations,
            params.grid_size,
        )?;
        (
            result.price,
            Some(result.estimated_error),
            Some(result.iterations),
            Some(result.converged),
        )
    } else {
        let price = price_option(
            params.option_type,
            params.spot,
            params.strike,
            params.maturity,
            volatility,
            rate,
            params.steps,
            params.grid_size,
        )?;
        (price, None, Some(params.steps), None)
    };

    let elapsed = started.elapsed();

    let constant_coefficients = params.sigma_amplitude.is_none() && params.rate_slope.is_none();
    let reference_price = constant_coefficients.then(|| {
        black_scholes_price(
            params.option_type,
            params.spot,
            params.strike,
            params.rate,
            params.sigma,
            params.maturity,
        )
    });

    let moneyness = params.spot / params.strike;
    let intrinsic_value =
        (params.option_type.sign() * (params.spot - params.strike)).max(0.0);

    let report = PriceReport {
        option_type: params.option_type.to_string(),
        spot: params.spot,
        strike: params.strike,
        maturity: params.maturity,
        price,
        moneyness,
        moneyness_class: moneyness_class(params.option_type, moneyness).to_string(),
        intrinsic_value,
        time_value: price - intrinsic_value,
        reference_price,
        estimated_error,
        iterations,
        converged,
        elapsed_ms: elapsed.as_millis(),
    };

    match params.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_table(&report),
    }

    Ok(())
}

/// In/at/out-of-the-money classification at the 0.95 / 1.05 thresholds.
fn moneyness_class(option_type: OptionType, moneyness: f64) -> &'static str {
    if moneyness > 1.05 {
        match option_type {
            OptionType::Call => "In-the-money",
            OptionType::Put => "Out-of-the-money",
        }
    } else if moneyness < 0.95 {
        match option_type {
            OptionType::Call => "Out-of-the-money",
            OptionType::Put => "In-the-money",
        }
    } else {
        "At-the-money"
    }
}

fn print_table(report: &PriceReport) {
    println!("┌───────────────────────────────────────────────┐");
    println!("│            OPTION PRICING RESULTS             │");
    println!("├───────────────────────────────────────────────┤");
    println!("│ Option type:       {:>26} │", report.option_type);
    println!("│ Spot (S₀):         {:>26.4} │", report.spot);
    println!("│ Strike (K):        {:>26.4} │", report.strike);
    println!("│ Maturity (years):  {:>26.4} │", report.maturity);
    println!("├───────────────────────────────────────────────┤");
    println!("│ PRICE:             {:>26.4} │", report.price);
    if let Some(reference) = report.reference_price {
        println!("│ Black-Scholes ref: {:>26.4} │", reference);
    }
    if let Some(error) = report.estimated_error {
        println!("│ Estimated error:   {:>26.6e} │", error);
    }
    if let Some(iterations) = report.iterations {
        println!("│ Iterations:        {:>26} │", iterations);
    }
    if let Some(converged) = report.converged {
        println!(
            "│ Converged:         {:>26} │",
            if converged { "yes" } else { "no" }
        );
    }
    println!("│ Elapsed:           {:>23} ms │", report.elapsed_ms);
    println!("└───────────────────────────────────────────────┘");
    println!();
    println!(
        "  Moneyness (S₀/K):  {:.4} ({})",
        report.moneyness, report.moneyness_class
    );
    println!("  Intrinsic value:   {:.4}", report.intrinsic_value);
    println!("  Time value:        {:.4}", report.time_value);
}
