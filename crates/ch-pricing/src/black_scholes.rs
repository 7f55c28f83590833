//! Closed-form Black-Scholes reference formula.
//!
//! Used by the check harness and the console to compare the Chernoff
//! approximation against the analytic price when both coefficients are
//! constant. Not part of the numerical core.

use crate::payoff::OptionType;
use ch_core::{Rate, Real, Time, Volatility};
use ch_math::normal_cdf;

/// Closed-form Black-Scholes price of a European option.
///
/// $$C = S N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S N(-d_1)$$
///
/// where $d_{1,2} = \frac{\ln(S/K) + (r \pm \sigma^2/2)T}{\sigma\sqrt{T}}$.
///
/// Expired or zero-volatility options collapse to their discounted intrinsic
/// value.
pub fn black_scholes_price(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    rate: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Real {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 {
        return (phi * (spot - strike)).max(0.0);
    }

    let df = (-rate * t).exp();
    let std_dev = volatility * t.sqrt();

    if std_dev <= 1e-15 {
        return (phi * (spot - strike * df)).max(0.0);
    }

    let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * t) / std_dev;
    let d2 = d1 - std_dev;

    phi * (spot * normal_cdf(phi * d1) - strike * df * normal_cdf(phi * d2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atm_call_price() {
        // S=100, K=100, r=5%, σ=20%, T=1
        let price = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.05, 0.20, 1.0);
        assert!((price - 10.4506).abs() < 0.01, "price = {price}");
    }

    #[test]
    fn atm_put_price() {
        let price = black_scholes_price(OptionType::Put, 100.0, 100.0, 0.05, 0.20, 1.0);
        assert!((price - 5.5735).abs() < 0.01, "price = {price}");
    }

    #[test]
    fn put_call_parity_is_exact() {
        let call = black_scholes_price(OptionType::Call, 100.0, 105.0, 0.08, 0.25, 0.5);
        let put = black_scholes_price(OptionType::Put, 100.0, 105.0, 0.08, 0.25, 0.5);
        let parity = 100.0 - 105.0 * (-0.08_f64 * 0.5).exp();
        assert!((call - put - parity).abs() < 1e-6, "call={call}, put={put}");
    }

    #[test]
    fn deep_itm_call_approaches_forward_intrinsic() {
        let price = black_scholes_price(OptionType::Call, 200.0, 100.0, 0.05, 0.20, 1.0);
        let lower = 200.0 - 100.0 * (-0.05_f64).exp();
        assert!(price > lower - 0.01 && price < 110.0, "price = {price}");
    }

    #[test]
    fn zero_vol_call_is_discounted_intrinsic() {
        let price = black_scholes_price(OptionType::Call, 100.0, 95.0, 0.05, 0.0, 1.0);
        let expected = 100.0 - 95.0 * (-0.05_f64).exp();
        approx::assert_abs_diff_eq!(price, expected, epsilon = 1e-10);
    }

    #[test]
    fn expired_option_is_intrinsic() {
        let price = black_scholes_price(OptionType::Put, 90.0, 100.0, 0.05, 0.20, 0.0);
        assert_eq!(price, 10.0);
    }
}
