//! Option types and payoff functions.
//!
//! Payoffs describe the terminal value of an option as a function of the
//! underlying asset price. The evolution engine consumes them as plain
//! callables; the types here are the builders the pricing entry points use.

use ch_core::{Price, Real};
use std::fmt;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// Base trait for option payoffs.
pub trait Payoff: fmt::Debug + Send + Sync {
    /// Compute the payoff given the underlying price at expiry.
    fn value(&self, price: Price) -> Real;
}

/// Standard "plain vanilla" European option payoff.
///
/// `payoff = max(φ(S − K), 0)` where `φ = +1` for Call, `−1` for Put.
#[derive(Debug, Clone)]
pub struct PlainVanillaPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff.
    pub fn new(option_type: OptionType, strike: Real) -> Self {
        Self {
            option_type,
            strike,
        }
    }
}

impl Payoff for PlainVanillaPayoff {
    fn value(&self, price: Price) -> Real {
        (self.option_type.sign() * (price - self.strike)).max(0.0)
    }
}

/// Digital (cash-or-nothing) payoff: pays 1 when in the money.
///
/// `payoff = 1` if `φ(S − K) > 0`, else 0. Provided for extensibility; the
/// default pricing entry points only build vanilla payoffs.
#[derive(Debug, Clone)]
pub struct DigitalPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
}

impl DigitalPayoff {
    /// Create a new digital payoff.
    pub fn new(option_type: OptionType, strike: Real) -> Self {
        Self {
            option_type,
            strike,
        }
    }
}

impl Payoff for DigitalPayoff {
    fn value(&self, price: Price) -> Real {
        if self.option_type.sign() * (price - self.strike) > 0.0 {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_vanilla_call() {
        let p = PlainVanillaPayoff::new(OptionType::Call, 100.0);
        assert!((p.value(110.0) - 10.0).abs() < 1e-15);
        assert!((p.value(90.0) - 0.0).abs() < 1e-15);
        assert!((p.value(100.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn plain_vanilla_put() {
        let p = PlainVanillaPayoff::new(OptionType::Put, 100.0);
        assert!((p.value(90.0) - 10.0).abs() < 1e-15);
        assert!((p.value(110.0) - 0.0).abs() < 1e-15);
    }

    #[test]
    fn digital_call_steps_at_strike() {
        let p = DigitalPayoff::new(OptionType::Call, 100.0);
        assert_eq!(p.value(100.1), 1.0);
        assert_eq!(p.value(100.0), 0.0);
        assert_eq!(p.value(99.9), 0.0);
    }

    #[test]
    fn digital_put_steps_at_strike() {
        let p = DigitalPayoff::new(OptionType::Put, 100.0);
        assert_eq!(p.value(99.9), 1.0);
        assert_eq!(p.value(100.0), 0.0);
        assert_eq!(p.value(100.1), 0.0);
    }

    #[test]
    fn option_type_sign_and_display() {
        assert_eq!(OptionType::Call.sign(), 1.0);
        assert_eq!(OptionType::Put.sign(), -1.0);
        assert_eq!(OptionType::Call.to_string(), "Call");
        assert_eq!(OptionType::Put.to_string(), "Put");
    }
}
