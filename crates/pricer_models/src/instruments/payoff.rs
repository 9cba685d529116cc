//! Option side and plain vanilla payoff.

use std::fmt;

use crate::analytical::AnalyticalError;

/// Option side (Call or Put).
///
/// - Call: Right to buy the foreign currency at the strike
/// - Put: Right to sell the foreign currency at the strike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// Right to buy foreign currency at strike (in domestic units).
    Call,
    /// Right to sell foreign currency at strike (in domestic units).
    Put,
}

impl OptionType {
    /// Returns whether this is a call option.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// +1 for calls, -1 for puts.
    #[inline]
    pub fn sign(&self) -> f64 {
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

/// Payoff max(φ(S - K), 0).
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{OptionType, PlainVanillaPayoff};
///
/// let call = PlainVanillaPayoff::new(OptionType::Call, 1.12).unwrap();
/// assert!((call.value(1.15) - 0.03).abs() < 1e-12);
/// assert_eq!(call.value(1.00), 0.0);
///
/// assert!(PlainVanillaPayoff::new(OptionType::Put, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainVanillaPayoff {
    option_type: OptionType,
    strike: f64,
}

impl PlainVanillaPayoff {
    /// Creates a payoff; the strike must be positive and finite.
    pub fn new(option_type: OptionType, strike: f64) -> Result<Self, AnalyticalError> {
        if !strike.is_finite() || strike <= 0.0 {
            return Err(AnalyticalError::InvalidStrike { strike });
        }
        Ok(Self {
            option_type,
            strike,
        })
    }

    /// Option side.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Strike in domestic units per foreign unit.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Intrinsic value at `spot`.
    #[inline]
    pub fn value(&self, spot: f64) -> f64 {
        (self.option_type.sign() * (spot - self.strike)).max(0.0)
    }
}
