//! Normalized contract specification and its building blocks.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::{Currency, Date};
use serde::Serialize;

use crate::request::{EXERCISE, EXOTIC_TYPE, TYPE};

/// A finite value strictly greater than zero.
///
/// # Examples
/// ```
/// use adapter_contract::PositiveFloat;
///
/// assert_eq!(PositiveFloat::new(1.5).map(|v| v.get()), Some(1.5));
/// assert!(PositiveFloat::new(0.0).is_none());
/// assert!(PositiveFloat::new(f64::INFINITY).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PositiveFloat(f64);

impl PositiveFloat {
    /// Wraps `value` if it is finite and > 0.
    pub fn new(value: f64) -> Option<Self> {
        (value.is_finite() && value > 0.0).then_some(Self(value))
    }

    /// Underlying value.
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OptionSide {
    /// Right to buy the foreign currency.
    Call,
    /// Right to sell the foreign currency.
    Put,
}

impl FromStr for OptionSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CALL" => Ok(OptionSide::Call),
            "PUT" => Ok(OptionSide::Put),
            _ => Err(format!("Invalid {}. Must be CALL or PUT.", TYPE)),
        }
    }
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionSide::Call => write!(f, "CALL"),
            OptionSide::Put => write!(f, "PUT"),
        }
    }
}

/// European or American exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExerciseStyle {
    /// Exercise at expiry only.
    European,
    /// Exercise on any date up to expiry.
    American,
}

impl FromStr for ExerciseStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "E" | "EUROPEAN" => Ok(ExerciseStyle::European),
            "A" | "AMERICAN" => Ok(ExerciseStyle::American),
            _ => Err(format!(
                "Invalid {}. Must be E (European) or A (American).",
                EXERCISE
            )),
        }
    }
}

impl fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseStyle::European => write!(f, "E"),
            ExerciseStyle::American => write!(f, "A"),
        }
    }
}

/// Product family of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ExoticType {
    /// Plain vanilla option.
    Vanilla,
    /// Single barrier knock-out.
    KnockOutBarrier,
    /// Single barrier knock-in.
    KnockInBarrier,
    /// Double barrier knock-out.
    KnockOutDoubleBarrier,
    /// Double barrier knock-in.
    KnockInDoubleBarrier,
    /// Knock-in at the lower barrier, knock-out at the upper.
    Kiko,
    /// Knock-out at the lower barrier, knock-in at the upper.
    Koki,
}

impl ExoticType {
    /// Every accepted type, in the order quoted in error messages.
    pub const ALL: [ExoticType; 7] = [
        ExoticType::Vanilla,
        ExoticType::KnockOutBarrier,
        ExoticType::KnockInBarrier,
        ExoticType::KnockOutDoubleBarrier,
        ExoticType::KnockInDoubleBarrier,
        ExoticType::Kiko,
        ExoticType::Koki,
    ];

    /// Wire literal.
    pub fn code(&self) -> &'static str {
        match self {
            ExoticType::Vanilla => "VANILLA",
            ExoticType::KnockOutBarrier => "KO_BARRIER",
            ExoticType::KnockInBarrier => "KI_BARRIER",
            ExoticType::KnockOutDoubleBarrier => "KO_DB_BARRIER",
            ExoticType::KnockInDoubleBarrier => "KI_DB_BARRIER",
            ExoticType::Kiko => "KIKO",
            ExoticType::Koki => "KOKI",
        }
    }

    /// Single barrier product.
    pub fn is_single_barrier(&self) -> bool {
        matches!(
            self,
            ExoticType::KnockOutBarrier | ExoticType::KnockInBarrier
        )
    }

    /// Double barrier product (including KIKO and KOKI).
    pub fn is_double_barrier(&self) -> bool {
        matches!(
            self,
            ExoticType::KnockOutDoubleBarrier
                | ExoticType::KnockInDoubleBarrier
                | ExoticType::Kiko
                | ExoticType::Koki
        )
    }
}

impl FromStr for ExoticType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        ExoticType::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| {
                let codes: Vec<&str> = ExoticType::ALL.iter().map(ExoticType::code).collect();
                format!("Invalid {}. Must be one of: {}.", EXOTIC_TYPE, codes.join(", "))
            })
    }
}

impl fmt::Display for ExoticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Direction of a single barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BarrierDirection {
    /// Barrier above spot, activates on touch.
    UpIn,
    /// Barrier above spot, extinguishes on touch.
    UpOut,
    /// Barrier below spot, activates on touch.
    DownIn,
    /// Barrier below spot, extinguishes on touch.
    DownOut,
}

/// Barrier terms after classification.
///
/// `direction` is set for single barriers and `None` for double barriers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarrierSpec {
    /// Single barrier direction.
    pub direction: Option<BarrierDirection>,
    /// Upper barrier level.
    pub upper: Option<f64>,
    /// Lower barrier level.
    pub lower: Option<f64>,
}

impl BarrierSpec {
    /// Level of a single barrier: the upper level for up barriers, the lower otherwise.
    pub fn single_level(&self) -> Option<f64> {
        match self.direction? {
            BarrierDirection::UpIn | BarrierDirection::UpOut => self.upper,
            BarrierDirection::DownIn | BarrierDirection::DownOut => self.lower,
        }
    }
}

/// Foreign and domestic legs with their reference rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedPair {
    /// Base currency (first three letters).
    pub foreign: Currency,
    /// Quote currency (last three letters).
    pub domestic: Currency,
    /// Continuously compounded foreign rate.
    pub foreign_rate: f64,
    /// Continuously compounded domestic rate.
    pub domestic_rate: f64,
}

/// Dates derived from the maturity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedDates {
    /// As-of date shared by every downstream step.
    pub evaluation: Date,
    /// Option expiry.
    pub expiry: Date,
    /// Premium/delivery date, expiry + 2 calendar days.
    pub delivery: Date,
    /// Spot settlement, evaluation + 2 calendar days.
    pub settlement: Date,
}

/// A fully validated contract, ready for pricing.
///
/// Only [`ContractDraft::build`](crate::ContractDraft::build) creates one,
/// so its invariants hold: positive numeric terms, expiry after
/// evaluation, barriers on the correct side of spot, two distinct legs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedContractSpec {
    pub(crate) pair: ResolvedPair,
    pub(crate) dates: ResolvedDates,
    pub(crate) strike: PositiveFloat,
    pub(crate) notional: PositiveFloat,
    pub(crate) spot: PositiveFloat,
    pub(crate) volatility: PositiveFloat,
    pub(crate) exercise_style: ExerciseStyle,
    pub(crate) option_side: OptionSide,
    pub(crate) exotic_type: ExoticType,
    pub(crate) barrier: Option<BarrierSpec>,
}

impl NormalizedContractSpec {
    /// Currency legs and reference rates.
    pub fn pair(&self) -> &ResolvedPair {
        &self.pair
    }

    /// Evaluation, expiry, delivery and settlement dates.
    pub fn dates(&self) -> &ResolvedDates {
        &self.dates
    }

    /// Strike in domestic units per foreign unit.
    pub fn strike(&self) -> f64 {
        self.strike.get()
    }

    /// Notional in foreign units.
    pub fn notional(&self) -> f64 {
        self.notional.get()
    }

    /// Spot in domestic units per foreign unit.
    pub fn spot(&self) -> f64 {
        self.spot.get()
    }

    /// Flat Black volatility.
    pub fn volatility(&self) -> f64 {
        self.volatility.get()
    }

    /// Exercise style.
    pub fn exercise_style(&self) -> ExerciseStyle {
        self.exercise_style
    }

    /// Call or put.
    pub fn option_side(&self) -> OptionSide {
        self.option_side
    }

    /// Product family.
    pub fn exotic_type(&self) -> ExoticType {
        self.exotic_type
    }

    /// Barrier terms, `None` for vanilla.
    pub fn barrier(&self) -> Option<&BarrierSpec> {
        self.barrier.as_ref()
    }

    /// Rebate paid on barrier events. Always zero.
    pub fn rebate(&self) -> f64 {
        0.0
    }
}
