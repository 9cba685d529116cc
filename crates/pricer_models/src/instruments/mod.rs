//! Option terms and instruments.
//!
//! This module provides:
//! - [`OptionType`] and [`PlainVanillaPayoff`]
//! - [`Exercise`] (European or American)
//! - [`BarrierType`] and [`DoubleBarrierType`]
//! - The [`Instrument`] trait and the FX option types in [`fx`]

pub mod barrier;
pub mod exercise;
pub mod fx;
pub mod payoff;
pub mod traits;

pub use barrier::{BarrierType, DoubleBarrierType};
pub use exercise::Exercise;
pub use fx::{FxBarrierOption, FxDoubleBarrierOption, FxVanillaOption};
pub use payoff::{OptionType, PlainVanillaPayoff};
pub use traits::{Instrument, OptionResults};
