//! Volatility term structures for option pricing.
//!
//! This module provides:
//! - [`BlackVolTermStructure`]: Dated Black volatility lookup
//! - [`BlackConstantVol`]: Constant volatility implementation

mod flat;
mod traits;

pub use flat::BlackConstantVol;
pub use traits::BlackVolTermStructure;
