//! Yield term structures.
//!
//! This module provides:
//! - [`YieldTermStructure`]: Dated discount factor and zero rate lookup
//! - [`FlatForward`]: Constant continuously compounded rate

mod flat;
mod traits;

pub use flat::FlatForward;
pub use traits::YieldTermStructure;
