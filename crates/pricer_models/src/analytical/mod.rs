//! Closed-form and lattice formulas for FX options.
//!
//! This module provides:
//! - Garman-Kohlhagen price and Greeks for European options
//! - Reiner-Rubinstein single barrier prices
//! - Ikeda-Kunitomo double barrier prices
//! - Cox-Ross-Rubinstein lattice for American exercise
//!
//! Functions take plain year fractions and continuously compounded rates;
//! date handling lives in [`crate::process`] and [`crate::engines`].

pub mod barrier;
pub mod binomial;
pub mod distributions;
pub mod double_barrier;
pub mod error;
pub mod garman_kohlhagen;

pub use barrier::{barrier_price, BarrierParams};
pub use binomial::{crr_american, crr_american_vega, LatticeResult};
pub use distributions::{norm_cdf, norm_pdf};
pub use double_barrier::{double_barrier_price, DoubleBarrierParams};
pub use error::AnalyticalError;
pub use garman_kohlhagen::{fx_call_price, fx_put_price, GarmanKohlhagen, GarmanKohlhagenParams};
