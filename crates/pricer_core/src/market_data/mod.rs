//! Market data structures for FX option pricing.
//!
//! This module provides dated yield term structures and Black volatility
//! term structures. Every structure carries its own reference date and day
//! count, so a time `t` is always measured from a known anchor.
//!
//! # Components
//!
//! - [`curves`]: Yield term structure trait and the flat forward curve
//! - [`surfaces`]: Black volatility term structure trait and the constant vol
//! - [`error`]: Market data error types (MarketDataError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::{FlatForward, YieldTermStructure};
//! use pricer_core::market_data::surfaces::{BlackConstantVol, BlackVolTermStructure};
//! use pricer_core::types::{Date, DayCountConvention};
//!
//! let today = Date::from_ymd(2024, 1, 2).unwrap();
//! let curve = FlatForward::new(today, 0.05, DayCountConvention::Actual360).unwrap();
//! let one_year = Date::from_ymd(2025, 1, 2).unwrap();
//! let df = curve.discount_at(one_year).unwrap();
//! assert!((df - (-0.05_f64 * 366.0 / 360.0).exp()).abs() < 1e-12);
//!
//! let vol = BlackConstantVol::new(today, 0.10, DayCountConvention::ActualActualIsda).unwrap();
//! assert_eq!(vol.black_vol(1.0, 1.1).unwrap(), 0.10);
//! ```

pub mod curves;
pub mod error;
pub mod surfaces;

// Re-export commonly used types
pub use curves::{FlatForward, YieldTermStructure};
pub use error::MarketDataError;
pub use surfaces::{BlackConstantVol, BlackVolTermStructure};
