//! # pricer_core: Foundation types for the FX web pricer
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Time types: `Date`, `Tenor`, `DayCountConvention`, `BusinessDayConvention` (`types::time`)
//! - Holiday calendars: `Calendar` (`types::calendar`)
//! - Currency types: `Currency`, `CurrencyPair` (`types::currency`, `types::currency_pair`)
//! - Error types: `DateError`, `CurrencyError` (`types::error`)
//! - Flat term structures anchored to an explicit reference date (`market_data`)
//!
//! ## No Global State
//!
//! Nothing in this crate reads an ambient "evaluation date". Every
//! date-dependent object takes its reference date as an argument, so
//! contracts priced concurrently never observe each other's as-of date.
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{Currency, CurrencyPair, Date, DayCountConvention, Tenor};
//!
//! let today = Date::from_ymd(2024, 1, 15).unwrap();
//! let expiry = today.advance("3M".parse::<Tenor>().unwrap()).unwrap();
//! assert_eq!(expiry, Date::from_ymd(2024, 4, 15).unwrap());
//!
//! let yf = DayCountConvention::Actual360.year_fraction(today, expiry);
//! assert!((yf - 91.0 / 360.0).abs() < 1e-12);
//!
//! let pair: CurrencyPair = "EURUSD".parse().unwrap();
//! assert_eq!(pair.foreign(), Currency::EUR);
//! assert_eq!(pair.domestic(), Currency::USD);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, Currency, CurrencyPair

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod types;
