//! Core time, calendar and currency types.
//!
//! This module provides:
//! - `time`: Date, Tenor, DayCountConvention and BusinessDayConvention
//! - `calendar`: Holiday calendars used for curve construction
//! - `currency`: Supported ISO 4217 currency codes
//! - `currency_pair`: Six-letter FX pair codes split into foreign/domestic legs
//! - `error`: Structured error types for date, tenor and currency parsing
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod calendar;
pub mod currency;
pub mod currency_pair;
pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use calendar::Calendar;
pub use currency::Currency;
pub use currency_pair::CurrencyPair;
pub use error::{CurrencyError, DateError};
pub use time::{BusinessDayConvention, Date, DayCountConvention, Tenor, TimeUnit};
