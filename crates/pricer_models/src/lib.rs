//! # Pricer Models (L2: Pricing Collaborator)
//!
//! FX option instruments, the Garman-Kohlhagen process and the engines
//! that value them.
//!
//! This crate provides:
//! - Closed-form formulas (`analytical`): Garman-Kohlhagen, Reiner-Rubinstein
//!   single barriers, Ikeda-Kunitomo double barriers, CRR binomial lattice
//! - Payoffs, exercises and barrier types (`instruments`)
//! - The market process binding spot, two flat curves and a flat vol (`process`)
//! - Engines attached to instruments (`engines`)
//!
//! ## Design Principles
//!
//! - **Enum-based engines** for static dispatch
//! - **Explicit reference dates**: the process never reads a global as-of date
//! - **Per-structure day counts**: rate curves and the vol curve may measure
//!   time differently; engines reconcile them
//!
//! ## Usage
//!
//! ```
//! use pricer_core::market_data::{BlackConstantVol, FlatForward};
//! use pricer_core::types::{Date, DayCountConvention};
//! use pricer_models::engines::PricingEngine;
//! use pricer_models::instruments::{Exercise, FxVanillaOption, Instrument, OptionType, PlainVanillaPayoff};
//! use pricer_models::process::GarmanKohlhagenProcess;
//!
//! let today = Date::from_ymd(2024, 1, 2).unwrap();
//! let expiry = Date::from_ymd(2025, 1, 2).unwrap();
//!
//! let foreign = FlatForward::new(today, 0.01, DayCountConvention::Actual360).unwrap();
//! let domestic = FlatForward::new(today, 0.05, DayCountConvention::Actual360).unwrap();
//! let vol = BlackConstantVol::new(today, 0.10, DayCountConvention::ActualActualIsda).unwrap();
//! let process = GarmanKohlhagenProcess::new(1.10, foreign, domestic, vol).unwrap();
//!
//! let payoff = PlainVanillaPayoff::new(OptionType::Call, 1.12).unwrap();
//! let mut option = FxVanillaOption::new(payoff, Exercise::european(expiry));
//! option.set_pricing_engine(PricingEngine::analytic_european(process));
//!
//! let npv = option.npv().unwrap();
//! assert!(npv > 0.0);
//! assert!(option.delta().unwrap() > 0.0 && option.delta().unwrap() < 1.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod engines;
pub mod instruments;
pub mod process;
