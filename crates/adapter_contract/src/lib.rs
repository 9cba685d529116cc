//! # adapter_contract: Contract normalisation for the FX web pricer
//!
//! ## Adapter Layer Role
//!
//! Turns the loosely typed field map a client posts into a
//! [`NormalizedContractSpec`] the pricing layer can consume without
//! further checks:
//! - Raw requests: [`RawContractRequest`] (`request`)
//! - Field coercion: [`FieldValidator`] (`fields`)
//! - Maturity dates and tenors: [`MaturityResolver`] (`maturity`)
//! - Currency legs and reference rates: [`CurrencyPairResolver`], [`ReferenceRates`] (`currency`)
//! - Barrier direction and geometry: [`BarrierClassifier`] (`barrier`)
//! - Error accumulation and narrowing: [`ContractBuilder`], [`ContractDraft`] (`builder`)
//!
//! ## Error Policy
//!
//! A malformed maturity is reported alone. Every other field is checked
//! and all failures are returned together, in a fixed field order, so a
//! client can correct a request in one round trip.
//!
//! ## Usage Examples
//!
//! ```rust
//! use adapter_contract::{ContractBuilder, ContractError, RawContractRequest, ReferenceRates};
//! use pricer_core::types::Date;
//!
//! let today = Date::from_ymd(2024, 1, 15).unwrap();
//! let rates = ReferenceRates::default();
//! let builder = ContractBuilder::new(today, &rates);
//!
//! let request = RawContractRequest::from_pairs([
//!     ("CURRENCY_PAIR", "XXXYYY"),
//!     ("MATURITY", "1Y"),
//!     ("STRIKE", ""),
//! ]);
//! let err = builder.build(&request).unwrap_err();
//! assert!(matches!(err, ContractError::Validation(_)));
//! assert_eq!(err.messages()[1], "STRIKE is empty");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod barrier;
pub mod builder;
pub mod currency;
pub mod error;
pub mod fields;
pub mod maturity;
pub mod request;
pub mod spec;

pub use barrier::BarrierClassifier;
pub use builder::{ContractBuilder, ContractDraft};
pub use currency::{CurrencyPairResolver, ReferenceRates};
pub use error::ContractError;
pub use fields::FieldValidator;
pub use maturity::MaturityResolver;
pub use request::RawContractRequest;
pub use spec::{
    BarrierDirection, BarrierSpec, ExerciseStyle, ExoticType, NormalizedContractSpec, OptionSide,
    PositiveFloat, ResolvedDates, ResolvedPair,
};
