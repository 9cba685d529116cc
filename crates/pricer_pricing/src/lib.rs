//! # Pricer Pricing (Layer 3: Dispatch)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing connects normalized contracts to the pricing models:
//! - [`PricingDispatcher`]: builds market objects for one contract, picks
//!   the engine for its product family and scales results to the notional
//! - [`BulkDispatcher`]: prices a batch concurrently with a bounded number
//!   of workers, a per-item timeout and order-preserving assembly
//! - [`vanilla`]: direct European vanilla pricing from explicit market inputs
//!
//! ## Concurrency Model
//!
//! Single-contract pricing is synchronous and stateless. Each contract owns
//! its curves, process and instrument, and receives its evaluation date as
//! an argument, so concurrent items share nothing mutable.
//!
//! ## Usage Example
//!
//! ```rust
//! use adapter_contract::{RawContractRequest, ReferenceRates};
//! use pricer_core::types::Date;
//! use pricer_pricing::PricingDispatcher;
//!
//! let request = RawContractRequest::from_pairs([
//!     ("CURRENCY_PAIR", "USDEUR"),
//!     ("MATURITY", "1Y"),
//!     ("STRIKE", "100"),
//!     ("NOTIONAL", "1000000"),
//!     ("EXOTIC_TYPE", "VANILLA"),
//!     ("EXERCISE", "E"),
//!     ("TYPE", "CALL"),
//!     ("SPOT", "100"),
//!     ("VOLATILITY", "0.2"),
//! ]);
//! let today = Date::from_ymd(2024, 1, 15).unwrap();
//! let result = PricingDispatcher::default()
//!     .price_request(&request, today, &ReferenceRates::default())
//!     .unwrap();
//! assert!(result.premium >= 0.0);
//! assert!(result.delta.abs() <= 1_000_000.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod bulk;
pub mod dispatcher;
pub mod vanilla;

pub use bulk::{BatchItemError, BatchItemResult, BulkDispatcher, BulkSettings};
pub use dispatcher::{PricingDispatcher, PricingResult};
pub use vanilla::{price_vanilla, VanillaOptionPrice, VanillaOptionRequest, VanillaPricingError};
