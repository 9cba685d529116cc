//! REST API server for the FX web pricer
//!
//! Exposes single-contract pricing (`/webpricer`), batch pricing
//! (`/bulkwebpricer`) and direct vanilla pricing (`/vanillaoptionprice`)
//! over HTTP, plus health and readiness checks.

pub mod config;
pub mod routes;
pub mod server;

// Re-export pricer dependencies for integration
pub use adapter_contract;
pub use pricer_core;
pub use pricer_pricing;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
