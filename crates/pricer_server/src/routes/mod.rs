//! Route modules for the pricer server
//!
//! This module contains endpoint group-specific routers:
//! - pricing: single-contract and direct vanilla pricing
//! - bulk: batch pricing
//! - health: Health check and readiness endpoints

pub mod bulk;
pub mod health;
pub mod pricing;

use std::sync::Arc;

use axum::Router;
use pricer_core::types::Date;
use pricer_pricing::{BulkDispatcher, PricingDispatcher};
use tower_http::trace::TraceLayer;

use crate::config::{ConfigError, ServerConfig};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
    /// Batch dispatcher; also carries the reference rates for single requests
    pub bulk: BulkDispatcher,
}

impl AppState {
    /// Create a new AppState
    ///
    /// Fails when the configured reference rates are invalid.
    pub fn new(config: Arc<ServerConfig>) -> Result<Self, ConfigError> {
        let bulk = BulkDispatcher::new(
            PricingDispatcher::default(),
            config.reference_rates()?,
            config.bulk.settings(),
        );
        Ok(Self {
            config,
            start_time: std::time::Instant::now(),
            bulk,
        })
    }

    /// Evaluation date for a request arriving now
    pub fn evaluation_date(&self) -> Date {
        self.config.evaluation_date.unwrap_or_else(Date::today)
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(config: Arc<ServerConfig>) -> Result<Router, ConfigError> {
    let state = AppState::new(config)?;

    Ok(Router::new()
        .merge(health::routes())
        .merge(pricing::routes())
        .merge(bulk::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
