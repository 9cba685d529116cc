//! Foreign exchange option instruments.
//!
//! - [`FxVanillaOption`]: European or American call/put
//! - [`FxBarrierOption`]: single barrier knock-in/knock-out
//! - [`FxDoubleBarrierOption`]: corridor knock-in/knock-out, KIKO, KOKI

mod option;

pub use option::{FxBarrierOption, FxDoubleBarrierOption, FxVanillaOption};
