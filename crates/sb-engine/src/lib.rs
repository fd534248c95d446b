//! # sb-engine: slot machine simulation core
//!
//! Turns a declarative machine configuration and a bet into a priced spin:
//! a weighted grid draw, payline wins with wild substitution, and the
//! scatter / jackpot / multiplier features.
//!
//! ## Architecture
//!
//! ```text
//! spin(config, bet)
//!     │
//!     ├── SlotConfig::validate      (structural invariants)
//!     ├── ReelPositionGenerator     (per-cell weighted draw)
//!     ├── PaylineEvaluator          (left-to-right runs, wilds)
//!     └── FeatureTrigger            (free spins, jackpot, multiplier)
//!           │
//!           v
//!     SpinOutcome::Completed(SpinResult) | SpinOutcome::Rejected(ConfigurationError)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = SlotConfig::starter();
//! sb_engine::validate(&config)?;
//!
//! let mut engine = SlotEngine::seeded(42);
//! if let SpinOutcome::Completed(result) = engine.spin(&config, 5.0) {
//!     println!("won {}", result.total_win);
//! }
//! ```

pub mod config;
pub mod editor;
pub mod engine;
pub mod features;
pub mod paylines;
pub mod reels;
pub mod session;
pub mod spin;
pub mod symbols;
pub mod validate;

pub use config::*;
pub use editor::*;
pub use engine::*;
pub use features::*;
pub use paylines::*;
pub use reels::*;
pub use session::*;
pub use spin::*;
pub use symbols::*;
pub use validate::*;

/// Check a configuration before it is used
pub fn validate(config: &SlotConfig) -> Result<(), ConfigurationError> {
    config.validate()
}

/// Compute one spin with default rules and the thread-local random source
pub fn spin(config: &SlotConfig, bet: f64) -> SpinOutcome {
    spin_with_rng(config, bet, &EngineRules::default(), &mut rand::rng())
}
