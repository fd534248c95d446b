//! Spin orchestration
//!
//! One spin: validate, draw a grid, price the paylines, evaluate features,
//! then apply the multiplier and jackpot bonus.

use rand::prelude::*;

use crate::config::{EngineRules, SlotConfig};
use crate::features::{FeatureTrigger, TriggeredFeatures};
use crate::paylines::{PaylineEvaluator, WinningLine};
use crate::reels::ReelPositionGenerator;
use crate::spin::{SpinOutcome, SpinResult};

/// Slot engine
///
/// Owns the random source and pricing rules. Configurations are borrowed per
/// call and never modified.
pub struct SlotEngine {
    /// Pricing rules
    rules: EngineRules,
    /// Random number generator
    rng: StdRng,
    /// Completed spins
    spin_count: u64,
}

impl SlotEngine {
    /// Create an engine seeded from the OS
    pub fn new() -> Self {
        Self::with_rules(EngineRules::default())
    }

    /// Create with specific rules
    pub fn with_rules(rules: EngineRules) -> Self {
        Self {
            rules,
            rng: StdRng::from_os_rng(),
            spin_count: 0,
        }
    }

    /// Create a reproducible engine
    pub fn seeded(seed: u64) -> Self {
        let mut engine = Self::new();
        engine.seed(seed);
        engine
    }

    /// Seed RNG for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn rules(&self) -> &EngineRules {
        &self.rules
    }

    pub fn set_rules(&mut self, rules: EngineRules) {
        self.rules = rules;
    }

    pub fn spin_count(&self) -> u64 {
        self.spin_count
    }

    /// Execute one spin
    pub fn spin(&mut self, config: &SlotConfig, bet: f64) -> SpinOutcome {
        let outcome = spin_with_rng(config, bet, &self.rules, &mut self.rng);
        if outcome.is_completed() {
            self.spin_count += 1;
        }
        outcome
    }
}

impl Default for SlotEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Execute one spin with a caller-supplied random source
pub fn spin_with_rng<R: Rng + ?Sized>(
    config: &SlotConfig,
    bet: f64,
    rules: &EngineRules,
    rng: &mut R,
) -> SpinOutcome {
    if let Err(err) = config.validate() {
        log::warn!("Rejected spin for '{}': {err}", config.id);
        return SpinOutcome::Rejected(err);
    }

    let reel_positions = ReelPositionGenerator::new(config, rules).generate(rng);
    let winning_lines = PaylineEvaluator::new(config).evaluate(&reel_positions, bet);
    let triggered_features = FeatureTrigger::new(config, rules).evaluate(&reel_positions, bet, rng);

    let (winning_lines, total_win) = price(winning_lines, &triggered_features, bet, rules);

    log::debug!(
        "Spin on '{}': bet={bet} lines={} total_win={total_win} features={triggered_features:?}",
        config.id,
        winning_lines.len(),
    );

    SpinOutcome::Completed(SpinResult {
        reel_positions,
        winning_lines,
        total_win,
        triggered_features,
    })
}

/// Apply feature pricing to raw line wins.
///
/// A multiplier scales every line and the total by the same factor. The
/// jackpot bonus is added to the total only; line amounts never include it.
pub fn price(
    mut lines: Vec<WinningLine>,
    features: &TriggeredFeatures,
    bet: f64,
    rules: &EngineRules,
) -> (Vec<WinningLine>, f64) {
    let mut total: f64 = lines.iter().map(|l| l.win_amount).sum();

    if let Some(factor) = features.multiplier {
        let factor = f64::from(factor);
        total *= factor;
        for line in &mut lines {
            line.win_amount *= factor;
        }
    }

    if features.jackpot {
        total += bet * rules.jackpot_bet_multiple;
    }

    (lines, total)
}
