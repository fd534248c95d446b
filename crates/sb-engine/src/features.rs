//! Feature triggers: scatter free spins, jackpot, random multiplier
//!
//! The three checks are independent and may all fire on the same spin.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::config::{EngineRules, SlotConfig};
use crate::paylines::line_symbols;
use crate::reels::Grid;

/// Features triggered by one spin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggeredFeatures {
    /// Free spins awarded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_spins: Option<u32>,
    /// Win multiplier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<u32>,
    /// Jackpot hit
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub jackpot: bool,
}

impl TriggeredFeatures {
    pub fn is_empty(&self) -> bool {
        self.free_spins.is_none() && self.multiplier.is_none() && !self.jackpot
    }
}

/// Probability clamped to `[0, 1]`; NaN counts as zero.
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

/// Evaluates feature conditions for a drawn grid
pub struct FeatureTrigger<'a> {
    config: &'a SlotConfig,
    rules: &'a EngineRules,
}

impl<'a> FeatureTrigger<'a> {
    pub fn new(config: &'a SlotConfig, rules: &'a EngineRules) -> Self {
        Self { config, rules }
    }

    pub fn evaluate<R: Rng + ?Sized>(&self, grid: &Grid, bet: f64, rng: &mut R) -> TriggeredFeatures {
        let mut features = TriggeredFeatures {
            free_spins: self.free_spins(grid),
            ..Default::default()
        };

        if self.config.features.has_jackpot {
            features.jackpot = self.jackpot_line_hit(grid) || self.random_jackpot(bet, rng);
        }

        if self.config.features.has_multipliers {
            features.multiplier = self.random_multiplier(bet, rng);
        }

        features
    }

    /// Scatter count anywhere on the grid
    pub fn scatter_count(&self, grid: &Grid) -> usize {
        let Some(scatter) = self.config.scatter_symbol() else {
            return 0;
        };
        grid.iter()
            .flatten()
            .filter(|id| **id == scatter.id)
            .count()
    }

    fn free_spins(&self, grid: &Grid) -> Option<u32> {
        if !self.config.features.has_freespins || self.config.scatter_symbol().is_none() {
            return None;
        }

        let count = self.scatter_count(grid);
        (count >= self.rules.min_scatters)
            .then(|| count as u32 * self.rules.free_spins_per_scatter)
    }

    /// Jackpot line completely covered by the jackpot symbol
    pub fn jackpot_line_hit(&self, grid: &Grid) -> bool {
        let Some(symbol) = self.config.jackpot_symbol() else {
            return false;
        };
        let Some(line) = self.config.payline(self.rules.jackpot_line_id) else {
            return false;
        };

        line_symbols(grid, line).iter().all(|&id| id == symbol.id)
    }

    /// Trigger chance for a base probability, scaled by `bet / minBet`
    pub fn scaled_chance(&self, base: f64, bet: f64) -> f64 {
        clamp_probability(base * (bet / self.config.min_bet))
    }

    fn random_jackpot<R: Rng + ?Sized>(&self, bet: f64, rng: &mut R) -> bool {
        rng.random_bool(self.scaled_chance(self.rules.jackpot_base_chance, bet))
    }

    fn random_multiplier<R: Rng + ?Sized>(&self, bet: f64, rng: &mut R) -> Option<u32> {
        if !rng.random_bool(self.scaled_chance(self.rules.multiplier_base_chance, bet)) {
            return None;
        }
        self.rules.multiplier_values.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::FeatureToggles;

    fn grid_of(rows: &[&[&str]]) -> Grid {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    fn free_spins_only() -> SlotConfig {
        let mut config = SlotConfig::starter();
        config.features = FeatureToggles {
            has_freespins: true,
            ..FeatureToggles::none()
        };
        config
    }

    #[test]
    fn test_free_spins_thresholds() {
        let config = free_spins_only();
        let rules = EngineRules::default();
        let trigger = FeatureTrigger::new(&config, &rules);
        let mut rng = StdRng::seed_from_u64(0);

        let s = "scatter";
        let x = "symbol_1";
        let cases: [(&[&[&str]], Option<u32>); 4] = [
            (&[&[x, x, x, x, x], &[x, x, x, x, x], &[x, x, x, x, x]], None),
            (&[&[s, x, x, x, x], &[x, x, x, x, s], &[x, x, x, x, x]], None),
            (&[&[s, x, x, x, x], &[x, x, s, x, x], &[x, x, x, x, s]], Some(15)),
            (&[&[s, s, x, x, x], &[x, x, s, x, x], &[s, x, x, x, s]], Some(25)),
        ];

        for (rows, expected) in cases {
            let features = trigger.evaluate(&grid_of(rows), 1.0, &mut rng);
            assert_eq!(features.free_spins, expected);
        }
    }

    #[test]
    fn test_free_spins_disabled_or_no_scatter() {
        let rules = EngineRules::default();
        let grid = grid_of(&[&["scatter"; 5], &["scatter"; 5], &["scatter"; 5]]);
        let mut rng = StdRng::seed_from_u64(0);

        let mut config = free_spins_only();
        config.features.has_freespins = false;
        let features = FeatureTrigger::new(&config, &rules).evaluate(&grid, 1.0, &mut rng);
        assert_eq!(features.free_spins, None);

        let mut config = free_spins_only();
        for symbol in &mut config.symbols {
            symbol.is_scatter = false;
        }
        let features = FeatureTrigger::new(&config, &rules).evaluate(&grid, 1.0, &mut rng);
        assert_eq!(features.free_spins, None);
    }

    #[test]
    fn test_jackpot_on_middle_line() {
        let mut config = SlotConfig::starter();
        config.features = FeatureToggles {
            has_jackpot: true,
            ..FeatureToggles::none()
        };
        let rules = EngineRules {
            jackpot_base_chance: 0.0,
            ..Default::default()
        };
        let trigger = FeatureTrigger::new(&config, &rules);
        let mut rng = StdRng::seed_from_u64(5);

        let j = "jackpot";
        let x = "symbol_2";
        let hit = grid_of(&[&[x; 5], &[j; 5], &[x; 5]]);
        assert!(trigger.evaluate(&hit, 1.0, &mut rng).jackpot);

        let miss = grid_of(&[&[x; 5], &[j, j, j, j, x], &[x; 5]]);
        assert!(!trigger.evaluate(&miss, 1.0, &mut rng).jackpot);

        // Top row is line 2, not the jackpot line
        let top = grid_of(&[&[j; 5], &[x; 5], &[x; 5]]);
        assert!(!trigger.evaluate(&top, 1.0, &mut rng).jackpot);
    }

    #[test]
    fn test_jackpot_disabled() {
        let mut config = SlotConfig::starter();
        config.features = FeatureToggles::none();
        let rules = EngineRules::default();
        let trigger = FeatureTrigger::new(&config, &rules);
        let mut rng = StdRng::seed_from_u64(5);

        let grid = grid_of(&[&["jackpot"; 5], &["jackpot"; 5], &["jackpot"; 5]]);
        assert!(trigger.evaluate(&grid, 1.0, &mut rng).is_empty());
    }

    #[test]
    fn test_scaled_chance_is_clamped() {
        let config = SlotConfig::starter();
        let rules = EngineRules::default();
        let trigger = FeatureTrigger::new(&config, &rules);

        assert!((trigger.scaled_chance(0.05, 10.0) - 0.5).abs() < 1e-12);
        assert_eq!(trigger.scaled_chance(0.05, 100.0), 1.0);
        assert_eq!(trigger.scaled_chance(0.05, -3.0), 0.0);
        assert_eq!(clamp_probability(f64::NAN), 0.0);
    }

    #[test]
    fn test_multiplier_certain_at_high_bet() {
        let mut config = SlotConfig::starter();
        config.features = FeatureToggles {
            has_multipliers: true,
            ..FeatureToggles::none()
        };
        let rules = EngineRules::default();
        let trigger = FeatureTrigger::new(&config, &rules);
        let mut rng = StdRng::seed_from_u64(8);
        let grid = grid_of(&[&["symbol_1"; 5], &["symbol_1"; 5], &["symbol_1"; 5]]);

        // 0.05 × 100 exceeds 1 and is clamped to a certain trigger
        for _ in 0..50 {
            let factor = trigger.evaluate(&grid, 100.0, &mut rng).multiplier;
            assert!(matches!(factor, Some(2 | 3 | 5)), "got {factor:?}");
        }
    }

    #[test]
    fn test_wire_shape_omits_absent_features() {
        let features = TriggeredFeatures {
            free_spins: Some(15),
            ..Default::default()
        };
        let value = serde_json::to_value(&features).unwrap();
        assert_eq!(value, serde_json::json!({ "freeSpins": 15 }));

        let empty = serde_json::to_value(TriggeredFeatures::default()).unwrap();
        assert_eq!(empty, serde_json::json!({}));
    }
}
