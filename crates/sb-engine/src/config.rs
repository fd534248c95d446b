//! Slot machine configuration
//!
//! [`SlotConfig`] is the declarative machine description produced by the
//! authoring side and persisted as JSON. The engine only ever reads it.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::paylines::{PaylineDef, standard_paylines};
use crate::symbols::{Payout, SymbolDef, SymbolId};

/// Reel grid and symbol draw weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReelConfig {
    /// Number of visible rows
    pub rows: usize,
    /// Number of columns (reels)
    pub cols: usize,
    /// Symbol ID -> relative draw weight
    #[serde(default)]
    pub symbol_weights: BTreeMap<SymbolId, u32>,
}

/// Feature toggles
///
/// Flags missing from a persisted object default to on, the same as a
/// missing `features` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureToggles {
    pub has_wilds: bool,
    pub has_scatters: bool,
    pub has_freespins: bool,
    pub has_jackpot: bool,
    pub has_multipliers: bool,
}

impl FeatureToggles {
    pub fn all() -> Self {
        Self {
            has_wilds: true,
            has_scatters: true,
            has_freespins: true,
            has_jackpot: true,
            has_multipliers: true,
        }
    }

    pub fn none() -> Self {
        Self {
            has_wilds: false,
            has_scatters: false,
            has_freespins: false,
            has_jackpot: false,
            has_multipliers: false,
        }
    }
}

impl Default for FeatureToggles {
    fn default() -> Self {
        Self::all()
    }
}

/// Visual theme (carried for persistence, never read by the engine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub background_color: String,
    pub reel_color: String,
    pub button_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_color: "#2c3e50".into(),
            reel_color: "#34495e".into(),
            button_color: "#e74c3c".into(),
        }
    }
}

/// Complete slot machine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotConfig {
    /// Machine ID
    #[serde(default)]
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    /// Creation timestamp (unix millis)
    #[serde(default)]
    pub created_at: u64,
    pub reels: ReelConfig,
    #[serde(default)]
    pub symbols: Vec<SymbolDef>,
    #[serde(default)]
    pub paylines: Vec<PaylineDef>,
    /// Selectable bet amounts, in display order
    #[serde(default)]
    pub bet_options: Vec<f64>,
    pub min_bet: f64,
    pub max_bet: f64,
    /// Target return-to-player ratio in (0, 1]
    pub rtp: f64,
    #[serde(default)]
    pub features: FeatureToggles,
    #[serde(default)]
    pub theme: Theme,
}

impl SlotConfig {
    /// Starter machine: 3×5 grid, eight symbols, nine paylines.
    ///
    /// Every call builds a fresh, independently owned configuration.
    pub fn starter() -> Self {
        let created_at = current_timestamp();

        let symbols = vec![
            SymbolDef::regular("symbol_1", "🍒", "Cherry", Payout::new(5.0, 10.0, 25.0)),
            SymbolDef::regular("symbol_2", "🍋", "Lemon", Payout::new(8.0, 15.0, 40.0)),
            SymbolDef::regular("symbol_3", "🍊", "Orange", Payout::new(10.0, 20.0, 60.0)),
            SymbolDef::regular("symbol_4", "🍇", "Grapes", Payout::new(15.0, 30.0, 80.0)),
            SymbolDef::regular("symbol_5", "7️⃣", "Seven", Payout::new(20.0, 50.0, 150.0)),
            SymbolDef::wild("wild", "⭐", Payout::new(25.0, 75.0, 200.0)),
            SymbolDef::scatter("scatter", "🎁", Payout::new(5.0, 10.0, 50.0)),
            SymbolDef::jackpot("jackpot", "💰", Payout::new(50.0, 200.0, 500.0)),
        ];

        let symbol_weights = [
            ("symbol_1", 10),
            ("symbol_2", 8),
            ("symbol_3", 6),
            ("symbol_4", 4),
            ("symbol_5", 2),
            ("wild", 1),
            ("scatter", 1),
            ("jackpot", 1),
        ]
        .into_iter()
        .map(|(id, weight)| (id.to_string(), weight))
        .collect();

        Self {
            id: format!("slot_{created_at}"),
            name: "New Slot Machine".into(),
            author: String::new(),
            created_at,
            reels: ReelConfig {
                rows: 3,
                cols: 5,
                symbol_weights,
            },
            symbols,
            paylines: standard_paylines(),
            bet_options: vec![1.0, 5.0, 10.0, 25.0, 50.0, 100.0],
            min_bet: 1.0,
            max_bet: 100.0,
            rtp: 0.96,
            features: FeatureToggles::all(),
            theme: Theme::default(),
        }
    }

    /// Parse a persisted configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigIoError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a YAML-authored configuration
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigIoError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Serialize for persistence (pretty-printed)
    pub fn to_json(&self) -> Result<String, ConfigIoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get symbol by ID
    pub fn symbol(&self, id: &str) -> Option<&SymbolDef> {
        self.symbols.iter().find(|s| s.id == id)
    }

    /// First wild-flagged symbol
    pub fn wild_symbol(&self) -> Option<&SymbolDef> {
        self.symbols.iter().find(|s| s.is_wild)
    }

    /// First scatter-flagged symbol
    pub fn scatter_symbol(&self) -> Option<&SymbolDef> {
        self.symbols.iter().find(|s| s.is_scatter)
    }

    /// Jackpot symbol: the flagged one, otherwise the non-wild, non-scatter
    /// symbol with the highest 5-of-a-kind payout (first one wins a tie).
    pub fn jackpot_symbol(&self) -> Option<&SymbolDef> {
        if let Some(flagged) = self.symbols.iter().find(|s| s.is_jackpot) {
            return Some(flagged);
        }

        self.symbols
            .iter()
            .filter(|s| !s.is_wild && !s.is_scatter)
            .fold(None, |best: Option<&SymbolDef>, s| match best {
                Some(b) if b.payout.five >= s.payout.five => Some(b),
                _ => Some(s),
            })
    }

    /// Get payline by ID
    pub fn payline(&self, id: u32) -> Option<&PaylineDef> {
        self.paylines.iter().find(|p| p.id == id)
    }

    /// Total grid positions
    pub fn total_positions(&self) -> usize {
        self.reels.rows * self.reels.cols
    }

    /// Theoretical RTP. Echoes the configured target; no enumeration is done.
    pub fn theoretical_rtp(&self) -> f64 {
        self.rtp
    }
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self::starter()
    }
}

/// Engine pricing rules
///
/// These are constants of the game math rather than per-machine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineRules {
    /// Free spins awarded per scatter on the grid
    pub free_spins_per_scatter: u32,
    /// Scatters needed to award free spins
    pub min_scatters: usize,
    /// Jackpot bonus as a bet multiple
    pub jackpot_bet_multiple: f64,
    /// Random jackpot chance at `bet == minBet`
    pub jackpot_base_chance: f64,
    /// Random multiplier chance at `bet == minBet`
    pub multiplier_base_chance: f64,
    /// Multiplier factors, drawn uniformly
    pub multiplier_values: Vec<u32>,
    /// Payline checked for the deterministic jackpot
    pub jackpot_line_id: u32,
    /// Sample adjusted weights as fractions instead of flooring them.
    ///
    /// Off by default: each symbol draws with `floor(adjustedWeight)`, so a
    /// weight-1 scatter (1 × 0.8) never lands. Turning this on changes the
    /// machine's odds.
    pub fractional_weights: bool,
}

impl Default for EngineRules {
    fn default() -> Self {
        Self {
            free_spins_per_scatter: 5,
            min_scatters: 3,
            jackpot_bet_multiple: 1000.0,
            jackpot_base_chance: 0.001,
            multiplier_base_chance: 0.05,
            multiplier_values: vec![2, 3, 5],
            jackpot_line_id: 1,
            fractional_weights: false,
        }
    }
}

/// Configuration encode/decode errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigIoError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),
}

pub(crate) fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
