//! Weighted reel position generation
//!
//! Every cell is drawn independently. Weights are adjusted per column and
//! symbol class, floored to whole draws, then sampled with a prefix-sum table
//! and a binary search. A column whose weights all floor to zero draws
//! uniformly over every configured symbol.

use rand::Rng;

use crate::config::{EngineRules, SlotConfig};
use crate::symbols::{SymbolClass, SymbolId};

/// Drawn grid, `rows × cols` symbol IDs
pub type Grid = Vec<Vec<SymbolId>>;

/// Weight multiplier for a symbol class on a given column
pub fn class_weight_factor(class: SymbolClass, col: usize, cols: usize) -> f64 {
    match class {
        // Rarer on later columns, never below 10% of base
        SymbolClass::Jackpot => (1.0 - col as f64 * 0.2).max(0.1),
        // Boosted on the middle column
        SymbolClass::Wild if col == cols / 2 => 1.5,
        SymbolClass::Wild => 1.0,
        SymbolClass::Scatter => 0.8,
        SymbolClass::Regular => 1.0,
    }
}

/// Cumulative-weight sampler for one column
#[derive(Debug, Clone)]
pub struct ColumnSampler<'a> {
    ids: Vec<&'a str>,
    cumulative: Vec<f64>,
    total: f64,
}

impl<'a> ColumnSampler<'a> {
    pub fn new(weights: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        let mut ids = Vec::new();
        let mut cumulative = Vec::new();
        let mut total = 0.0;

        for (id, weight) in weights {
            if weight.is_finite() && weight > 0.0 {
                total += weight;
                ids.push(id);
                cumulative.push(total);
            }
        }

        Self {
            ids,
            cumulative,
            total,
        }
    }

    /// Sum of usable weights; zero means every draw takes the fallback path
    pub fn total_weight(&self) -> f64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Draw one symbol, or `None` when no symbol carries weight
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'a str> {
        if self.is_empty() {
            return None;
        }

        let target = rng.random::<f64>() * self.total;
        let idx = self
            .cumulative
            .partition_point(|&c| c <= target)
            .min(self.ids.len() - 1);
        Some(self.ids[idx])
    }
}

/// Draws a full grid from a machine configuration
pub struct ReelPositionGenerator<'a> {
    config: &'a SlotConfig,
    columns: Vec<ColumnSampler<'a>>,
}

impl<'a> ReelPositionGenerator<'a> {
    pub fn new(config: &'a SlotConfig, rules: &EngineRules) -> Self {
        let cols = config.reels.cols;
        let columns = (0..cols)
            .map(|col| Self::column_sampler(config, rules, col))
            .collect();

        Self { config, columns }
    }

    fn column_sampler(config: &'a SlotConfig, rules: &EngineRules, col: usize) -> ColumnSampler<'a> {
        let cols = config.reels.cols;
        ColumnSampler::new(config.reels.symbol_weights.iter().map(|(id, &base)| {
            // Weight keys without a symbol definition draw unadjusted
            let class = config
                .symbol(id)
                .map(|s| s.class())
                .unwrap_or(SymbolClass::Regular);
            let adjusted = base as f64 * class_weight_factor(class, col, cols);
            let weight = if rules.fractional_weights {
                adjusted
            } else {
                adjusted.floor()
            };
            (id.as_str(), weight)
        }))
    }

    /// Adjusted sampler for a column
    pub fn column(&self, col: usize) -> Option<&ColumnSampler<'a>> {
        self.columns.get(col)
    }

    /// Draw one grid
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        let rows = self.config.reels.rows;
        let mut grid = Vec::with_capacity(rows);

        for _ in 0..rows {
            let mut row = Vec::with_capacity(self.columns.len());
            for (col, sampler) in self.columns.iter().enumerate() {
                let symbol = match sampler.sample(rng) {
                    Some(id) => id.to_string(),
                    None => self.fallback_draw(rng, col),
                };
                row.push(symbol);
            }
            grid.push(row);
        }

        grid
    }

    /// Uniform draw over every configured symbol, used when a column has no weight
    fn fallback_draw<R: Rng + ?Sized>(&self, rng: &mut R, col: usize) -> SymbolId {
        log::warn!("Column {col} has zero total weight, drawing uniformly over all symbols");

        let symbols = &self.config.symbols;
        if symbols.is_empty() {
            return SymbolId::new();
        }
        symbols[rng.random_range(0..symbols.len())].id.clone()
    }
}
