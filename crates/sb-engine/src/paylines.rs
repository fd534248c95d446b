//! Paylines and line win evaluation

use serde::{Deserialize, Serialize};

use crate::config::SlotConfig;
use crate::reels::Grid;
use crate::symbols::SymbolId;

/// A grid cell, serialized as `[row, col]`
///
/// Coordinates are unsigned: a negative coordinate in a persisted document is
/// a parse error (`ConfigIoError`), not a `PaylinePositionOutOfBounds`
/// validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position(pub usize, pub usize);

impl Position {
    pub fn row(&self) -> usize {
        self.0
    }

    pub fn col(&self) -> usize {
        self.1
    }
}

/// A payline definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaylineDef {
    /// Payline ID (1-based, kept contiguous by the editor)
    pub id: u32,
    /// One cell per column, read left to right
    pub positions: Vec<Position>,
}

impl PaylineDef {
    /// Build from one row index per column (e.g. `[0, 1, 2, 1, 0]` for a V)
    pub fn from_rows(id: u32, rows: &[usize]) -> Self {
        Self {
            id,
            positions: rows
                .iter()
                .enumerate()
                .map(|(col, &row)| Position(row, col))
                .collect(),
        }
    }

    /// Create a straight line (same row across all columns)
    pub fn straight(id: u32, row: usize, cols: usize) -> Self {
        Self::from_rows(id, &vec![row; cols])
    }
}

/// The starter machine's nine lines for a 3×5 grid. Line 1 is the middle row.
pub fn standard_paylines() -> Vec<PaylineDef> {
    vec![
        // Straight lines
        PaylineDef::straight(1, 1, 5), // Middle
        PaylineDef::straight(2, 0, 5), // Top
        PaylineDef::straight(3, 2, 5), // Bottom
        // V shapes
        PaylineDef::from_rows(4, &[0, 1, 2, 1, 0]),
        PaylineDef::from_rows(5, &[2, 1, 0, 1, 2]),
        // Zigzag
        PaylineDef::from_rows(6, &[0, 0, 1, 2, 2]),
        PaylineDef::from_rows(7, &[2, 2, 1, 0, 0]),
        // W shapes
        PaylineDef::from_rows(8, &[0, 1, 0, 1, 0]),
        PaylineDef::from_rows(9, &[2, 1, 2, 1, 2]),
    ]
}

/// A win on a single payline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinningLine {
    pub payline_id: u32,
    /// Symbols of the winning run, left to right (wilds included as drawn)
    #[serde(rename = "symbols")]
    pub matched_symbol_ids: Vec<SymbolId>,
    pub win_amount: f64,
}

/// Left-to-right run on one payline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRun<'a> {
    /// Symbol the run pays as
    pub symbol: &'a str,
    /// Cells in the run
    pub count: usize,
}

/// Find the leading run of a line.
///
/// A cell extends the run if it equals the run symbol or is the wild. A wild in
/// the first cell takes on the identity of the second cell. The walk stops at
/// the first cell that does neither.
pub fn leading_run<'a>(line: &[&'a str], wild: Option<&str>) -> Option<LineRun<'a>> {
    let (&first, rest) = line.split_first()?;
    let mut symbol = first;
    let mut count = 1;

    for (offset, &current) in rest.iter().enumerate() {
        let is_wild = wild == Some(current);
        let leading_wild = offset == 0 && wild == Some(symbol);

        if current == symbol || is_wild || leading_wild {
            if leading_wild {
                symbol = current;
            }
            count += 1;
        } else {
            break;
        }
    }

    Some(LineRun { symbol, count })
}

/// Prices every configured payline against a grid
pub struct PaylineEvaluator<'a> {
    config: &'a SlotConfig,
    wild_id: Option<&'a str>,
}

impl<'a> PaylineEvaluator<'a> {
    pub fn new(config: &'a SlotConfig) -> Self {
        Self {
            config,
            wild_id: config.wild_symbol().map(|s| s.id.as_str()),
        }
    }

    /// Evaluate all paylines. Each line is independent; a cell can be part of
    /// several winning lines.
    pub fn evaluate(&self, grid: &Grid, bet: f64) -> Vec<WinningLine> {
        self.config
            .paylines
            .iter()
            .filter_map(|payline| self.evaluate_line(grid, payline, bet))
            .collect()
    }

    fn evaluate_line(&self, grid: &Grid, payline: &PaylineDef, bet: f64) -> Option<WinningLine> {
        let line = line_symbols(grid, payline);
        let run = leading_run(&line, self.wild_id)?;

        // Minimum 3 for a win
        if run.count < 3 {
            return None;
        }

        let symbol = self.config.symbol(run.symbol)?;
        let win_amount = bet * symbol.payout.for_count(run.count);
        if win_amount <= 0.0 {
            return None;
        }

        Some(WinningLine {
            payline_id: payline.id,
            matched_symbol_ids: line[..run.count].iter().map(|s| s.to_string()).collect(),
            win_amount,
        })
    }
}

/// Symbols under a payline. Cells outside the grid or left empty are skipped.
pub fn line_symbols<'g>(grid: &'g Grid, payline: &PaylineDef) -> Vec<&'g str> {
    payline
        .positions
        .iter()
        .filter_map(|pos| grid.get(pos.row()).and_then(|row| row.get(pos.col())))
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect()
}
