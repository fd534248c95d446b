//! Spin results

use serde::{Deserialize, Serialize};

use crate::features::TriggeredFeatures;
use crate::paylines::WinningLine;
use crate::reels::Grid;
use crate::validate::ConfigurationError;

/// Complete, priced outcome of one spin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinResult {
    /// Drawn grid (rows × cols)
    pub reel_positions: Grid,
    /// Line wins, after any multiplier
    pub winning_lines: Vec<WinningLine>,
    /// Line wins plus jackpot bonus
    pub total_win: f64,
    pub triggered_features: TriggeredFeatures,
}

impl SpinResult {
    /// All-empty result: blank grid, no wins, no features
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            reel_positions: vec![vec![String::new(); cols]; rows],
            winning_lines: Vec::new(),
            total_win: 0.0,
            triggered_features: TriggeredFeatures::default(),
        }
    }

    /// Check if this is a win
    pub fn is_win(&self) -> bool {
        self.total_win > 0.0
    }

    /// Sum of per-line amounts
    pub fn line_total(&self) -> f64 {
        self.winning_lines.iter().map(|l| l.win_amount).sum()
    }

    /// Win-to-bet ratio
    pub fn win_ratio(&self, bet: f64) -> f64 {
        if bet > 0.0 { self.total_win / bet } else { 0.0 }
    }

    /// IDs of the paylines that paid
    pub fn winning_payline_ids(&self) -> Vec<u32> {
        self.winning_lines.iter().map(|l| l.payline_id).collect()
    }
}

/// Outcome of a spin request
///
/// A rejected configuration is reported as such, never as a zero-value spin.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    Completed(SpinResult),
    Rejected(ConfigurationError),
}

impl SpinOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn result(&self) -> Option<&SpinResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Rejected(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ConfigurationError> {
        match self {
            Self::Completed(_) => None,
            Self::Rejected(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<SpinResult, ConfigurationError> {
        match self {
            Self::Completed(result) => Ok(result),
            Self::Rejected(err) => Err(err),
        }
    }
}

impl From<SpinOutcome> for Result<SpinResult, ConfigurationError> {
    fn from(outcome: SpinOutcome) -> Self {
        outcome.into_result()
    }
}
