//! Structural validation of machine configurations

use crate::config::SlotConfig;
use crate::symbols::SymbolId;

/// A violated configuration invariant
///
/// Variants are listed in the order the checks run; validation stops at the
/// first failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Missing slot machine ID")]
    MissingId,

    #[error("Missing slot machine name")]
    MissingName,

    #[error("Invalid number of rows: {0}")]
    InvalidRows(usize),

    #[error("Invalid number of columns: {0}")]
    InvalidColumns(usize),

    #[error("No symbols defined")]
    NoSymbols,

    #[error("Symbol weight defined for non-existent symbol: {0}")]
    UnknownWeightSymbol(SymbolId),

    #[error("No paylines defined")]
    NoPaylines,

    #[error("Payline {payline_id} has {actual} positions, expected {expected}")]
    PaylineLength {
        payline_id: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Payline {payline_id} has invalid position: [{row}, {col}]")]
    PaylinePositionOutOfBounds { payline_id: u32, row: usize, col: usize },

    #[error("No bet options defined")]
    NoBetOptions,

    #[error("Minimum bet must be greater than 0 (got {0})")]
    NonPositiveMinBet(f64),

    #[error("Maximum bet {max_bet} is below minimum bet {min_bet}")]
    MaxBetBelowMinBet { min_bet: f64, max_bet: f64 },

    #[error("RTP must be in (0, 1] (got {0})")]
    RtpOutOfRange(f64),
}

impl ConfigurationError {
    /// Stable rule name, suitable for matching in callers and logs
    pub fn rule(&self) -> &'static str {
        match self {
            Self::MissingId => "missing_id",
            Self::MissingName => "missing_name",
            Self::InvalidRows(_) => "invalid_rows",
            Self::InvalidColumns(_) => "invalid_columns",
            Self::NoSymbols => "no_symbols",
            Self::UnknownWeightSymbol(_) => "unknown_weight_symbol",
            Self::NoPaylines => "no_paylines",
            Self::PaylineLength { .. } => "payline_length",
            Self::PaylinePositionOutOfBounds { .. } => "payline_out_of_bounds",
            Self::NoBetOptions => "no_bet_options",
            Self::NonPositiveMinBet(_) => "min_bet_not_positive",
            Self::MaxBetBelowMinBet { .. } => "max_bet_below_min_bet",
            Self::RtpOutOfRange(_) => "rtp_out_of_range",
        }
    }
}

impl SlotConfig {
    /// Check the configuration's structural invariants.
    ///
    /// Pure and idempotent: the same config always yields the same result.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.id.is_empty() {
            return Err(ConfigurationError::MissingId);
        }
        if self.name.is_empty() {
            return Err(ConfigurationError::MissingName);
        }

        let rows = self.reels.rows;
        let cols = self.reels.cols;
        if rows < 1 {
            return Err(ConfigurationError::InvalidRows(rows));
        }
        if cols < 1 {
            return Err(ConfigurationError::InvalidColumns(cols));
        }

        if self.symbols.is_empty() {
            return Err(ConfigurationError::NoSymbols);
        }
        if let Some(unknown) = self
            .reels
            .symbol_weights
            .keys()
            .find(|id| self.symbol(id).is_none())
        {
            return Err(ConfigurationError::UnknownWeightSymbol(unknown.clone()));
        }

        if self.paylines.is_empty() {
            return Err(ConfigurationError::NoPaylines);
        }
        for payline in &self.paylines {
            if payline.positions.len() != cols {
                return Err(ConfigurationError::PaylineLength {
                    payline_id: payline.id,
                    expected: cols,
                    actual: payline.positions.len(),
                });
            }

            if let Some(pos) = payline
                .positions
                .iter()
                .find(|pos| pos.row() >= rows || pos.col() >= cols)
            {
                return Err(ConfigurationError::PaylinePositionOutOfBounds {
                    payline_id: payline.id,
                    row: pos.row(),
                    col: pos.col(),
                });
            }
        }

        if self.bet_options.is_empty() {
            return Err(ConfigurationError::NoBetOptions);
        }
        // Negated comparisons also reject NaN
        if !(self.min_bet > 0.0) {
            return Err(ConfigurationError::NonPositiveMinBet(self.min_bet));
        }
        if !(self.max_bet >= self.min_bet) {
            return Err(ConfigurationError::MaxBetBelowMinBet {
                min_bet: self.min_bet,
                max_bet: self.max_bet,
            });
        }

        if !(self.rtp > 0.0 && self.rtp <= 1.0) {
            return Err(ConfigurationError::RtpOutOfRange(self.rtp));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paylines::{PaylineDef, Position};
    use crate::symbols::{Payout, SymbolDef};

    fn minimal() -> SlotConfig {
        let mut config = SlotConfig::starter();
        config.reels.rows = 3;
        config.reels.cols = 3;
        config.symbols = vec![SymbolDef::regular("a", "A", "Apple", Payout::new(5.0, 0.0, 0.0))];
        config.reels.symbol_weights = [("a".to_string(), 1)].into_iter().collect();
        config.paylines = vec![PaylineDef::straight(1, 1, 3)];
        config.bet_options = vec![1.0];
        config.min_bet = 1.0;
        config.max_bet = 1.0;
        config.rtp = 1.0;
        config
    }

    fn rule_of(config: &SlotConfig) -> &'static str {
        config.validate().unwrap_err().rule()
    }

    #[test]
    fn test_accepts_minimal_and_starter() {
        assert_eq!(minimal().validate(), Ok(()));
        assert_eq!(SlotConfig::starter().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_each_rule() {
        let mut c = minimal();
        c.id.clear();
        assert_eq!(rule_of(&c), "missing_id");

        let mut c = minimal();
        c.name.clear();
        assert_eq!(rule_of(&c), "missing_name");

        let mut c = minimal();
        c.reels.rows = 0;
        assert_eq!(rule_of(&c), "invalid_rows");

        let mut c = minimal();
        c.reels.cols = 0;
        assert_eq!(rule_of(&c), "invalid_columns");

        let mut c = minimal();
        c.symbols.clear();
        assert_eq!(rule_of(&c), "no_symbols");

        let mut c = minimal();
        c.reels.symbol_weights.insert("ghost".into(), 2);
        assert_eq!(
            c.validate(),
            Err(ConfigurationError::UnknownWeightSymbol("ghost".into()))
        );

        let mut c = minimal();
        c.paylines.clear();
        assert_eq!(rule_of(&c), "no_paylines");

        let mut c = minimal();
        c.paylines[0].positions.pop();
        assert_eq!(
            c.validate(),
            Err(ConfigurationError::PaylineLength {
                payline_id: 1,
                expected: 3,
                actual: 2
            })
        );

        let mut c = minimal();
        c.paylines[0].positions[2] = Position(3, 2);
        assert_eq!(
            c.validate(),
            Err(ConfigurationError::PaylinePositionOutOfBounds {
                payline_id: 1,
                row: 3,
                col: 2
            })
        );

        let mut c = minimal();
        c.bet_options.clear();
        assert_eq!(rule_of(&c), "no_bet_options");

        let mut c = minimal();
        c.min_bet = 0.0;
        assert_eq!(rule_of(&c), "min_bet_not_positive");

        let mut c = minimal();
        c.max_bet = 0.5;
        assert_eq!(rule_of(&c), "max_bet_below_min_bet");

        let mut c = minimal();
        c.rtp = 0.0;
        assert_eq!(rule_of(&c), "rtp_out_of_range");
        c.rtp = 1.01;
        assert_eq!(rule_of(&c), "rtp_out_of_range");
        c.rtp = f64::NAN;
        assert_eq!(rule_of(&c), "rtp_out_of_range");
    }

    #[test]
    fn test_first_failure_wins() {
        let mut c = minimal();
        c.name.clear();
        c.symbols.clear();
        c.rtp = 5.0;
        assert_eq!(c.validate(), Err(ConfigurationError::MissingName));
    }

    #[test]
    fn test_column_out_of_bounds() {
        let mut c = minimal();
        c.paylines[0].positions[0] = Position(0, 7);
        assert_eq!(rule_of(&c), "payline_out_of_bounds");
    }

    #[test]
    fn test_idempotent() {
        let mut c = minimal();
        assert_eq!(c.validate(), c.validate());
        c.max_bet = 0.1;
        assert_eq!(c.validate(), c.validate());
    }

    #[test]
    fn test_error_message_names_rule() {
        let err = ConfigurationError::UnknownWeightSymbol("ghost".into());
        assert_eq!(
            err.to_string(),
            "Symbol weight defined for non-existent symbol: ghost"
        );
    }
}
