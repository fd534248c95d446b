//! Configuration authoring operations
//!
//! Edits performed by the machine builder. Each operation leaves the symbol
//! list, weight map and payline numbering consistent with each other.

use crate::config::{SlotConfig, current_timestamp};
use crate::paylines::{PaylineDef, Position};
use crate::symbols::{Payout, SymbolDef, SymbolId};

/// Fewest symbols a machine may be edited down to
pub const MIN_SYMBOLS: usize = 3;

/// Weight given to symbols added without an explicit weight
pub const DEFAULT_SYMBOL_WEIGHT: u32 = 10;

/// Special symbol presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialSymbol {
    Wild,
    Scatter,
    Jackpot,
}

impl SpecialSymbol {
    fn prefix(self) -> &'static str {
        match self {
            Self::Wild => "wild",
            Self::Scatter => "scatter",
            Self::Jackpot => "jackpot",
        }
    }

    /// Preset definition with the given ID
    pub fn definition(self, id: impl Into<SymbolId>) -> SymbolDef {
        match self {
            Self::Wild => SymbolDef::wild(id, "⭐", Payout::new(25.0, 50.0, 100.0)),
            Self::Scatter => SymbolDef::scatter(id, "🎁", Payout::new(5.0, 10.0, 20.0)),
            Self::Jackpot => SymbolDef::jackpot(id, "💰", Payout::new(50.0, 200.0, 500.0)),
        }
    }

    pub fn default_weight(self) -> u32 {
        match self {
            Self::Jackpot => 5,
            Self::Wild | Self::Scatter => DEFAULT_SYMBOL_WEIGHT,
        }
    }
}

/// Rejected edit
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("Symbol already exists: {0}")]
    DuplicateSymbol(SymbolId),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(SymbolId),

    #[error("Symbol weight must be at least 1 (got {0})")]
    InvalidWeight(u32),

    #[error("A machine needs at least {MIN_SYMBOLS} symbols")]
    TooFewSymbols,

    #[error("Cannot remove the last payline")]
    LastPayline,

    #[error("No payline at index {0}")]
    PaylineIndexOutOfRange(usize),
}

impl SlotConfig {
    /// Append a symbol and register its draw weight
    pub fn add_symbol(&mut self, symbol: SymbolDef, weight: u32) -> Result<(), EditError> {
        if weight < 1 {
            return Err(EditError::InvalidWeight(weight));
        }
        if self.symbol(&symbol.id).is_some() {
            return Err(EditError::DuplicateSymbol(symbol.id));
        }

        self.reels.symbol_weights.insert(symbol.id.clone(), weight);
        self.symbols.push(symbol);
        Ok(())
    }

    /// Append a preset wild, scatter or jackpot symbol. Returns its new ID.
    pub fn add_special_symbol(&mut self, kind: SpecialSymbol) -> Result<SymbolId, EditError> {
        let base = format!("{}_{}", kind.prefix(), current_timestamp());
        let mut id = base.clone();
        let mut suffix = 1;
        while self.symbol(&id).is_some() {
            id = format!("{base}_{suffix}");
            suffix += 1;
        }

        self.add_symbol(kind.definition(id.clone()), kind.default_weight())?;
        Ok(id)
    }

    /// Remove a symbol and its weight entry
    pub fn remove_symbol(&mut self, id: &str) -> Result<SymbolDef, EditError> {
        let index = self
            .symbols
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| EditError::UnknownSymbol(id.to_string()))?;
        if self.symbols.len() <= MIN_SYMBOLS {
            return Err(EditError::TooFewSymbols);
        }

        self.reels.symbol_weights.remove(id);
        Ok(self.symbols.remove(index))
    }

    /// Change a symbol's draw weight
    pub fn set_symbol_weight(&mut self, id: &str, weight: u32) -> Result<(), EditError> {
        if weight < 1 {
            return Err(EditError::InvalidWeight(weight));
        }
        if self.symbol(id).is_none() {
            return Err(EditError::UnknownSymbol(id.to_string()));
        }

        self.reels.symbol_weights.insert(id.to_string(), weight);
        Ok(())
    }

    /// Append a payline; it takes the next ID. Returns that ID.
    pub fn add_payline(&mut self, positions: Vec<Position>) -> u32 {
        let id = self.paylines.len() as u32 + 1;
        self.paylines.push(PaylineDef { id, positions });
        id
    }

    /// Remove the payline at `index` and renumber the rest `1..=n`
    pub fn remove_payline(&mut self, index: usize) -> Result<PaylineDef, EditError> {
        if index >= self.paylines.len() {
            return Err(EditError::PaylineIndexOutOfRange(index));
        }
        if self.paylines.len() <= 1 {
            return Err(EditError::LastPayline);
        }

        let removed = self.paylines.remove(index);
        for (i, payline) in self.paylines.iter_mut().enumerate() {
            payline.id = i as u32 + 1;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_symbol_registers_weight() {
        let mut config = SlotConfig::starter();
        let symbol = SymbolDef::regular("bell", "🔔", "Bell", Payout::new(5.0, 10.0, 20.0));

        config.add_symbol(symbol, DEFAULT_SYMBOL_WEIGHT).unwrap();
        assert_eq!(config.symbols.len(), 9);
        assert_eq!(config.reels.symbol_weights.get("bell"), Some(&10));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_add_symbol_rejects_duplicates_and_zero_weight() {
        let mut config = SlotConfig::starter();
        let cherry = config.symbols[0].clone();

        assert_eq!(
            config.add_symbol(cherry.clone(), 3),
            Err(EditError::DuplicateSymbol("symbol_1".into()))
        );
        assert_eq!(config.add_symbol(cherry, 0), Err(EditError::InvalidWeight(0)));
    }

    #[test]
    fn test_add_special_symbols() {
        let mut config = SlotConfig::starter();

        let wild = config.add_special_symbol(SpecialSymbol::Wild).unwrap();
        let second = config.add_special_symbol(SpecialSymbol::Wild).unwrap();
        let jackpot = config.add_special_symbol(SpecialSymbol::Jackpot).unwrap();

        assert_ne!(wild, second);
        assert!(config.symbol(&wild).unwrap().is_wild);
        assert_eq!(config.symbol(&wild).unwrap().payout, Payout::new(25.0, 50.0, 100.0));
        assert_eq!(config.reels.symbol_weights.get(&jackpot), Some(&5));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_remove_symbol_drops_weight() {
        let mut config = SlotConfig::starter();
        let removed = config.remove_symbol("symbol_3").unwrap();

        assert_eq!(removed.name, "Orange");
        assert!(!config.reels.symbol_weights.contains_key("symbol_3"));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_remove_symbol_keeps_minimum() {
        let mut config = SlotConfig::starter();
        config.symbols.truncate(MIN_SYMBOLS);

        assert_eq!(config.remove_symbol("symbol_1"), Err(EditError::TooFewSymbols));
        assert_eq!(
            config.remove_symbol("nope"),
            Err(EditError::UnknownSymbol("nope".into()))
        );
    }

    #[test]
    fn test_set_symbol_weight() {
        let mut config = SlotConfig::starter();
        config.set_symbol_weight("wild", 4).unwrap();
        assert_eq!(config.reels.symbol_weights.get("wild"), Some(&4));

        assert_eq!(config.set_symbol_weight("wild", 0), Err(EditError::InvalidWeight(0)));
        assert_eq!(
            config.set_symbol_weight("ghost", 2),
            Err(EditError::UnknownSymbol("ghost".into()))
        );
    }

    #[test]
    fn test_remove_payline_renumbers() {
        let mut config = SlotConfig::starter();
        let removed = config.remove_payline(3).unwrap();

        assert_eq!(removed.id, 4);
        let ids: Vec<u32> = config.paylines.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
        // Former line 5 (inverted V) is now line 4
        assert_eq!(config.paylines[3], PaylineDef::from_rows(4, &[2, 1, 0, 1, 2]));
    }

    #[test]
    fn test_remove_last_payline_refused() {
        let mut config = SlotConfig::starter();
        config.paylines.truncate(1);

        assert_eq!(config.remove_payline(0), Err(EditError::LastPayline));
        assert_eq!(config.remove_payline(4), Err(EditError::PaylineIndexOutOfRange(4)));
    }

    #[test]
    fn test_add_payline_takes_next_id() {
        let mut config = SlotConfig::starter();
        let id = config.add_payline(PaylineDef::from_rows(0, &[1, 0, 1, 0, 1]).positions);
        assert_eq!(id, 10);
        assert_eq!(config.payline(10).map(|p| p.positions.len()), Some(5));
    }
}
