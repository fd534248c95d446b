//! Symbol definitions and payout tables

use serde::{Deserialize, Serialize};

/// Symbol identifier as stored in configurations and grids
pub type SymbolId = String;

/// Payout multipliers for 3, 4 and 5 of a kind
///
/// Serialized as `{"3": .., "4": .., "5": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Payout {
    #[serde(rename = "3")]
    pub three: f64,
    #[serde(rename = "4")]
    pub four: f64,
    #[serde(rename = "5")]
    pub five: f64,
}

impl Payout {
    pub const fn new(three: f64, four: f64, five: f64) -> Self {
        Self { three, four, five }
    }

    /// Multiplier for a run of `count` matching symbols.
    ///
    /// Runs shorter than 3 pay nothing; runs longer than 5 reuse the 5-of-a-kind value.
    pub fn for_count(&self, count: usize) -> f64 {
        match count {
            0..=2 => 0.0,
            3 => self.three,
            4 => self.four,
            _ => self.five,
        }
    }
}

/// Symbol class used for per-column weight adjustment
///
/// Flags are not mutually exclusive on [`SymbolDef`]; when several are set the
/// class resolves in the order jackpot, wild, scatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SymbolClass {
    /// Regular paying symbol
    Regular = 0,
    /// Wild - substitutes for others on a payline run
    Wild = 1,
    /// Scatter - counted anywhere on the grid
    Scatter = 2,
    /// Jackpot symbol
    Jackpot = 3,
}

/// A symbol definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolDef {
    /// Unique, stable symbol ID
    pub id: SymbolId,
    /// Display glyph
    pub emoji: String,
    /// Display name
    pub name: String,
    /// Pay values for 3, 4, 5 of a kind
    pub payout: Payout,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_wild: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_scatter: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_jackpot: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl SymbolDef {
    /// Create a regular symbol
    pub fn regular(
        id: impl Into<SymbolId>,
        emoji: impl Into<String>,
        name: impl Into<String>,
        payout: Payout,
    ) -> Self {
        Self {
            id: id.into(),
            emoji: emoji.into(),
            name: name.into(),
            payout,
            is_wild: false,
            is_scatter: false,
            is_jackpot: false,
        }
    }

    /// Create a wild symbol
    pub fn wild(id: impl Into<SymbolId>, emoji: impl Into<String>, payout: Payout) -> Self {
        Self {
            is_wild: true,
            ..Self::regular(id, emoji, "Wild", payout)
        }
    }

    /// Create a scatter symbol
    pub fn scatter(id: impl Into<SymbolId>, emoji: impl Into<String>, payout: Payout) -> Self {
        Self {
            is_scatter: true,
            ..Self::regular(id, emoji, "Scatter", payout)
        }
    }

    /// Create a jackpot symbol
    pub fn jackpot(id: impl Into<SymbolId>, emoji: impl Into<String>, payout: Payout) -> Self {
        Self {
            is_jackpot: true,
            ..Self::regular(id, emoji, "Jackpot", payout)
        }
    }

    /// Rename the symbol (builder style)
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn class(&self) -> SymbolClass {
        if self.is_jackpot {
            SymbolClass::Jackpot
        } else if self.is_wild {
            SymbolClass::Wild
        } else if self.is_scatter {
            SymbolClass::Scatter
        } else {
            SymbolClass::Regular
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payout_for_count() {
        let payout = Payout::new(5.0, 10.0, 25.0);
        assert_eq!(payout.for_count(2), 0.0);
        assert_eq!(payout.for_count(3), 5.0);
        assert_eq!(payout.for_count(4), 10.0);
        assert_eq!(payout.for_count(5), 25.0);
        assert_eq!(payout.for_count(7), 25.0); // Capped at 5 of a kind
    }

    #[test]
    fn test_class_precedence() {
        let mut symbol = SymbolDef::wild("w", "⭐", Payout::default());
        assert_eq!(symbol.class(), SymbolClass::Wild);

        symbol.is_jackpot = true;
        assert_eq!(symbol.class(), SymbolClass::Jackpot);

        let scatter = SymbolDef::scatter("s", "🎁", Payout::default());
        assert_eq!(scatter.class(), SymbolClass::Scatter);
    }

    #[test]
    fn test_symbol_wire_shape() {
        let symbol = SymbolDef::wild("wild", "⭐", Payout::new(25.0, 75.0, 200.0));
        let value = serde_json::to_value(&symbol).unwrap();

        assert_eq!(value["isWild"], true);
        assert_eq!(value["payout"]["5"], 200.0);
        // Unset flags are omitted
        assert!(value.get("isScatter").is_none());

        let parsed: SymbolDef = serde_json::from_value(serde_json::json!({
            "id": "symbol_1",
            "emoji": "🍒",
            "name": "Cherry",
            "payout": { "3": 5, "4": 10, "5": 25 }
        }))
        .unwrap();
        assert_eq!(parsed.class(), SymbolClass::Regular);
        assert_eq!(parsed.payout.four, 10.0);
    }
}
