//! Play session: credits, bet selection, queued free spins and statistics

use serde::{Deserialize, Serialize};

use crate::config::SlotConfig;
use crate::engine::SlotEngine;
use crate::spin::{SpinOutcome, SpinResult};
use crate::validate::ConfigurationError;

/// Credits added by a top-up
pub const TOP_UP_CREDITS: f64 = 1000.0;

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub total_spins: u64,
    pub total_bet: f64,
    pub total_win: f64,
    pub wins: u64,
    pub losses: u64,
    pub free_spins_awarded: u64,
    pub multipliers_hit: u64,
    pub jackpots_hit: u64,
    pub max_win: f64,
}

impl SessionStats {
    /// Fold one completed spin into the totals
    pub fn record(&mut self, bet: f64, result: &SpinResult) {
        self.total_spins += 1;
        self.total_bet += bet;
        self.total_win += result.total_win;

        if result.is_win() {
            self.wins += 1;
        } else {
            self.losses += 1;
        }

        let features = &result.triggered_features;
        self.free_spins_awarded += u64::from(features.free_spins.unwrap_or(0));
        if features.multiplier.is_some() {
            self.multipliers_hit += 1;
        }
        if features.jackpot {
            self.jackpots_hit += 1;
        }
        self.max_win = self.max_win.max(result.total_win);
    }

    /// Observed return to player (ratio, not percent)
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0.0 {
            self.total_win / self.total_bet
        } else {
            0.0
        }
    }

    /// Fraction of spins that paid anything
    pub fn hit_rate(&self) -> f64 {
        if self.total_spins > 0 {
            self.wins as f64 / self.total_spins as f64
        } else {
            0.0
        }
    }
}

/// Rejected play
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Not enough credits: have {credits}, bet is {bet}")]
    InsufficientCredits { credits: f64, bet: f64 },

    #[error("Bet {bet} outside allowed range {min_bet}..={max_bet}")]
    BetOutOfRange { bet: f64, min_bet: f64, max_bet: f64 },

    #[error("Invalid machine configuration: {0}")]
    InvalidConfig(#[from] ConfigurationError),
}

/// A player's session on one machine
///
/// Spins are strictly sequential: the bet is debited, the spin is priced and
/// the win credited before the next play can start.
pub struct Session {
    config: SlotConfig,
    engine: SlotEngine,
    credits: f64,
    bet: f64,
    pending_free_spins: u32,
    stats: SessionStats,
}

impl Session {
    /// Open a session. The configuration is validated once up front.
    pub fn new(config: SlotConfig, credits: f64) -> Result<Self, SessionError> {
        Self::with_engine(config, credits, SlotEngine::new())
    }

    pub fn with_engine(
        config: SlotConfig,
        credits: f64,
        engine: SlotEngine,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let bet = config.min_bet;

        Ok(Self {
            config,
            engine,
            credits,
            bet,
            pending_free_spins: 0,
            stats: SessionStats::default(),
        })
    }

    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    pub fn credits(&self) -> f64 {
        self.credits
    }

    pub fn bet(&self) -> f64 {
        self.bet
    }

    /// Awarded spins still queued for auto-play
    pub fn pending_free_spins(&self) -> u32 {
        self.pending_free_spins
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Select a bet within `minBet..=maxBet`
    pub fn set_bet(&mut self, bet: f64) -> Result<(), SessionError> {
        if !(self.config.min_bet..=self.config.max_bet).contains(&bet) {
            return Err(SessionError::BetOutOfRange {
                bet,
                min_bet: self.config.min_bet,
                max_bet: self.config.max_bet,
            });
        }
        self.bet = bet;
        Ok(())
    }

    pub fn add_credits(&mut self, amount: f64) {
        self.credits += amount;
    }

    /// Play one spin at the current bet.
    ///
    /// Queued free spins are auto-played at the current bet and are debited
    /// like any other spin; each play consumes one queued spin. Newly awarded
    /// spins are added to the queue. The builder UI this mirrors replaces the
    /// queue with the latest award instead, dropping any spins still queued.
    pub fn play(&mut self) -> Result<SpinResult, SessionError> {
        if self.credits < self.bet {
            return Err(SessionError::InsufficientCredits {
                credits: self.credits,
                bet: self.bet,
            });
        }

        let result = match self.engine.spin(&self.config, self.bet) {
            SpinOutcome::Completed(result) => result,
            SpinOutcome::Rejected(err) => return Err(err.into()),
        };

        self.credits -= self.bet;
        self.credits += result.total_win;
        self.pending_free_spins = self.pending_free_spins.saturating_sub(1);
        self.stats.record(self.bet, &result);

        if let Some(awarded) = result.triggered_features.free_spins {
            log::info!("{awarded} free spins awarded on '{}'", self.config.id);
            self.pending_free_spins += awarded;
        }
        if result.triggered_features.jackpot {
            log::info!("Jackpot on '{}': total win {}", self.config.id, result.total_win);
        }

        Ok(result)
    }

    /// Play until the free-spin queue is empty or credits run out.
    /// Returns the results of the spins played.
    pub fn play_free_spins(&mut self) -> Vec<SpinResult> {
        let mut results = Vec::new();
        while self.pending_free_spins > 0 {
            match self.play() {
                Ok(result) => results.push(result),
                Err(err) => {
                    log::info!("Free spins stopped: {err}");
                    break;
                }
            }
        }
        results
    }
}
