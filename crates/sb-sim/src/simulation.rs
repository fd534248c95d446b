//! Simulation loop
//!
//! Plays paid spins on a [`Session`] that never runs dry: the balance is
//! topped up whenever it drops below the bet, and the top-ups are tracked so
//! the report can show them.

use sb_engine::{EngineRules, Session, SessionError, SlotConfig, SlotEngine, TOP_UP_CREDITS};

/// Free spins played after one paid spin before the chain is cut off
pub const DEFAULT_FREE_SPIN_CAP: u64 = 10_000;

/// Simulation run parameters
#[derive(Debug, Clone)]
pub struct SimOptions {
    /// Bet per spin; the machine's minimum bet if `None`
    pub bet: Option<f64>,
    /// Paid spins to play
    pub spins: u64,
    /// Seed for a reproducible run
    pub seed: Option<u64>,
    /// Auto-play awarded free spins after each paid spin
    pub play_free_spins: bool,
    /// Longest free-spin chain played after one paid spin
    pub free_spin_cap: u64,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            bet: None,
            spins: 1000,
            seed: None,
            play_free_spins: false,
            free_spin_cap: DEFAULT_FREE_SPIN_CAP,
        }
    }
}

/// Finished run
pub struct Simulation {
    pub session: Session,
    /// Paid spins played
    pub paid_spins: u64,
    /// Free spins played
    pub free_spins_played: u64,
    /// Credits added to keep the session funded
    pub credits_added: f64,
    /// Free-spin chains cut off at the cap
    pub truncated_chains: u64,
}

impl Simulation {
    /// Credits won or lost over the run
    pub fn net_result(&self) -> f64 {
        self.session.credits() - self.credits_added
    }
}

/// Run a simulation. Fails only on an invalid configuration or bet.
pub fn simulate(
    config: SlotConfig,
    rules: EngineRules,
    options: &SimOptions,
) -> Result<Simulation, SessionError> {
    let mut engine = SlotEngine::with_rules(rules);
    if let Some(seed) = options.seed {
        engine.seed(seed);
    }

    let bet = options.bet.unwrap_or(config.min_bet);
    let mut session = Session::with_engine(config, 0.0, engine)?;
    session.set_bet(bet)?;

    let mut sim = Simulation {
        session,
        paid_spins: 0,
        free_spins_played: 0,
        credits_added: 0.0,
        truncated_chains: 0,
    };

    for _ in 0..options.spins {
        sim.play_one()?;
        sim.paid_spins += 1;

        if !options.play_free_spins {
            continue;
        }
        let mut chain = 0;
        while sim.session.pending_free_spins() > 0 {
            if chain == options.free_spin_cap {
                log::warn!(
                    "Free-spin chain cut off after {chain} spins ({} still queued)",
                    sim.session.pending_free_spins()
                );
                sim.truncated_chains += 1;
                break;
            }
            sim.play_one()?;
            sim.free_spins_played += 1;
            chain += 1;
        }
    }

    Ok(sim)
}

impl Simulation {
    fn play_one(&mut self) -> Result<(), SessionError> {
        let bet = self.session.bet();
        if self.session.credits() < bet {
            let amount = TOP_UP_CREDITS.max(bet);
            self.session.add_credits(amount);
            self.credits_added += amount;
        }
        self.session.play().map(|_| ())
    }
}
