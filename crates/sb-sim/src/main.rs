//! Slot Builder batch simulator
//!
//! Usage:
//!   sb-sim                                  - 1000 spins on the starter machine
//!   sb-sim --config machine.yaml --bet 5    - simulate a saved machine
//!   sb-sim --seed 42 --spins 100000 --json  - reproducible run, JSON report

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;

use sb_engine::{EngineRules, SessionStats, SlotConfig};

mod simulation;

use simulation::{DEFAULT_FREE_SPIN_CAP, SimOptions, simulate};

#[derive(Parser)]
#[command(name = "sb-sim", about = "Simulate spins on a slot machine configuration")]
struct Cli {
    /// Machine configuration (.json, .yaml or .yml); the starter machine if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Engine rules override (JSON, partial documents allowed)
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Bet per spin; the machine's minimum bet if omitted
    #[arg(short, long)]
    bet: Option<f64>,

    /// Number of paid spins
    #[arg(short = 'n', long, default_value_t = 1000)]
    spins: u64,

    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Play awarded free spins after each paid spin
    #[arg(long)]
    free_spins: bool,

    /// Longest free-spin chain played after one paid spin
    #[arg(long, default_value_t = DEFAULT_FREE_SPIN_CAP)]
    free_spin_cap: u64,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    machine: &'a str,
    bet: f64,
    seed: Option<u64>,
    paid_spins: u64,
    free_spins_played: u64,
    truncated_chains: u64,
    theoretical_rtp: f64,
    observed_rtp: f64,
    hit_rate: f64,
    credits_added: f64,
    net_result: f64,
    stats: &'a SessionStats,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SlotConfig::starter(),
    };
    if let Err(err) = sb_engine::validate(&config) {
        bail!("Invalid machine configuration [{}]: {err}", err.rule());
    }

    let rules = match &cli.rules {
        Some(path) => load_rules(path)?,
        None => EngineRules::default(),
    };

    let options = SimOptions {
        bet: cli.bet,
        spins: cli.spins,
        seed: cli.seed,
        play_free_spins: cli.free_spins,
        free_spin_cap: cli.free_spin_cap,
    };

    log::info!("Simulating {} spins on '{}'", cli.spins, config.id);
    let sim = simulate(config, rules, &options).context("Simulation failed")?;

    let session = &sim.session;
    let stats = session.stats();
    let report = Report {
        machine: &session.config().name,
        bet: session.bet(),
        seed: cli.seed,
        paid_spins: sim.paid_spins,
        free_spins_played: sim.free_spins_played,
        truncated_chains: sim.truncated_chains,
        theoretical_rtp: session.config().theoretical_rtp(),
        observed_rtp: stats.rtp(),
        hit_rate: stats.hit_rate(),
        credits_added: sim.credits_added,
        net_result: sim.net_result(),
        stats,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<SlotConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let parsed = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => SlotConfig::from_yaml(&text),
        _ => SlotConfig::from_json(&text),
    };
    parsed.with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_rules(path: &Path) -> Result<EngineRules> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_report(report: &Report<'_>) {
    let stats = report.stats;

    println!("Machine:          {}", report.machine);
    println!("Bet:              {}", report.bet);
    if let Some(seed) = report.seed {
        println!("Seed:             {seed}");
    }
    println!("Paid spins:       {}", report.paid_spins);
    println!("Free spins:       {}", report.free_spins_played);
    if report.truncated_chains > 0 {
        println!("Chains cut off:   {}", report.truncated_chains);
    }
    println!("Wagered:          {:.2}", stats.total_bet);
    println!("Won:              {:.2}", stats.total_win);
    println!("Observed RTP:     {:.2}%", report.observed_rtp * 100.0);
    println!("Configured RTP:   {:.2}%", report.theoretical_rtp * 100.0);
    println!("Hit rate:         {:.2}%", report.hit_rate * 100.0);
    println!("Max win:          {:.2}", stats.max_win);
    println!("Free awarded:     {}", stats.free_spins_awarded);
    println!("Multipliers:      {}", stats.multipliers_hit);
    println!("Jackpots:         {}", stats.jackpots_hit);
    println!("Credits added:    {:.2}", report.credits_added);
    println!("Net result:       {:.2}", report.net_result);
}
