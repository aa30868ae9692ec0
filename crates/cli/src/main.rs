// Copyright (C) 2025 Showdown Developers
// SPDX-License-Identifier: Apache-2.0

//! Showdown CLI.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, value_parser};
use log::info;
use rand::{prelude::*, rngs::StdRng};
use std::{
    cmp::Ordering,
    sync::{
        Arc,
        atomic::{self, AtomicBool},
    },
    thread,
    time::Duration,
};

use showdown_eval::{
    Card, Config, HandValue, Outcome, live_opponents, parse_cards, street::street_equity_until,
};

mod chart;
mod deal;

#[derive(Debug, Parser)]
#[command(version, about = "Poker hand evaluator and win probability calculator.")]
struct Cli {
    /// Enables debug logs.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluates hands of 5 to 7 cards, compares them when given two hands.
    Eval {
        /// The hands, for example "AhKhQhJhTh" or "Ah,Kh,Qh,Jh,Th".
        #[arg(required = true, num_args = 1..)]
        hands: Vec<String>,
    },
    /// Estimates the hero win probability on the street given by the board.
    Equity {
        /// The hero hole cards, for example "AhAd".
        #[arg(long)]
        hero: String,
        /// The known board cards, 0, 3, 4, or 5 cards.
        #[arg(long, short, default_value = "")]
        board: String,
        #[command(flatten)]
        table: TableArgs,
        #[command(flatten)]
        sim: SimArgs,
    },
    /// Deals a random hand and estimates the hero win probability on each street.
    Deal {
        #[command(flatten)]
        table: TableArgs,
        #[command(flatten)]
        sim: SimArgs,
    },
    /// Prints the pre-flop win probability of each starting hand.
    Chart {
        /// The number of opposing players.
        #[arg(long, short, default_value_t = 1, value_parser = value_parser!(u8).range(1..=9))]
        opponents: u8,
        #[command(flatten)]
        sim: SimArgs,
    },
}

/// Table settings.
#[derive(Debug, Args)]
struct TableArgs {
    /// Number of players at the table including the hero.
    #[arg(long, short, default_value_t = 8, value_parser = value_parser!(u8).range(2..=10))]
    players: u8,
    /// Number of players that folded.
    #[arg(long, short, default_value_t = 0)]
    folded: u8,
    /// Number of opponents, overrides players and folded.
    #[arg(long, short, conflicts_with_all = ["players", "folded"])]
    opponents: Option<u8>,
}

impl TableArgs {
    fn opponents(&self) -> usize {
        self.opponents
            .map(usize::from)
            .unwrap_or_else(|| live_opponents(self.players.into(), self.folded.into()))
    }
}

/// Simulation settings.
#[derive(Debug, Args)]
struct SimArgs {
    /// Number of trials for each simulation.
    #[arg(long, short, default_value_t = 10_000, value_parser = value_parser!(u32).range(1..))]
    trials: u32,
    /// Number of parallel tasks.
    #[arg(long, default_value_t = 1, value_parser = value_parser!(u8).range(1..=64))]
    tasks: u8,
    /// Seed for reproducible simulations.
    #[arg(long, short)]
    seed: Option<u64>,
    /// Stops a simulation after this many seconds.
    #[arg(long)]
    timeout: Option<f64>,
}

impl SimArgs {
    fn config(&self) -> Config {
        Config {
            trials: self.trials as usize,
            tasks: self.tasks as usize,
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Returns a flag that is set when the timeout expires.
    fn cancel_flag(&self) -> Result<Arc<AtomicBool>> {
        let cancel = Arc::new(AtomicBool::new(false));

        if let Some(secs) = self.timeout {
            let Ok(timeout) = Duration::try_from_secs_f64(secs) else {
                bail!("Invalid timeout {secs}");
            };

            let flag = cancel.clone();
            thread::spawn(move || {
                thread::sleep(timeout);
                flag.store(true, atomic::Ordering::Relaxed);
            });
        }

        Ok(cancel)
    }
}

/// Fails for simulations stopped by the timeout.
fn check_complete(outcome: &Outcome) -> Result<()> {
    if !outcome.is_complete() {
        bail!(
            "Simulation timed out after {} trials, not enough to estimate the win probability",
            outcome.trials()
        );
    }

    Ok(())
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn eval(hands: &[String]) -> Result<()> {
    let mut values = Vec::with_capacity(hands.len());
    for hand in hands {
        let cards = parse_cards(hand)?;
        let value = HandValue::eval(&cards)?;
        println!("{:<22} {value}", format_cards(&cards));
        values.push(value);
    }

    if let [first, second] = values.as_slice() {
        match first.cmp(second) {
            Ordering::Greater => println!("First hand wins"),
            Ordering::Less => println!("Second hand wins"),
            Ordering::Equal => println!("Tie"),
        }
    }

    Ok(())
}

fn equity(hero: &str, board: &str, table: &TableArgs, sim: &SimArgs) -> Result<()> {
    let hero = parse_cards(hero)?;
    let board = parse_cards(board)?;
    let opponents = table.opponents();

    info!(
        "Hero {} board [{}] against {opponents} opponents",
        format_cards(&hero),
        format_cards(&board)
    );

    let cancel = sim.cancel_flag()?;
    let equity = street_equity_until(
        &hero,
        &board,
        opponents,
        &sim.config(),
        &mut sim.rng(),
        &cancel,
    )?;

    check_complete(&equity.outcome)?;

    let outcome = &equity.outcome;
    println!("{equity}");
    println!(
        "wins={} ties={} losses={} trials={}",
        outcome.wins(),
        outcome.ties(),
        outcome.losses(),
        outcome.trials()
    );

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    match &cli.command {
        Command::Eval { hands } => eval(hands),
        Command::Equity {
            hero,
            board,
            table,
            sim,
        } => equity(hero, board, table, sim),
        Command::Deal { table, sim } => {
            let cancel = sim.cancel_flag()?;
            deal::run(table.opponents(), &sim.config(), &mut sim.rng(), &cancel)
        }
        Command::Chart { opponents, sim } => {
            let cancel = sim.cancel_flag()?;
            chart::run((*opponents).into(), &sim.config(), &mut sim.rng(), &cancel)
        }
    }
}
