// Copyright (C) 2025 Showdown Developers
// SPDX-License-Identifier: Apache-2.0

//! Monte Carlo equity simulation.
//!
//! A [Simulation] removes the hero and board cards from the deck once, then for
//! each trial deals two cards to each opponent and completes the board with a
//! partial shuffle of the remaining cards. The hero wins a trial when its hand
//! beats all the opponents hands and ties when the best opponent hand has the
//! same value.
//!
//! Ties are credited as an even split among the hero and all the opponents,
//! so the win probability is `(wins + ties / (opponents + 1)) / trials` even
//! when only some of the opponents tie for the best hand.
use log::{debug, warn};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    sync::atomic::{self, AtomicBool},
    time::Instant,
};

use crate::{Card, Deck, Error, HandValue, Result};

#[cfg(feature = "parallel")]
mod parallel;

/// Number of cards on a complete board.
pub const BOARD_SIZE: usize = 5;

/// Simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of trials.
    pub trials: usize,
    /// Number of parallel tasks, used only with the `parallel` feature.
    pub tasks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trials: 10_000,
            tasks: 1,
        }
    }
}

/// The result of a simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    wins: u64,
    ties: u64,
    trials: u64,
    requested: u64,
    opponents: usize,
}

impl Outcome {
    fn new(opponents: usize, requested: usize) -> Self {
        Self {
            opponents,
            requested: requested as u64,
            ..Default::default()
        }
    }

    /// Trials won by the hero.
    pub fn wins(&self) -> u64 {
        self.wins
    }

    /// Trials where the hero tied for the best hand.
    pub fn ties(&self) -> u64 {
        self.ties
    }

    /// Trials lost by the hero.
    pub fn losses(&self) -> u64 {
        self.trials.saturating_sub(self.wins.saturating_add(self.ties))
    }

    /// Completed trials.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Number of opponents.
    pub fn opponents(&self) -> usize {
        self.opponents
    }

    /// Checks if all the requested trials completed, a cancelled simulation
    /// doesn't have a valid probability.
    pub fn is_complete(&self) -> bool {
        self.trials > 0 && self.trials == self.requested
    }

    /// The hero win probability over the completed trials.
    pub fn win_probability(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }

        let ties = self.ties as f64 / (self.opponents + 1) as f64;
        (self.wins as f64 + ties) / self.trials as f64
    }

    fn record(&mut self, result: Ordering) {
        match result {
            Ordering::Greater => self.wins += 1,
            Ordering::Equal => self.ties += 1,
            Ordering::Less => {}
        }

        self.trials += 1;
    }

    #[cfg_attr(not(feature = "parallel"), allow(dead_code))]
    fn merge(&mut self, other: &Outcome) {
        self.wins += other.wins;
        self.ties += other.ties;
        self.trials += other.trials;
        self.requested += other.requested;
    }
}

/// A Monte Carlo simulation of the hero hand against random opponents hands.
#[derive(Debug, Clone)]
pub struct Simulation {
    hero: [Card; 2],
    board: Vec<Card>,
    opponents: usize,
    required: usize,
    pool: Vec<Card>,
}

impl Simulation {
    /// Creates a simulation for the hero hole cards, the known board cards,
    /// and the number of opponents.
    ///
    /// Fails if the hero doesn't have 2 cards, the board has more than 5 cards,
    /// a card is repeated, or there are not enough cards left to deal all the
    /// opponents hands and the rest of the board.
    pub fn new(hero: &[Card], board: &[Card], opponents: usize) -> Result<Self> {
        let hero: [Card; 2] = hero
            .try_into()
            .map_err(|_| Error::InvalidHoleCards(hero.len()))?;

        if board.len() > BOARD_SIZE {
            return Err(Error::InvalidBoardSize(board.len()));
        }

        let deck = Deck::without(&[&hero[..], board].concat())?;
        let insufficient = |requested: usize| showdown_cards::Error::InsufficientCards {
            requested,
            available: deck.count(),
        };

        let required = opponents
            .checked_mul(2)
            .and_then(|n| n.checked_add(BOARD_SIZE - board.len()))
            .ok_or_else(|| insufficient(usize::MAX))?;
        if required > deck.count() {
            return Err(insufficient(required).into());
        }

        Ok(Self {
            hero,
            board: board.to_vec(),
            opponents,
            required,
            pool: deck.into_iter().collect(),
        })
    }

    /// The hero hole cards.
    pub fn hero(&self) -> &[Card] {
        &self.hero
    }

    /// The known board cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// Number of opponents.
    pub fn opponents(&self) -> usize {
        self.opponents
    }

    /// Cards dealt in each trial.
    pub fn required(&self) -> usize {
        self.required
    }

    /// Runs `trials` trials.
    pub fn run<R: Rng + ?Sized>(&self, trials: usize, rng: &mut R) -> Result<Outcome> {
        self.run_until(trials, rng, &AtomicBool::new(false))
    }

    /// Runs `trials` trials stopping early when `cancel` is set.
    ///
    /// A cancelled run returns the trials completed so far.
    pub fn run_until<R: Rng + ?Sized>(
        &self,
        trials: usize,
        rng: &mut R,
        cancel: &AtomicBool,
    ) -> Result<Outcome> {
        if trials == 0 {
            return Err(Error::InvalidTrials);
        }

        debug!(
            "Simulating {} opponents board={} trials={trials}",
            self.opponents,
            self.board.len()
        );

        let now = Instant::now();
        let outcome = self.simulate(trials, rng, cancel);
        self.log_outcome(&outcome, now);
        Ok(outcome)
    }

    /// Runs the simulation with the given settings.
    ///
    /// Without the `parallel` feature the number of tasks is ignored.
    pub fn run_with<R: Rng + ?Sized>(
        &self,
        config: &Config,
        rng: &mut R,
        cancel: &AtomicBool,
    ) -> Result<Outcome> {
        #[cfg(feature = "parallel")]
        if config.tasks > 1 {
            return self.par_run_until(config.tasks, config.trials, rng, cancel);
        }

        self.run_until(config.trials, rng, cancel)
    }

    fn simulate<R: Rng + ?Sized>(
        &self,
        trials: usize,
        rng: &mut R,
        cancel: &AtomicBool,
    ) -> Outcome {
        let mut outcome = Outcome::new(self.opponents, trials);
        let mut pool = self.pool.clone();

        let needed = self.required;
        let board_start = 2 * self.opponents;

        // Hole cards first then the board, the known board is copied once.
        let mut hand = [self.hero[0]; 2 + BOARD_SIZE];
        let dealt_start = 2 + self.board.len();
        hand[2..dealt_start].copy_from_slice(&self.board);

        for _ in 0..trials {
            if cancel.load(atomic::Ordering::Relaxed) {
                break;
            }

            // Nobody to lose to.
            if self.opponents == 0 {
                outcome.record(Ordering::Greater);
                continue;
            }

            let (dealt, _) = pool.partial_shuffle(rng, needed);
            hand[dealt_start..].copy_from_slice(&dealt[board_start..]);

            hand[..2].copy_from_slice(&self.hero);
            let hero_value = HandValue::eval_unchecked(&hand);

            let mut result = Ordering::Greater;
            for hole in dealt[..board_start].chunks_exact(2) {
                hand[..2].copy_from_slice(hole);
                match hero_value.cmp(&HandValue::eval_unchecked(&hand)) {
                    Ordering::Less => {
                        result = Ordering::Less;
                        break;
                    }
                    Ordering::Equal => result = Ordering::Equal,
                    Ordering::Greater => {}
                }
            }

            outcome.record(result);
        }

        outcome
    }

    fn log_outcome(&self, outcome: &Outcome, start: Instant) {
        if outcome.is_complete() {
            debug!(
                "Simulated wins={} ties={} trials={} in {:.3}s",
                outcome.wins,
                outcome.ties,
                outcome.trials,
                start.elapsed().as_secs_f64()
            );
        } else {
            warn!(
                "Simulation cancelled after {} of {} trials",
                outcome.trials, outcome.requested
            );
        }
    }
}

/// Estimates the hero win probability against `opponents` random hands.
pub fn estimate_win_probability<R: Rng + ?Sized>(
    hero: &[Card],
    board: &[Card],
    opponents: usize,
    trials: usize,
    rng: &mut R,
) -> Result<f64> {
    let outcome = Simulation::new(hero, board, opponents)?.run(trials, rng)?;
    Ok(outcome.win_probability())
}
