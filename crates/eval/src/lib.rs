// Copyright (C) 2025 Showdown Developers
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker hand evaluator and equity simulator.
//!
//! The evaluator ranks 5, 6 and 7 cards hands, for 6 and 7 cards hands the
//! value is the value of the best 5 cards hand. To use the evaluator create a
//! hand and use [HandValue] to evaluate the hand and get its rank:
//!
//! ```
//! # use showdown_eval::*;
//! let wheel = HandValue::eval(&parse_cards("5h 4d 3c 2s Ah").unwrap()).unwrap();
//! let six_high = HandValue::eval(&parse_cards("6h 5d 4c 3s 2h").unwrap()).unwrap();
//! assert_eq!(wheel.rank(), HandRank::Straight);
//! assert_eq!(wheel.key(), vec![Rank::Five]);
//! assert!(six_high > wheel);
//! ```
//!
//! The equity simulator estimates the probability that the hero hand wins
//! against a number of opponents holding random cards, given the known board
//! cards:
//!
//! ```
//! # use showdown_eval::*;
//! # use rand::{SeedableRng, rngs::StdRng};
//! let hero = parse_cards("AhAd").unwrap();
//! let mut rng = StdRng::seed_from_u64(1);
//! let p = estimate_win_probability(&hero, &[], 1, 10_000, &mut rng).unwrap();
//! assert!(p > 0.8 && p < 0.9);
//! ```
//!
//! The **`parallel`** feature enables [Simulation::par_run] to split the
//! trials across parallel tasks.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod equity;
pub use equity::{Config, Outcome, Simulation, estimate_win_probability};

pub mod eval;
pub use eval::{HandRank, HandValue, compare, evaluate_hand};

mod error;
pub use error::{Error, Result};

pub mod street;
pub use street::{Street, StreetEquity, live_opponents, street_equity};

// Reexport cards types.
pub use showdown_cards::{Card, CardSet, Deck, Rank, Suit, parse_cards};
