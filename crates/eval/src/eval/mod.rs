// Copyright (C) 2025 Showdown Developers
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator classifies 5, 6, and 7 cards hands by counting ranks and
//! building a rank mask for each suit, the best 5 cards hand is found without
//! enumerating the 5-cards subsets: flushes and straights are searched in all
//! suits and all rank windows, and groups of equal ranks are taken from the
//! highest.
//!
//! A [HandValue] orders hands by category and then by tie-break key, so hands
//! can be compared with the usual comparison operators.
use std::cmp::Ordering;

use crate::{Card, Result};

mod value;
pub use value::{HandRank, HandValue};

/// Evaluates a 5 to 7 cards hand.
pub fn evaluate_hand(cards: &[Card]) -> Result<HandValue> {
    HandValue::eval(cards)
}

/// Compares two hands, [Ordering::Greater] if the first hand wins,
/// [Ordering::Less] if the second hand wins, and [Ordering::Equal] for a tie.
pub fn compare(first: &[Card], second: &[Card]) -> Result<Ordering> {
    Ok(HandValue::eval(first)?.cmp(&HandValue::eval(second)?))
}
