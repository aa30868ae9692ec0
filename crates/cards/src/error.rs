// Copyright (C) 2025 Showdown Developers
// SPDX-License-Identifier: Apache-2.0

//! Cards errors.
use thiserror::Error;

use crate::Card;

/// Cards result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned when building cards, decks, and card sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The text is not a `{rank}{suit}` card.
    #[error("invalid card string {0:?}")]
    InvalidCardString(String),
    /// The same card appears more than once.
    #[error("duplicate card {0}")]
    DuplicateCard(Card),
    /// The card is not in the deck.
    #[error("card {0} is not in the deck")]
    UnknownCard(Card),
    /// Not enough cards left in the deck.
    #[error("requested {requested} cards but only {available} are available")]
    InsufficientCards {
        /// Number of cards requested.
        requested: usize,
        /// Number of cards left.
        available: usize,
    },
}
