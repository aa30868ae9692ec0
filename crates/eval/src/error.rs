// Copyright (C) 2025 Showdown Developers
// SPDX-License-Identifier: Apache-2.0

//! Evaluator and simulator errors.
use thiserror::Error;

/// Evaluator result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the evaluator and the equity simulator.
///
/// Cards errors such as duplicate cards or not enough cards left to deal are
/// forwarded as [Error::Cards].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A hand must have between 5 and 7 cards.
    #[error("a hand must have 5 to 7 cards, got {0}")]
    InvalidHandSize(usize),
    /// The hero must have exactly 2 hole cards.
    #[error("expected 2 hole cards, got {0}")]
    InvalidHoleCards(usize),
    /// The board has more than 5 cards or is not a street board.
    #[error("invalid board with {0} cards")]
    InvalidBoardSize(usize),
    /// A simulation needs at least one trial.
    #[error("the number of trials must be positive")]
    InvalidTrials,
    /// A parallel simulation needs at least one task.
    #[error("the number of tasks must be positive")]
    InvalidTasks,
    /// Invalid cards.
    #[error(transparent)]
    Cards(#[from] showdown_cards::Error),
}
