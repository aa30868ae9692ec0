// Copyright (C) 2025 Showdown Developers
// SPDX-License-Identifier: Apache-2.0

//! Street selection for the known board.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::atomic::AtomicBool};

use crate::{Card, Config, Error, Outcome, Result, Simulation};

/// The betting round given by the number of board cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Street {
    /// No board cards.
    PreFlop,
    /// Three board cards.
    Flop,
    /// Four board cards.
    Turn,
    /// Five board cards.
    River,
}

impl Street {
    /// Returns the street for a board, fails if the board is not 0, 3, 4, or
    /// 5 cards.
    pub fn from_board(board: &[Card]) -> Result<Street> {
        match board.len() {
            0 => Ok(Street::PreFlop),
            3 => Ok(Street::Flop),
            4 => Ok(Street::Turn),
            5 => Ok(Street::River),
            n => Err(Error::InvalidBoardSize(n)),
        }
    }

    /// Number of board cards on this street.
    pub fn board_len(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    /// Number of cards dealt to the board to reach this street.
    pub fn dealt(self) -> usize {
        match self {
            Street::PreFlop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }

    /// The next street.
    pub fn next(self) -> Option<Street> {
        match self {
            Street::PreFlop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Street::PreFlop => "Pre-Flop",
            Street::Flop => "Post-Flop",
            Street::Turn => "After Turn",
            Street::River => "After River",
        };

        f.write_str(label)
    }
}

/// A simulation outcome labelled with its street.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreetEquity {
    /// The street.
    pub street: Street,
    /// The simulation outcome.
    pub outcome: Outcome,
}

impl StreetEquity {
    /// The hero win probability.
    pub fn win_probability(&self) -> f64 {
        self.outcome.win_probability()
    }
}

impl fmt::Display for StreetEquity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Win Probability: {:.4}",
            self.street,
            self.win_probability()
        )
    }
}

/// Number of opponents still in the hand.
pub fn live_opponents(players: usize, folded: usize) -> usize {
    players.saturating_sub(1).saturating_sub(folded)
}

/// Simulates the hero equity on the street given by the board.
pub fn street_equity<R: Rng + ?Sized>(
    hero: &[Card],
    board: &[Card],
    opponents: usize,
    config: &Config,
    rng: &mut R,
) -> Result<StreetEquity> {
    street_equity_until(hero, board, opponents, config, rng, &AtomicBool::new(false))
}

/// Cancellable [street_equity].
pub fn street_equity_until<R: Rng + ?Sized>(
    hero: &[Card],
    board: &[Card],
    opponents: usize,
    config: &Config,
    rng: &mut R,
    cancel: &AtomicBool,
) -> Result<StreetEquity> {
    let street = Street::from_board(board)?;
    let outcome = Simulation::new(hero, board, opponents)?.run_with(config, rng, cancel)?;
    Ok(StreetEquity { street, outcome })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_cards;
    use rand::rngs::StdRng;

    #[test]
    fn streets() {
        let cards = parse_cards("2c 3c 4c 5c 6c 7c").unwrap();
        assert_eq!(Street::from_board(&[]), Ok(Street::PreFlop));
        assert_eq!(Street::from_board(&cards[..3]), Ok(Street::Flop));
        assert_eq!(Street::from_board(&cards[..4]), Ok(Street::Turn));
        assert_eq!(Street::from_board(&cards[..5]), Ok(Street::River));

        for n in [1, 2, 6] {
            assert_eq!(
                Street::from_board(&cards[..n]),
                Err(Error::InvalidBoardSize(n))
            );
        }

        let mut street = Street::PreFlop;
        let mut board_len = 0;
        while let Some(next) = street.next() {
            board_len += next.dealt();
            assert_eq!(next.board_len(), board_len);
            street = next;
        }
        assert_eq!(street, Street::River);
    }

    #[test]
    fn labels() {
        assert_eq!(Street::PreFlop.to_string(), "Pre-Flop");
        assert_eq!(Street::River.to_string(), "After River");

        let equity = StreetEquity {
            street: Street::Flop,
            outcome: Outcome::default(),
        };
        assert_eq!(equity.to_string(), "Post-Flop Win Probability: 0.0000");
    }

    #[test]
    fn opponents_after_folds() {
        assert_eq!(live_opponents(8, 0), 7);
        assert_eq!(live_opponents(8, 3), 4);
        assert_eq!(live_opponents(8, 9), 0);
        assert_eq!(live_opponents(0, 0), 0);
    }

    #[test]
    fn route_by_board() {
        let hero = parse_cards("Ah Kh").unwrap();
        let board = parse_cards("Qh Jh Th 2c 3d").unwrap();
        let config = Config {
            trials: 500,
            ..Config::default()
        };

        let mut rng = StdRng::seed_from_u64(0);
        for len in [0, 3, 4, 5] {
            let equity = street_equity(&hero, &board[..len], 2, &config, &mut rng).unwrap();
            assert_eq!(equity.street.board_len(), len);
            assert_eq!(equity.outcome.trials(), 500);
        }

        let equity = street_equity(&hero, &board, 2, &config, &mut rng).unwrap();
        assert_eq!(equity.win_probability(), 1.0);

        assert_eq!(
            street_equity(&hero, &board[..2], 2, &config, &mut rng),
            Err(Error::InvalidBoardSize(2))
        );
    }
}
