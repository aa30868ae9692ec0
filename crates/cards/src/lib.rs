// Copyright (C) 2025 Showdown Developers
// SPDX-License-Identifier: Apache-2.0

//! Showdown Poker cards types.
//!
//! This crate defines types to create cards, either from their rank and suit
//! or from their canonical `{rank}{suit}` text form:
//!
//! ```
//! # use showdown_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let td: Card = "Td".parse().unwrap();
//! assert_eq!(ah.to_string(), "Ah");
//! assert_eq!(td.rank(), Rank::Ten);
//! ```
//!
//! a [Deck] type for shuffling, dealing, and iterating cards in the deck:
//!
//! ```
//! # use showdown_cards::{parse_cards, Deck};
//! // Remove the known cards and deal the remaining board.
//! let known = parse_cards("AhAd 7c8c9c").unwrap();
//! let mut deck = Deck::without(&known).unwrap();
//! assert_eq!(deck.count(), Deck::SIZE - 5);
//!
//! deck.shuffle(&mut rand::rng());
//! let board = deck.draw(2).unwrap();
//! assert_eq!(board.len(), 2);
//! assert_eq!(deck.count(), Deck::SIZE - 7);
//! ```
//!
//! and a [CardSet] for constant time membership checks:
//!
//! ```
//! # use showdown_cards::{parse_cards, CardSet};
//! let set = CardSet::from_cards(&parse_cards("AhKh").unwrap()).unwrap();
//! assert!(set.contains("Kh".parse().unwrap()));
//! assert!(!set.contains("Kd".parse().unwrap()));
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, Rank, Suit, parse_cards};

mod error;
pub use error::{Error, Result};

mod set;
pub use set::CardSet;
