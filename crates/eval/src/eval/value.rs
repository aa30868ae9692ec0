// Copyright (C) 2025 Showdown Developers
// SPDX-License-Identifier: Apache-2.0

//! Hand classification.
use serde::{Deserialize, Serialize};
use std::{fmt, iter};

use crate::{Card, CardSet, Error, Rank, Result};

/// Bits used by the hand rank in a packed value.
const RANK_SHIFT: u32 = 20;

/// Bits used by each tie-break rank.
const KEY_BITS: u32 = 4;

/// Max number of tie-break ranks.
const KEY_SLOTS: usize = 5;

/// Ace to five straight.
const WHEEL: u16 = (1 << Rank::Ace as u16) | 0b1111;

const HAND_RANKS: [HandRank; 9] = [
    HandRank::HighCard,
    HandRank::OnePair,
    HandRank::TwoPair,
    HandRank::ThreeOfAKind,
    HandRank::Straight,
    HandRank::Flush,
    HandRank::FullHouse,
    HandRank::FourOfAKind,
    HandRank::StraightFlush,
];

/// The hand category, from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Five cards in sequence.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Five cards in sequence of the same suit.
    StraightFlush,
}

impl HandRank {
    /// Returns all hand ranks from the weakest.
    pub fn ranks() -> impl DoubleEndedIterator<Item = HandRank> {
        HAND_RANKS.into_iter()
    }

    /// The number of ranks in the tie-break key for this category.
    pub fn key_len(self) -> usize {
        match self {
            HandRank::Straight | HandRank::StraightFlush => 1,
            HandRank::FullHouse | HandRank::FourOfAKind => 2,
            HandRank::TwoPair | HandRank::ThreeOfAKind => 3,
            HandRank::OnePair => 4,
            HandRank::HighCard | HandRank::Flush => 5,
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        };

        f.write_str(name)
    }
}

/// The value of the best 5 cards hand.
///
/// The category and the tie-break key are packed in a single integer:
///
/// ```text
///   +--------+--------+--------+--------+
///   |xxxxxxxx|xxxxcccc|kkkkkkkk|kkkkkkkk|
///   +--------+--------+--------+--------+
///   c = hand rank (high card=0,...,straight flush=8)
///   k = five 4 bits tie-break ranks, highest first (deuce=0,...,ace=12)
/// ```
///
/// so that comparing two values compares categories first and then the keys
/// lexicographically, equal values are a tie.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u32);

impl HandValue {
    /// Evaluates a hand with 5, 6, or 7 cards.
    ///
    /// Fails if the hand size is not valid or a card is repeated.
    pub fn eval(cards: &[Card]) -> Result<HandValue> {
        if !(5..=7).contains(&cards.len()) {
            return Err(Error::InvalidHandSize(cards.len()));
        }

        CardSet::from_cards(cards)?;
        Ok(Self::eval_unchecked(cards))
    }

    /// Evaluates a hand that is known to be valid.
    pub(crate) fn eval_unchecked(cards: &[Card]) -> HandValue {
        let mut counts = [0u8; 13];
        let mut suits = [0u16; 4];
        let mut ranks = 0u16;

        for card in cards {
            let rank = card.rank();
            counts[rank as usize] += 1;
            suits[card.suit() as usize] |= bit(rank);
            ranks |= bit(rank);
        }

        let count = |r: Rank| counts[r as usize];
        let flush = suits.into_iter().find(|mask| mask.count_ones() >= 5);

        if let Some(high) = flush.and_then(straight_high) {
            return Self::pack(HandRank::StraightFlush, [high]);
        }

        if let Some(quads) = Rank::ranks().rev().find(|&r| count(r) == 4) {
            let kicker = top_ranks(ranks & !bit(quads)).next();
            return Self::pack(HandRank::FourOfAKind, iter::once(quads).chain(kicker));
        }

        let trips = Rank::ranks().rev().find(|&r| count(r) == 3);
        if let Some(trips) = trips {
            // With 7 cards the second set of trips plays as the pair.
            let pair = Rank::ranks()
                .rev()
                .find(|&r| r != trips && count(r) >= 2);
            if let Some(pair) = pair {
                return Self::pack(HandRank::FullHouse, [trips, pair]);
            }
        }

        if let Some(mask) = flush {
            return Self::pack(HandRank::Flush, top_ranks(mask));
        }

        if let Some(high) = straight_high(ranks) {
            return Self::pack(HandRank::Straight, [high]);
        }

        if let Some(trips) = trips {
            let kickers = top_ranks(ranks & !bit(trips)).take(2);
            return Self::pack(HandRank::ThreeOfAKind, iter::once(trips).chain(kickers));
        }

        let mut pairs = Rank::ranks().rev().filter(|&r| count(r) == 2);
        match (pairs.next(), pairs.next()) {
            (Some(high), Some(low)) => {
                let kicker = top_ranks(ranks & !bit(high) & !bit(low)).next();
                Self::pack(HandRank::TwoPair, [high, low].into_iter().chain(kicker))
            }
            (Some(pair), None) => {
                let kickers = top_ranks(ranks & !bit(pair)).take(3);
                Self::pack(HandRank::OnePair, iter::once(pair).chain(kickers))
            }
            _ => Self::pack(HandRank::HighCard, top_ranks(ranks)),
        }
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        HAND_RANKS[(self.0 >> RANK_SHIFT) as usize]
    }

    /// The tie-break key, grouped ranks first and then kickers, highest first.
    ///
    /// The key length depends only on the category, see [HandRank::key_len].
    pub fn key(&self) -> Vec<Rank> {
        (0..self.rank().key_len())
            .map(|slot| (self.0 >> key_shift(slot)) & 0xf)
            .filter_map(|r| Rank::from_index(r as usize))
            .collect()
    }

    /// The packed value.
    pub fn value(&self) -> u32 {
        self.0
    }

    fn pack(rank: HandRank, key: impl IntoIterator<Item = Rank>) -> HandValue {
        let value = key
            .into_iter()
            .take(KEY_SLOTS)
            .enumerate()
            .fold((rank as u32) << RANK_SHIFT, |value, (slot, r)| {
                value | (r as u32) << key_shift(slot)
            });
        HandValue(value)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank())?;
        for (idx, rank) in self.key().into_iter().enumerate() {
            let sep = if idx == 0 { " [" } else { " " };
            write!(f, "{sep}{rank}")?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HandValue({self})")
    }
}

#[inline]
fn key_shift(slot: usize) -> u32 {
    RANK_SHIFT - KEY_BITS * (slot as u32 + 1)
}

#[inline]
fn bit(rank: Rank) -> u16 {
    1 << rank as u16
}

/// Ranks in the mask from the highest, at most five.
fn top_ranks(mask: u16) -> impl Iterator<Item = Rank> {
    Rank::ranks()
        .rev()
        .filter(move |&r| mask & bit(r) != 0)
        .take(KEY_SLOTS)
}

/// The highest straight in the mask, a wheel is five high.
fn straight_high(mask: u16) -> Option<Rank> {
    Rank::ranks()
        .rev()
        .take_while(|&r| r >= Rank::Six)
        .find(|&high| {
            let window = 0b11111 << (high as u16 - 4);
            mask & window == window
        })
        .or_else(|| (mask & WHEEL == WHEEL).then_some(Rank::Five))
}
