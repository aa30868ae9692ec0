// Copyright (C) 2025 Showdown Developers
// SPDX-License-Identifier: Apache-2.0

//! A set of cards.
use std::fmt;

use crate::{Card, Deck, Error, Result};

/// A set of cards stored as a 52 bits mask indexed by [Card::index].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CardSet(u64);

impl CardSet {
    /// The empty set.
    pub const EMPTY: CardSet = CardSet(0);

    /// Creates a set from the given cards, fails if a card is repeated.
    pub fn from_cards(cards: &[Card]) -> Result<Self> {
        let mut set = Self::EMPTY;
        for &card in cards {
            if !set.insert(card) {
                return Err(Error::DuplicateCard(card));
            }
        }

        Ok(set)
    }

    /// Adds a card, returns false if the card was already in the set.
    #[inline]
    pub fn insert(&mut self, card: Card) -> bool {
        let bit = 1 << card.index();
        let added = self.0 & bit == 0;
        self.0 |= bit;
        added
    }

    /// Removes a card, returns false if the card was not in the set.
    #[inline]
    pub fn remove(&mut self, card: Card) -> bool {
        let bit = 1 << card.index();
        let removed = self.0 & bit != 0;
        self.0 &= !bit;
        removed
    }

    /// Checks if the card is in the set.
    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        self.0 & (1 << card.index()) != 0
    }

    /// Number of cards in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Checks if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns the cards in the set in deck order.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        (0..Deck::SIZE)
            .filter(|idx| self.0 & (1 << idx) != 0)
            .filter_map(Card::from_index)
    }
}

impl FromIterator<Card> for CardSet {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for card in iter {
            set.insert(card);
        }
        set
    }
}

impl fmt::Debug for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_cards;

    #[test]
    fn insert_remove() {
        let ah = "Ah".parse().unwrap();
        let mut set = CardSet::default();
        assert!(set.is_empty());

        assert!(set.insert(ah));
        assert!(!set.insert(ah));
        assert!(set.contains(ah));
        assert_eq!(set.len(), 1);

        assert!(set.remove(ah));
        assert!(!set.remove(ah));
        assert!(set.is_empty());
    }

    #[test]
    fn full_deck() {
        let set = Deck::default().into_iter().collect::<CardSet>();
        assert_eq!(set.len(), Deck::SIZE);
        assert_eq!(set.iter().collect::<Vec<_>>(), Deck::default().cards());
    }

    #[test]
    fn from_cards() {
        let cards = parse_cards("AhKhQh").unwrap();
        let set = CardSet::from_cards(&cards).unwrap();
        assert_eq!(set.len(), 3);
        assert!(cards.iter().all(|c| set.contains(*c)));

        let cards = parse_cards("AhKhAh").unwrap();
        assert_eq!(
            CardSet::from_cards(&cards),
            Err(Error::DuplicateCard(cards[0]))
        );
    }
}
