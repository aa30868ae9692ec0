// Copyright (C) 2025 Showdown Developers
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{CardSet, Error, Result};

/// All ranks from deuce to ace.
const RANKS: [Rank; 13] = [
    Rank::Deuce,
    Rank::Trey,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

/// All suits in deck order.
const SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

/// A Poker card.
///
/// A card is stored as its position in the unshuffled deck, that is
/// `suit * 13 + rank` with deuce=0,...,ace=12 and clubs=0,...,spades=3, so that
/// each of the 52 cards has a unique index in `0..52`.
///
/// The text form of a card is `{rank}{suit}`, for example `Ah` or `Td`, and it
/// is also the form used by serde.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card(u8);

impl Card {
    /// Create a card given a suit and rank.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card(suit as u8 * 13 + rank as u8)
    }

    /// Creates a card from its deck index in `0..52`.
    pub fn from_index(index: usize) -> Option<Card> {
        (index < Deck::SIZE).then_some(Card(index as u8))
    }

    /// This card unique index in `0..52`.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the card suit.
    #[inline]
    pub fn suit(&self) -> Suit {
        SUITS[(self.0 / 13) as usize]
    }

    /// Returns the card rank.
    #[inline]
    pub fn rank(&self) -> Rank {
        RANKS[(self.0 % 13) as usize]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

impl FromStr for Card {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidCardString(s.to_string());

        let mut chars = s.chars();
        let (Some(rank), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let rank = Rank::from_char(rank).ok_or_else(invalid)?;
        let suit = Suit::from_char(suit).ok_or_else(invalid)?;
        Ok(Card::new(rank, suit))
    }
}

impl TryFrom<String> for Card {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

/// Parses a list of cards such as `"AhKd"`, `"Ah Kd"`, or `"Ah,Kd"`.
///
/// Duplicates are not checked here, see [CardSet::from_cards].
pub fn parse_cards(s: &str) -> Result<Vec<Card>> {
    let mut cards = Vec::new();

    let tokens = s
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty());

    for token in tokens {
        let chars = token.chars().collect::<Vec<_>>();
        if chars.len() % 2 != 0 {
            return Err(Error::InvalidCardString(token.to_string()));
        }

        for pair in chars.chunks(2) {
            cards.push(pair.iter().collect::<String>().parse()?);
        }
    }

    Ok(cards)
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        RANKS.into_iter()
    }

    /// Returns the rank with the given index, deuce=0,...,ace=12.
    pub fn from_index(index: usize) -> Option<Rank> {
        RANKS.get(index).copied()
    }

    /// Parses a rank symbol, `2`-`9`, `T`, `J`, `Q`, `K`, `A` in either case.
    pub fn from_char(c: char) -> Option<Rank> {
        let rank = match c.to_ascii_uppercase() {
            '2' => Rank::Deuce,
            '3' => Rank::Trey,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return None,
        };

        Some(rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Spades suit.
    Spades,
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        SUITS.into_iter()
    }

    /// Parses a suit letter in either case or one of the `♣♦♥♠` symbols.
    pub fn from_char(c: char) -> Option<Suit> {
        let suit = match c {
            'c' | 'C' | '♣' => Suit::Clubs,
            'd' | 'D' | '♦' => Suit::Diamonds,
            'h' | 'H' | '♥' => Suit::Hearts,
            's' | 'S' | '♠' => Suit::Spades,
            _ => return None,
        };

        Some(suit)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };

        write!(f, "{suit}")
    }
}

/// A cards Deck.
///
/// Cards are dealt from the end of the deck.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.shuffle(rng);
        deck
    }

    /// Creates a full deck with the `known` cards removed.
    ///
    /// Fails if `known` contains the same card twice.
    pub fn without(known: &[Card]) -> Result<Self> {
        let mut deck = Self::default();
        deck.remove_all(known)?;
        Ok(deck)
    }

    /// Shuffles the cards left in the deck.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deals a card from the deck.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deals `n` cards from the deck, in dealing order.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>> {
        let available = self.cards.len();
        if n > available {
            return Err(Error::InsufficientCards {
                requested: n,
                available,
            });
        }

        let mut cards = self.cards.split_off(available - n);
        cards.reverse();
        Ok(cards)
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// The cards left in the deck.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) -> Result<()> {
        let pos = self
            .cards
            .iter()
            .position(|c| c == &card)
            .ok_or(Error::UnknownCard(card))?;
        self.cards.remove(pos);
        Ok(())
    }

    /// Removes all the `known` cards from the deck.
    ///
    /// The deck is left unchanged on error.
    pub fn remove_all(&mut self, known: &[Card]) -> Result<()> {
        let known_set = CardSet::from_cards(known)?;
        let present = self.cards.iter().copied().collect::<CardSet>();
        if let Some(card) = known.iter().find(|c| !present.contains(**c)) {
            return Err(Error::UnknownCard(*card));
        }

        self.cards.retain(|c| !known_set.contains(*c));
        Ok(())
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Panics if k is not 1 <= k <= 7.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((1..=7).contains(&k), "1 <= k <= 7");

        if k > self.cards.len() {
            return;
        }

        let mut hand = Vec::with_capacity(k);
        self.visit(0, k, &mut hand, &mut f);
    }

    fn visit<F>(&self, start: usize, k: usize, hand: &mut Vec<Card>, f: &mut F)
    where
        F: FnMut(&[Card]),
    {
        if hand.len() == k {
            f(hand);
            return;
        }

        let last = self.cards.len() - (k - hand.len());
        for pos in start..=last {
            hand.push(self.cards[pos]);
            self.visit(pos + 1, k, hand, f);
            hand.pop();
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;
    use rand::rngs::StdRng;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn card_index() {
        let mut cards = HashSet::default();
        let mut deck = Deck::new_and_shuffled(&mut rand::rng());

        while let Some(card) = deck.deal() {
            assert_eq!(Card::from_index(card.index()), Some(card));
            assert_eq!(Card::new(card.rank(), card.suit()), card);
            cards.insert(card.index());
        }

        // Check uniquness.
        assert_eq!(cards.len(), Deck::SIZE);
        assert!(cards.iter().all(|&idx| idx < Deck::SIZE));
        assert_eq!(Card::from_index(Deck::SIZE), None);

        // Unshuffled deck order.
        let deck = Deck::default();
        assert_eq!(deck.cards()[0], card("2c"));
        assert_eq!(deck.cards()[12], card("Ac"));
        assert_eq!(deck.cards()[51], card("As"));
    }

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "Kd");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5s");

        let c = Card::new(Rank::Jack, Suit::Clubs);
        assert_eq!(c.to_string(), "Jc");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "Th");

        let c = Card::new(Rank::Ace, Suit::Hearts);
        assert_eq!(c.to_string(), "Ah");
    }

    #[test]
    fn card_from_string() {
        for c in Deck::default() {
            assert_eq!(card(&c.to_string()), c);
        }

        assert_eq!(card("AH"), Card::new(Rank::Ace, Suit::Hearts));
        assert_eq!(card("td"), Card::new(Rank::Ten, Suit::Diamonds));
        assert_eq!(card("Q♠"), Card::new(Rank::Queen, Suit::Spades));

        for bad in ["", "A", "Ahh", "1h", "Ax", "10h", "hA"] {
            assert_eq!(
                bad.parse::<Card>(),
                Err(Error::InvalidCardString(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn card_serde_string() {
        for c in Deck::default() {
            let s = String::from(c);
            assert_eq!(s, c.to_string());
            assert_eq!(Card::try_from(s), Ok(c));
        }

        assert_eq!(String::from(card("T♦")), "Td");
        assert_eq!(
            Card::try_from("Kz".to_string()),
            Err(Error::InvalidCardString("Kz".to_string()))
        );
    }

    #[test]
    fn parse_card_lists() {
        let expected = vec![card("Ah"), card("Kd"), card("2c")];
        assert_eq!(parse_cards("AhKd2c").unwrap(), expected);
        assert_eq!(parse_cards("Ah Kd  2c").unwrap(), expected);
        assert_eq!(parse_cards("Ah,Kd,2c").unwrap(), expected);
        assert_eq!(parse_cards("").unwrap(), vec![]);

        assert_eq!(
            parse_cards("AhK"),
            Err(Error::InvalidCardString("AhK".to_string()))
        );
        assert_eq!(
            parse_cards("Ah Zd"),
            Err(Error::InvalidCardString("Zd".to_string()))
        );
    }

    #[test]
    fn deck_draw() {
        let mut deck = Deck::new_and_shuffled(&mut StdRng::seed_from_u64(7));
        let top = deck.cards()[Deck::SIZE - 1];

        let cards = deck.draw(5).unwrap();
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0], top);
        assert_eq!(deck.count(), Deck::SIZE - 5);
        assert!(cards.iter().all(|c| !deck.cards().contains(c)));

        assert_eq!(
            deck.draw(48),
            Err(Error::InsufficientCards {
                requested: 48,
                available: 47
            })
        );
        assert_eq!(deck.count(), 47);

        assert_eq!(deck.draw(47).unwrap().len(), 47);
        assert!(deck.is_empty());
        assert_eq!(deck.deal(), None);
    }

    #[test]
    fn deck_remove() {
        let mut deck = Deck::default();
        deck.remove(card("Ad")).unwrap();
        assert_eq!(deck.count(), 51);
        assert_eq!(deck.remove(card("Ad")), Err(Error::UnknownCard(card("Ad"))));

        let known = [card("Kd"), card("Qd")];
        deck.remove_all(&known).unwrap();
        assert_eq!(deck.count(), 49);

        // Duplicates and missing cards leave the deck unchanged.
        let dup = [card("2c"), card("2c")];
        assert_eq!(deck.remove_all(&dup), Err(Error::DuplicateCard(card("2c"))));
        let missing = [card("2c"), card("Kd")];
        assert_eq!(
            deck.remove_all(&missing),
            Err(Error::UnknownCard(card("Kd")))
        );
        assert_eq!(deck.count(), 49);

        let deck = Deck::without(&[card("Ah"), card("As")]).unwrap();
        assert_eq!(deck.count(), 50);
        assert!(!deck.cards().contains(&card("Ah")));
    }

    #[test]
    fn deck_for_each() {
        let deck = Deck::default();
        assert_eq!(deck.count(), Deck::SIZE);

        let mut hands = HashSet::default();
        deck.for_each(5, |cards| {
            assert_eq!(cards.len(), 5);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 2_598_960);

        hands.clear();
        deck.for_each(2, |cards| {
            assert_eq!(cards.len(), 2);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 1_326);

        hands.clear();
        deck.for_each(3, |cards| {
            assert_eq!(cards.len(), 3);
            hands.insert(cards.to_owned());
        });
        assert_eq!(hands.len(), 22_100);
    }

    #[test]
    fn deck_for_each_remove() {
        let deck = Deck::without(&[card("Ad"), card("Kd")]).unwrap();

        let mut count = 0;
        deck.for_each(4, |cards| {
            assert!(!cards.contains(&card("Ad")));
            count += 1;
        });
        assert_eq!(count, 230_300);

        // More cards than in the deck.
        let deck = Deck::without(&Deck::default().cards()[..48]).unwrap();
        let mut count = 0;
        deck.for_each(5, |_| count += 1);
        assert_eq!(count, 0);
    }

    // Iterates 133M hands, slow in debug mode.
    #[test]
    #[ignore]
    fn deck_for_each_7cards() {
        let deck = Deck::default();

        let mut count = 0;
        deck.for_each(7, |cards| {
            assert_eq!(cards.len(), 7);
            count += 1;
        });
        assert_eq!(count, 133_784_560);
    }
}
