// Copyright (C) 2025 Showdown Developers
// SPDX-License-Identifier: Apache-2.0

//! Pre-flop starting hands chart.
use anyhow::Result;
use rand::prelude::*;
use std::{sync::atomic::AtomicBool, time::Instant};

use showdown_eval::{Card, Config, Rank, Simulation, Suit};

use crate::check_complete;

/// Returns the hole cards and the label for a chart cell, suited hands are
/// above the diagonal.
fn starting_hand(r1: Rank, r2: Rank) -> ([Card; 2], String) {
    if r1 == r2 {
        let cards = [Card::new(r1, Suit::Hearts), Card::new(r2, Suit::Spades)];
        (cards, format!("{r1}{r2} "))
    } else if r1 > r2 {
        let cards = [Card::new(r1, Suit::Hearts), Card::new(r2, Suit::Hearts)];
        (cards, format!("{r1}{r2}s"))
    } else {
        let cards = [Card::new(r2, Suit::Hearts), Card::new(r1, Suit::Spades)];
        (cards, format!("{r2}{r1}o"))
    }
}

fn separator() {
    print!("|");
    for _ in 0..13 {
        print!("-----|");
    }
    println!();
}

/// Prints the win percentage of each starting hand against `opponents`,
/// fails if `cancel` stops a simulation.
pub fn run<R: Rng>(
    opponents: usize,
    config: &Config,
    rng: &mut R,
    cancel: &AtomicBool,
) -> Result<()> {
    let now = Instant::now();

    separator();

    for r1 in Rank::ranks().rev() {
        let mut labels = Vec::with_capacity(13);
        let mut probs = Vec::with_capacity(13);

        for r2 in Rank::ranks().rev() {
            let (hero, label) = starting_hand(r1, r2);
            let outcome =
                Simulation::new(&hero, &[], opponents)?.run_with(config, rng, cancel)?;
            check_complete(&outcome)?;
            labels.push(label);
            probs.push(outcome.win_probability() * 100.0);
        }

        print!("|");
        for label in labels {
            print!(" {label} |");
        }
        println!();

        print!("|");
        for prob in &probs {
            print!(" {:2.0}% |", prob.round());
        }
        println!();

        separator();
    }

    println!("Elapsed: {:.3}s", now.elapsed().as_secs_f64());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn chart_cells() {
        let (cards, label) = starting_hand(Rank::Ace, Rank::Ace);
        assert_eq!(label, "AA ");
        assert_ne!(cards[0], cards[1]);

        let (cards, label) = starting_hand(Rank::Ace, Rank::King);
        assert_eq!(label, "AKs");
        assert_eq!(cards[0].suit(), cards[1].suit());

        let (cards, label) = starting_hand(Rank::King, Rank::Ace);
        assert_eq!(label, "AKo");
        assert_eq!(cards[0].rank(), Rank::Ace);
        assert_ne!(cards[0].suit(), cards[1].suit());
    }

    #[test]
    fn chart_cancelled() {
        let config = Config {
            trials: 10,
            tasks: 1,
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(run(1, &config, &mut rng, &AtomicBool::new(true)).is_err());
    }
}
