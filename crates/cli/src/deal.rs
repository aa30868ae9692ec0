// Copyright (C) 2025 Showdown Developers
// SPDX-License-Identifier: Apache-2.0

//! Street by street random deal.
use anyhow::Result;
use log::info;
use rand::prelude::*;
use std::sync::atomic::AtomicBool;

use showdown_eval::{Config, Deck, Street, street::street_equity_until};

use crate::{check_complete, format_cards};

/// Deals the hero cards and then the board one street at a time from the
/// same shuffled deck, printing the hero win probability on each street.
pub fn run<R: Rng>(
    opponents: usize,
    config: &Config,
    rng: &mut R,
    cancel: &AtomicBool,
) -> Result<()> {
    let mut deck = Deck::new_and_shuffled(rng);
    let hero = deck.draw(2)?;
    let mut board = Vec::with_capacity(Street::River.board_len());

    println!("Hero: {}  Opponents: {opponents}", format_cards(&hero));

    let mut street = Street::PreFlop;
    loop {
        let equity = street_equity_until(&hero, &board, opponents, config, rng, cancel)?;
        check_complete(&equity.outcome)?;

        if !board.is_empty() {
            println!("Board: {}", format_cards(&board));
        }
        println!("{equity}");

        let Some(next) = street.next() else {
            break;
        };

        board.extend(deck.draw(next.dealt())?);
        info!("{next}: dealt {} cards, {} left", next.dealt(), deck.count());
        street = next;
    }

    Ok(())
}
