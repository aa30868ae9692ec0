// Copyright (C) 2025 Showdown Developers
// SPDX-License-Identifier: Apache-2.0

//! Parallel simulation.
use log::debug;
use rand::{prelude::*, rngs::SmallRng};
use std::{panic, sync::atomic::AtomicBool, thread, time::Instant};

use super::{Outcome, Simulation};
use crate::{Error, Result};

/// Splits `trials` into `num_tasks` shards, the first shards get the extra
/// trials.
fn shard_sizes(trials: usize, num_tasks: usize) -> impl Iterator<Item = usize> {
    let (per_task, extra) = (trials / num_tasks, trials % num_tasks);
    (0..num_tasks).map(move |task_id| per_task + usize::from(task_id < extra))
}

impl Simulation {
    /// Runs `trials` trials split across `num_tasks` parallel tasks.
    ///
    /// Each task gets its own random generator seeded from `rng` in task
    /// order, so a seeded `rng` gives the same outcome for the same number
    /// of tasks.
    pub fn par_run<R: Rng + ?Sized>(
        &self,
        num_tasks: usize,
        trials: usize,
        rng: &mut R,
    ) -> Result<Outcome> {
        self.par_run_until(num_tasks, trials, rng, &AtomicBool::new(false))
    }

    /// Parallel [Simulation::run_until], all tasks stop when `cancel` is set.
    pub fn par_run_until<R: Rng + ?Sized>(
        &self,
        num_tasks: usize,
        trials: usize,
        rng: &mut R,
        cancel: &AtomicBool,
    ) -> Result<Outcome> {
        if trials == 0 {
            return Err(Error::InvalidTrials);
        }

        if num_tasks == 0 {
            return Err(Error::InvalidTasks);
        }

        // No empty shards.
        let num_tasks = num_tasks.min(trials);

        debug!(
            "Simulating {} opponents board={} trials={trials} tasks={num_tasks}",
            self.opponents,
            self.board.len()
        );

        let now = Instant::now();
        let shards = shard_sizes(trials, num_tasks)
            .map(|count| (count, SmallRng::seed_from_u64(rng.random())))
            .collect::<Vec<_>>();

        let outcome = thread::scope(|s| {
            let handles = shards
                .into_iter()
                .map(|(count, mut task_rng)| {
                    s.spawn(move || self.simulate(count, &mut task_rng, cancel))
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
                .fold(Outcome::new(self.opponents, 0), |mut total, shard| {
                    total.merge(&shard);
                    total
                })
        });

        self.log_outcome(&outcome, now);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_cards;
    use rand::rngs::StdRng;

    #[test]
    fn shards() {
        assert_eq!(shard_sizes(10, 3).collect::<Vec<_>>(), vec![4, 3, 3]);
        assert_eq!(shard_sizes(9, 3).collect::<Vec<_>>(), vec![3, 3, 3]);
        assert_eq!(shard_sizes(1, 1).collect::<Vec<_>>(), vec![1]);
        assert_eq!(shard_sizes(10_001, 4).sum::<usize>(), 10_001);
    }

    #[test]
    fn par_pocket_aces() {
        let hero = parse_cards("Ah Ad").unwrap();
        let sim = Simulation::new(&hero, &[], 1).unwrap();

        let o1 = sim.par_run(4, 10_000, &mut StdRng::seed_from_u64(7)).unwrap();
        assert!(o1.is_complete());
        assert_eq!(o1.trials(), 10_000);
        assert!((0.80..=0.90).contains(&o1.win_probability()));

        // Same seed and tasks give the same result.
        let o2 = sim.par_run(4, 10_000, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(o1, o2);
    }

    #[test]
    fn par_more_tasks_than_trials() {
        let hero = parse_cards("Ah Ad").unwrap();
        let sim = Simulation::new(&hero, &[], 0).unwrap();

        let outcome = sim.par_run(8, 3, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(outcome.trials(), 3);
        assert_eq!(outcome.win_probability(), 1.0);

        assert_eq!(
            sim.par_run(0, 3, &mut StdRng::seed_from_u64(0)),
            Err(Error::InvalidTasks)
        );
        assert_eq!(
            sim.par_run(2, 0, &mut StdRng::seed_from_u64(0)),
            Err(Error::InvalidTrials)
        );
    }

    #[test]
    fn par_cancelled() {
        let hero = parse_cards("Ah Ad").unwrap();
        let sim = Simulation::new(&hero, &[], 3).unwrap();

        let cancel = AtomicBool::new(true);
        let outcome = sim
            .par_run_until(4, 1_000, &mut StdRng::seed_from_u64(0), &cancel)
            .unwrap();
        assert_eq!(outcome.trials(), 0);
        assert!(!outcome.is_complete());
    }
}
