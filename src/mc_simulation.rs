// Single-draw simulation and Monte Carlo aggregation.
//
// One trial = one deterministic proportional allocation plus one full set of
// majoritarian draws. The aggregator repeats trials, keeps every per-party
// outcome, and reports the rounded mean as the expected allocation.

use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::IndexMap;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::mc_apportionment::allocate_largest_remainder;
use crate::mc_config::ElectionConfig;
use crate::mc_draw::{draw_majoritarian, DrawError};
use crate::mc_interface::{PartyId, SeatVector, SimulationHistory};
use crate::mc_stats::{summarize, SeatStatistics};

/// Iterations used when the caller does not specify a count.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Failure of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// The requested iteration count was zero.
    #[error("the number of iterations must be strictly positive")]
    InvalidIterationCount,

    /// A majoritarian draw could not be performed.
    #[error(transparent)]
    Draw(#[from] DrawError),

    /// The cancellation flag was raised between trials.
    #[error("simulation cancelled after {completed} of {requested} trials")]
    Cancelled { completed: usize, requested: usize },
}

/// Result of a complete Monte Carlo simulation.
#[derive(Debug, Clone)]
pub struct SimulationOutcome {
    /// Election label from the configuration.
    pub election: String,
    /// Trials actually run.
    pub iterations: usize,
    /// Rounded mean seats per party. Sums approximately (not exactly, the
    /// parties round independently) to the seats covered by the two tiers.
    pub expected_seats: SeatVector,
    /// Every trial's per-party seat count, for distributional reporting.
    pub history: SimulationHistory,
    /// Per-party descriptive statistics over the history.
    pub statistics: IndexMap<PartyId, SeatStatistics>,
}

impl SimulationOutcome {
    /// Print a summary table to the console.
    pub fn print_summary(&self) {
        println!("\n╔════════════════════════════════════════════════════════╗");
        println!("║    MONTE CARLO ELECTORAL SIMULATION RESULTS            ║");
        println!("╚════════════════════════════════════════════════════════╝\n");

        println!("Election: {}", self.election);
        println!("Iterations: {}", self.iterations);
        println!();

        println!(
            "  {:<20} {:>8} {:>10} {:>8} {:>11}",
            "Party", "Expected", "Mean", "StdDev", "Min-Max"
        );
        for (party, &expected) in &self.expected_seats {
            let stats = &self.statistics[party];
            println!(
                "  {:<20} {:>8} {:>10.2} {:>8.2} {:>5}-{:<5}",
                party, expected, stats.mean, stats.std_dev, stats.min, stats.max
            );
        }

        let total: u32 = self.expected_seats.values().sum();
        println!("\n  Expected seats assigned: {}", total);
    }
}

/// Monte Carlo simulator for one validated election configuration.
///
/// Owns the random source explicitly: two simulators built from the same
/// config and the same seed walk through identical trial sequences. There is
/// no hidden global generator anywhere in the engine.
pub struct ElectionSimulator<R: Rng> {
    config: ElectionConfig,
    rng: R,
}

impl ElectionSimulator<StdRng> {
    /// Convenience constructor seeding a [`StdRng`] from 32 bytes.
    pub fn from_seed(config: ElectionConfig, seed: [u8; 32]) -> Self {
        Self::new(config, StdRng::from_seed(seed))
    }
}

impl<R: Rng> ElectionSimulator<R> {
    pub fn new(config: ElectionConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &ElectionConfig {
        &self.config
    }

    /// Run one Monte Carlo trial: proportional allocation plus one full set
    /// of majoritarian draws, summed per party.
    pub fn fill_seats(&mut self) -> Result<SeatVector, SimulationError> {
        let draw = single_draw(&self.config, &mut self.rng)?;
        Ok(self
            .config
            .parties()
            .iter()
            .cloned()
            .zip(draw)
            .collect())
    }

    /// Run `iterations` trials and aggregate them.
    ///
    /// Records every trial into the returned history (replacing anything
    /// from earlier runs) and reports `round(sum / iterations)` per party as
    /// the expected allocation. Always runs exactly `iterations` trials;
    /// there is no adaptive stopping.
    pub fn complete_simulation(
        &mut self,
        iterations: usize,
    ) -> Result<SimulationOutcome, SimulationError> {
        self.run_trials(iterations, None)
    }

    /// Like [`complete_simulation`](Self::complete_simulation), but checks
    /// the `cancel` flag between trials. A trial is cheap and atomic, so the
    /// flag is never honored mid-trial.
    pub fn complete_simulation_cancellable(
        &mut self,
        iterations: usize,
        cancel: &AtomicBool,
    ) -> Result<SimulationOutcome, SimulationError> {
        self.run_trials(iterations, Some(cancel))
    }

    fn run_trials(
        &mut self,
        iterations: usize,
        cancel: Option<&AtomicBool>,
    ) -> Result<SimulationOutcome, SimulationError> {
        if iterations == 0 {
            return Err(SimulationError::InvalidIterationCount);
        }

        debug!(
            "running {} trials for election {:?}",
            iterations,
            self.config.name()
        );

        let parties = self.config.parties();
        let mut totals = vec![0u64; parties.len()];
        let mut history = SimulationHistory::with_capacity(parties, iterations);

        for completed in 0..iterations {
            if let Some(flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    return Err(SimulationError::Cancelled {
                        completed,
                        requested: iterations,
                    });
                }
            }

            let draw = single_draw(&self.config, &mut self.rng)?;
            for (total, &seats) in totals.iter_mut().zip(&draw) {
                *total += seats as u64;
            }
            history.record(&draw);
        }

        let expected_seats: SeatVector = parties
            .iter()
            .cloned()
            .zip(
                totals
                    .iter()
                    .map(|&sum| (sum as f64 / iterations as f64).round() as u32),
            )
            .collect();

        let statistics: IndexMap<PartyId, SeatStatistics> = history
            .iter()
            .map(|(party, counts)| (party.clone(), summarize(counts)))
            .collect();

        info!(
            "election {:?}: {} trials complete, {} expected seats assigned",
            self.config.name(),
            iterations,
            expected_seats.values().sum::<u32>()
        );

        Ok(SimulationOutcome {
            election: self.config.name().to_string(),
            iterations,
            expected_seats,
            history,
            statistics,
        })
    }
}

/// One trial over raw per-party counts, in party input order.
fn single_draw<R: Rng>(config: &ElectionConfig, rng: &mut R) -> Result<Vec<u32>, DrawError> {
    let proportional =
        allocate_largest_remainder(config.proportional_shares(), config.proportional_pool());
    let majoritarian =
        draw_majoritarian(rng, config.draw_weights(), config.majoritarian_pool())?;

    Ok(proportional
        .into_iter()
        .zip(majoritarian)
        .map(|(p, m)| p + m)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc_config::ElectionConfigBuilder;

    fn italy_2018() -> ElectionConfig {
        ElectionConfigBuilder::new("Camera 2018")
            .party("M5S", 0.327)
            .party("Centrodestra", 0.375)
            .party("Centrosinistra", 0.22)
            .party("LeU", 0.03)
            .coefficients(0.61, 0.37)
            .seats(630)
            .build()
            .unwrap()
    }

    #[test]
    fn test_single_trial_respects_pool_bounds() {
        let config = italy_2018();
        let both_pools = config.proportional_pool() + config.majoritarian_pool();
        assert!(both_pools <= config.seats());

        for seed_byte in 0..20u8 {
            let mut sim = ElectionSimulator::from_seed(config.clone(), [seed_byte; 32]);
            let seats = sim.fill_seats().unwrap();
            let total: u32 = seats.values().sum();
            assert!(total <= both_pools, "trial assigned {total} > {both_pools}");
        }
    }

    #[test]
    fn test_identical_seeds_produce_identical_trials() {
        let config = italy_2018();
        let mut sim_a = ElectionSimulator::from_seed(config.clone(), [5u8; 32]);
        let mut sim_b = ElectionSimulator::from_seed(config, [5u8; 32]);

        for _ in 0..10 {
            assert_eq!(sim_a.fill_seats().unwrap(), sim_b.fill_seats().unwrap());
        }
    }

    #[test]
    fn test_identical_seeds_produce_identical_aggregates() {
        let config = italy_2018();
        let outcome_a = ElectionSimulator::from_seed(config.clone(), [11u8; 32])
            .complete_simulation(200)
            .unwrap();
        let outcome_b = ElectionSimulator::from_seed(config, [11u8; 32])
            .complete_simulation(200)
            .unwrap();

        assert_eq!(outcome_a.expected_seats, outcome_b.expected_seats);
        assert_eq!(outcome_a.history, outcome_b.history);
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let mut sim = ElectionSimulator::from_seed(italy_2018(), [0u8; 32]);
        assert_eq!(
            sim.complete_simulation(0).unwrap_err(),
            SimulationError::InvalidIterationCount
        );
    }

    #[test]
    fn test_history_covers_every_trial() {
        let mut sim = ElectionSimulator::from_seed(italy_2018(), [3u8; 32]);
        let outcome = sim.complete_simulation(250).unwrap();

        assert_eq!(outcome.history.iterations(), 250);
        for (_, counts) in outcome.history.iter() {
            assert_eq!(counts.len(), 250);
        }
    }

    #[test]
    fn test_history_replaced_on_rerun() {
        let mut sim = ElectionSimulator::from_seed(italy_2018(), [4u8; 32]);
        sim.complete_simulation(100).unwrap();
        let outcome = sim.complete_simulation(50).unwrap();
        assert_eq!(outcome.history.iterations(), 50);
    }

    #[test]
    fn test_convergence_to_reference_allocation() {
        // Italy 2018 reference (excluding abroad seats). The expected
        // allocation over 1000 trials must land within 5% of the seat total
        // for every party.
        let reference = [
            ("M5S", 221u32),
            ("Centrodestra", 260),
            ("Centrosinistra", 113),
            ("LeU", 14),
        ];

        let mut sim = ElectionSimulator::from_seed(italy_2018(), [42u8; 32]);
        let outcome = sim.complete_simulation(1000).unwrap();

        let tolerance = 0.05 * 630.0;
        for (party, expected) in reference {
            let got = outcome.expected_seats[party] as f64;
            assert!(
                (got - expected as f64).abs() <= tolerance,
                "{party}: expected near {expected}, got {got}"
            );
        }
    }

    #[test]
    fn test_expected_seats_sum_close_to_covered_pool() {
        let config = italy_2018();
        let covered = config.proportional_pool() + config.majoritarian_pool();
        let mut sim = ElectionSimulator::from_seed(config, [8u8; 32]);
        let outcome = sim.complete_simulation(500).unwrap();

        let total: u32 = outcome.expected_seats.values().sum();
        // Independent per-party rounding can wobble the total by a few seats;
        // under-unity share sums leave the uncovered mass unassigned.
        assert!(total <= covered);
        assert!(total as i64 >= covered as i64 - 25);
    }

    #[test]
    fn test_explicit_weights_drive_the_majoritarian_tier() {
        // All majoritarian weight on one party: it wins the entire
        // majoritarian pool every single trial.
        let config = ElectionConfigBuilder::new("weighted")
            .party("A", 0.5)
            .party("B", 0.5)
            .coefficients(0.0, 1.0)
            .seats(100)
            .majoritarian_weights(vec![1.0, 0.0])
            .build()
            .unwrap();

        let mut sim = ElectionSimulator::from_seed(config, [6u8; 32]);
        let outcome = sim.complete_simulation(50).unwrap();
        assert_eq!(outcome.expected_seats["A"], 100);
        assert_eq!(outcome.expected_seats["B"], 0);
    }

    #[test]
    fn test_zero_weight_sum_surfaces_draw_error() {
        let config = ElectionConfigBuilder::new("dead heat")
            .party("A", 0.0)
            .party("B", 0.0)
            .coefficients(0.5, 0.5)
            .seats(100)
            .build()
            .unwrap();

        let mut sim = ElectionSimulator::from_seed(config, [0u8; 32]);
        assert_eq!(
            sim.complete_simulation(10).unwrap_err(),
            SimulationError::Draw(DrawError::NonPositiveWeightSum)
        );
    }

    #[test]
    fn test_pure_proportional_zero_weight_sum_is_fine() {
        // No majoritarian seats means no draws, so zero weights never matter.
        let config = ElectionConfigBuilder::new("pure proportional")
            .party("A", 0.6)
            .party("B", 0.4)
            .coefficients(1.0, 0.0)
            .seats(100)
            .majoritarian_weights(vec![0.0, 0.0])
            .build()
            .unwrap();

        let mut sim = ElectionSimulator::from_seed(config, [0u8; 32]);
        let outcome = sim.complete_simulation(5).unwrap();
        assert_eq!(outcome.expected_seats["A"], 60);
        assert_eq!(outcome.expected_seats["B"], 40);
    }

    #[test]
    fn test_cancellation_between_trials() {
        let cancel = AtomicBool::new(true);
        let mut sim = ElectionSimulator::from_seed(italy_2018(), [0u8; 32]);
        assert_eq!(
            sim.complete_simulation_cancellable(100, &cancel)
                .unwrap_err(),
            SimulationError::Cancelled {
                completed: 0,
                requested: 100
            }
        );

        cancel.store(false, Ordering::Relaxed);
        assert!(sim.complete_simulation_cancellable(100, &cancel).is_ok());
    }
}
