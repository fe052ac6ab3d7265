//! Reproducibility check: two runs with the same fixed seed must match
//!
//! Run with: cargo run --example fixed_seed_check

use log::info;
use mc_electoral::{ElectionConfigBuilder, ElectionSimulator};

fn main() {
    simple_logger::SimpleLogger::new().init().unwrap();

    // Use a fixed seed for reproducible results
    let fixed_seed = [42u8; 32];

    info!("Running two simulations with fixed seed: {:?}", fixed_seed);

    let config = ElectionConfigBuilder::new("reproducibility check")
        .party("A", 0.42)
        .party("B", 0.31)
        .party("C", 0.18)
        .party("D", 0.09)
        .coefficients(0.5, 0.5)
        .seats(400)
        .build()
        .unwrap();

    let first = ElectionSimulator::from_seed(config.clone(), fixed_seed)
        .complete_simulation(500)
        .unwrap();
    let second = ElectionSimulator::from_seed(config, fixed_seed)
        .complete_simulation(500)
        .unwrap();

    info!("Expected seats: {:?}", first.expected_seats);

    // Same seed, same trial sequence, same everything
    assert_eq!(first.expected_seats, second.expected_seats, "Seed mismatch!");
    assert_eq!(first.history, second.history, "History mismatch!");
    info!("✓ Reproducibility verification passed!");
}
