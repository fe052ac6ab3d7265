//! Basic Monte Carlo election example (Italian Chamber of Deputies, 2018)
//!
//! Run with: cargo run --example basic_simulation

use log::info;
use mc_electoral::{leading_parties, ElectionConfigBuilder, ElectionSimulator};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    simple_logger::SimpleLogger::new().init().unwrap();

    info!("Setting up election...");

    // 2018 Chamber of Deputies: 61% of seats proportional, 37% from
    // single-member districts, the rest elected abroad and left out here.
    let config = ElectionConfigBuilder::new("Camera dei Deputati 2018")
        .party("Movimento 5 Stelle", 0.327)
        .party("Centrodestra", 0.375)
        .party("Centrosinistra", 0.22)
        .party("Liberi e Uguali", 0.03)
        .coefficients(0.61, 0.37)
        .seats(630)
        .build()
        .unwrap();

    info!(
        "Pools: {} proportional, {} majoritarian of {} seats",
        config.proportional_pool(),
        config.majoritarian_pool(),
        config.seats()
    );
    info!("Starting simulation...");

    let mut simulator = ElectionSimulator::new(config, StdRng::from_entropy());
    let outcome = simulator.complete_simulation(1000).unwrap();

    info!("Simulation complete!");
    outcome.print_summary();

    let leaders = leading_parties(&outcome.expected_seats);
    info!("Leading: {}", leaders.join(", "));
}
