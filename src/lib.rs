//! # mcElectoral - Monte Carlo Electoral Simulation
//!
//! A Rust implementation of a Monte Carlo seat-allocation engine for mixed
//! electoral systems. An election splits its seats between a deterministic
//! proportional tier and a randomized majoritarian tier; the engine repeats
//! the combined allocation over many trials and reports the expected seats
//! per party with full distributional statistics.
//!
//! ## Core Components
//!
//! - **ElectionConfig**: Validated election description (parties, shares,
//!   tier coefficients, seat total, optional draw weights)
//! - **ElectionSimulator**: Single-trial and aggregated Monte Carlo runs
//!   over an explicit random source
//! - **Apportionment/Draw**: Largest-remainder proportional allocation and
//!   weighted majoritarian draws
//! - **Coalitions/Statistics**: Pre-simulation bloc aggregation and
//!   post-simulation reporting helpers
//!
//! ## Usage
//!
//! ```no_run
//! use mc_electoral::{ElectionConfigBuilder, ElectionSimulator};
//!
//! let config = ElectionConfigBuilder::new("Camera 2018")
//!     .party("M5S", 0.327)
//!     .party("Centrodestra", 0.375)
//!     .party("Centrosinistra", 0.22)
//!     .party("LeU", 0.03)
//!     .coefficients(0.61, 0.37)
//!     .seats(630)
//!     .build()
//!     .unwrap();
//!
//! let mut sim = ElectionSimulator::from_seed(config, [42u8; 32]);
//! let outcome = sim.complete_simulation(1000).unwrap();
//! outcome.print_summary();
//! ```
//!
//! ## Scenario Runner
//!
//! For batch runs from YAML/JSON scenario files, see the `election_runner`
//! binary in `simulator/`. It loads election descriptions (with percentage
//! inputs and optional coalitions), runs them, and compares the outcome
//! against reference allocations.

// Core engine modules
pub mod mc_apportionment;
pub mod mc_config;
pub mod mc_draw;
pub mod mc_interface;
pub mod mc_simulation;

// Pre/post-processing
pub mod mc_coalition;
pub mod mc_stats;

// Re-export commonly used types
pub use mc_apportionment::allocate_largest_remainder;
pub use mc_coalition::{aggregate_shares, Coalition, CoalitionError};
pub use mc_config::{ConfigError, ElectionConfig, ElectionConfigBuilder, SHARE_SUM_TOLERANCE};
pub use mc_draw::{draw_majoritarian, weighted_draw, DrawError};
pub use mc_interface::{PartyId, SeatVector, SimulationHistory};
pub use mc_simulation::{
    ElectionSimulator, SimulationError, SimulationOutcome, DEFAULT_ITERATIONS,
};
pub use mc_stats::{leading_parties, seat_frequencies, summarize, SeatStatistics};
