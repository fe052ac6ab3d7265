// Election Runner - Load and execute election scenario files
//
// Usage:
//   cargo run --bin election_runner scenarios/italy_2018.yaml
//   cargo run --bin election_runner scenarios/  (runs all .yaml/.json files in directory)
//   cargo run --bin election_runner scenarios/italy_2018.yaml --seed 0x1234...

use std::env;
use std::fs;
use std::path::Path;

use log::info;
use mc_electoral::{
    aggregate_shares, Coalition, ElectionConfigBuilder, ElectionSimulator, DEFAULT_ITERATIONS,
};
use rand::RngCore;
use simple_logger::SimpleLogger;

/// Scenario file format (YAML or JSON by extension).
///
/// Shares and coefficients are given as percentages here (the usual form in
/// published election results) and divided by 100 at this boundary; the
/// engine itself only ever sees fractions.
#[derive(Debug, serde::Deserialize)]
struct ScenarioFile {
    /// Scenario metadata
    #[serde(default)]
    meta: ScenarioMeta,

    /// Election description
    election: ScenarioElection,

    /// Coalitions folding parties into blocs (optional)
    #[serde(default)]
    coalitions: Vec<Coalition>,

    /// Monte Carlo trials
    #[serde(default = "default_iterations")]
    iterations: usize,

    /// Hex seed for reproducible runs (optional; CLI --seed wins)
    #[serde(default)]
    seed: Option<String>,

    /// Known allocation to compare the outcome against (optional)
    #[serde(default)]
    reference_seats: Option<Vec<ReferenceEntry>>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ScenarioMeta {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ScenarioElection {
    name: String,
    seats: u32,

    /// Percentage of seats assigned proportionally
    proportional: f64,

    /// Percentage of seats assigned by majoritarian draws
    majoritarian: f64,

    parties: Vec<ScenarioParty>,
}

#[derive(Debug, serde::Deserialize)]
struct ScenarioParty {
    name: String,

    /// Vote share as a percentage
    share: f64,

    /// Majoritarian draw weight as a percentage (optional; defaults to share)
    #[serde(default)]
    weight: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
struct ReferenceEntry {
    name: String,
    seats: u32,
}

fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .ok();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!(
            "Usage: {} <scenario.yaml | directory/> [--seed SEED_HEX]",
            args[0]
        );
        eprintln!("\nExamples:");
        eprintln!("  {} scenarios/italy_2018.yaml", args[0]);
        eprintln!("  {} scenarios/", args[0]);
        eprintln!("  {} scenarios/italy_2018.yaml --seed 0x123456...", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);

    // Parse optional seed
    let cli_seed: Option<[u8; 32]> = if args.len() >= 4 && args[2] == "--seed" {
        Some(parse_seed_hex(&args[3]))
    } else {
        None
    };

    if path.is_file() {
        run_scenario_file(path, cli_seed);
    } else if path.is_dir() {
        run_scenario_directory(path, cli_seed);
    } else {
        eprintln!("Error: Path does not exist: {}", path.display());
        std::process::exit(1);
    }
}

fn run_scenario_directory(dir: &Path, cli_seed: Option<[u8; 32]>) {
    let mut scenarios = Vec::new();

    // Find all scenario files
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if matches!(
                path.extension().and_then(|s| s.to_str()),
                Some("yaml") | Some("yml") | Some("json")
            ) {
                scenarios.push(path);
            }
        }
    }

    scenarios.sort();

    if scenarios.is_empty() {
        eprintln!("No scenario files found in {}", dir.display());
        std::process::exit(1);
    }

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  ELECTION RUNNER - Multiple Scenarios                  ║");
    println!("╚════════════════════════════════════════════════════════╝\n");
    println!("Found {} scenario(s) to run\n", scenarios.len());

    for (i, scenario_path) in scenarios.iter().enumerate() {
        println!(
            "\n{}/{} Running: {}\n",
            i + 1,
            scenarios.len(),
            scenario_path.display()
        );
        run_scenario_file(scenario_path, cli_seed);
    }

    println!("\n╔════════════════════════════════════════════════════════╗");
    println!("║  All scenarios complete!                               ║");
    println!("╚════════════════════════════════════════════════════════╝\n");
}

fn run_scenario_file(path: &Path, cli_seed: Option<[u8; 32]>) {
    println!("Loading scenario from: {}", path.display());

    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", path.display(), e);
        std::process::exit(1);
    });

    let scenario: ScenarioFile = if path.extension().and_then(|s| s.to_str()) == Some("json") {
        serde_json::from_str(&content).unwrap_or_else(|e| {
            eprintln!("Failed to parse {}: {}", path.display(), e);
            std::process::exit(1);
        })
    } else {
        serde_yaml::from_str(&content).unwrap_or_else(|e| {
            eprintln!("Failed to parse {}: {}", path.display(), e);
            std::process::exit(1);
        })
    };

    // Print scenario header
    println!("\n╔════════════════════════════════════════════════════════╗");
    if let Some(ref name) = scenario.meta.name {
        println!(
            "║  {}  {}",
            name,
            " ".repeat(54_usize.saturating_sub(name.len()))
        );
    } else {
        println!(
            "║  Scenario: {}  ",
            path.file_stem().unwrap().to_str().unwrap()
        );
    }
    println!("╚════════════════════════════════════════════════════════╝\n");

    if let Some(ref desc) = scenario.meta.description {
        println!("{}\n", desc);
    }

    // Fold percentages into fractions and parties into blocs
    let party_names: Vec<String> = scenario
        .election
        .parties
        .iter()
        .map(|p| p.name.clone())
        .collect();
    let shares: Vec<f64> = scenario
        .election
        .parties
        .iter()
        .map(|p| p.share / 100.0)
        .collect();
    let weights: Vec<f64> = scenario
        .election
        .parties
        .iter()
        .map(|p| p.weight.unwrap_or(p.share) / 100.0)
        .collect();

    let (names, shares) = aggregate_shares(&party_names, &shares, &scenario.coalitions)
        .unwrap_or_else(|e| {
            eprintln!("Invalid coalitions in {}: {}", path.display(), e);
            std::process::exit(1);
        });
    let (_, weights) = aggregate_shares(&party_names, &weights, &scenario.coalitions)
        .unwrap_or_else(|e| {
            eprintln!("Invalid coalitions in {}: {}", path.display(), e);
            std::process::exit(1);
        });

    let config = ElectionConfigBuilder::new(scenario.election.name.as_str())
        .parties(names, shares)
        .coefficients(
            scenario.election.proportional / 100.0,
            scenario.election.majoritarian / 100.0,
        )
        .seats(scenario.election.seats)
        .majoritarian_weights(weights)
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Invalid election in {}: {}", path.display(), e);
            std::process::exit(1);
        });

    // Seed precedence: CLI flag, then scenario file, then a fresh random seed
    let seed = cli_seed
        .or_else(|| scenario.seed.as_deref().map(parse_seed_hex))
        .unwrap_or_else(|| {
            let mut seed = [0u8; 32];
            rand::thread_rng().fill_bytes(&mut seed);
            seed
        });
    info!("seed: 0x{}", hex_string(&seed));

    println!("Configuration:");
    println!("  Seats: {}", config.seats());
    println!(
        "  Proportional pool: {} ({}%)",
        config.proportional_pool(),
        scenario.election.proportional
    );
    println!(
        "  Majoritarian pool: {} ({}%)",
        config.majoritarian_pool(),
        scenario.election.majoritarian
    );
    println!("  Parties/blocs: {}", config.parties().len());
    println!("  Iterations: {}", scenario.iterations);
    println!("\nStarting simulation...\n");

    let mut simulator = ElectionSimulator::from_seed(config, seed);
    let outcome = simulator
        .complete_simulation(scenario.iterations)
        .unwrap_or_else(|e| {
            eprintln!("Simulation failed: {}", e);
            std::process::exit(1);
        });

    outcome.print_summary();

    if let Some(ref reference) = scenario.reference_seats {
        println!("\nReference comparison:");
        for entry in reference {
            match outcome.expected_seats.get(&entry.name) {
                Some(&expected) => {
                    let delta = expected as i64 - entry.seats as i64;
                    println!(
                        "  {:<20} expected {:>4}  reference {:>4}  delta {:+}",
                        entry.name, expected, entry.seats, delta
                    );
                }
                None => println!("  {:<20} not present in outcome", entry.name),
            }
        }
    }

    println!("\n✓ Scenario complete!\n");
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn parse_seed_hex(hex: &str) -> [u8; 32] {
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    let mut seed = [0u8; 32];

    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        if i >= 32 {
            break;
        }
        let byte_str = std::str::from_utf8(chunk).unwrap();
        seed[i] = u8::from_str_radix(byte_str, 16).unwrap_or_else(|e| {
            eprintln!("Invalid hex seed: {}", e);
            std::process::exit(1);
        });
    }

    seed
}
