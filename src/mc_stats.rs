// Descriptive statistics over simulation histories.
//
// The engine hands the raw per-trial history to reporting collaborators;
// these helpers cover the summaries they all need (per-party moments, seat
// frequency tallies for histograms, tied-leader lookup).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::mc_interface::{PartyId, SeatVector};

/// Summary of one party's seat counts across all trials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatStatistics {
    /// Arithmetic mean (unrounded, unlike the expected allocation).
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
    pub median: f64,
}

impl SeatStatistics {
    fn zero() -> Self {
        Self {
            mean: 0.0,
            std_dev: 0.0,
            min: 0,
            max: 0,
            median: 0.0,
        }
    }
}

/// Summarize one party's per-trial seat counts.
pub fn summarize(values: &[u32]) -> SeatStatistics {
    if values.is_empty() {
        return SeatStatistics::zero();
    }

    let n = values.len() as f64;
    let mean = values.iter().map(|&v| v as f64).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n;

    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    } else {
        sorted[mid] as f64
    };

    SeatStatistics {
        mean,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        median,
    }
}

/// Count how often each seat total occurred across the trials.
///
/// The ordered (seat count -> occurrences) map is what histogram renderers
/// consume downstream.
pub fn seat_frequencies(values: &[u32]) -> BTreeMap<u32, usize> {
    let mut frequencies = BTreeMap::new();
    for &v in values {
        *frequencies.entry(v).or_insert(0) += 1;
    }
    frequencies
}

/// All parties tied for the highest seat count, in party input order.
///
/// Ties are reported in full rather than broken arbitrarily; the caller
/// decides what a shared lead means. Empty input yields an empty list.
pub fn leading_parties(seats: &SeatVector) -> Vec<PartyId> {
    let Some(top) = seats.values().copied().max() else {
        return Vec::new();
    };
    seats
        .iter()
        .filter(|(_, &count)| count == top)
        .map(|(party, _)| party.clone())
        .collect()
}
