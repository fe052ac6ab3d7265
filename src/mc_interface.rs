// Shared core types for the seat-allocation engine.
//
// Everything here is plain in-memory data: the engine boundary is structured
// values, independent of how they were parsed or will be serialized.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifier of a party (or aggregated coalition) exactly as given in input.
pub type PartyId = String;

/// Per-party integer seat outcome of one trial or of an averaged aggregation.
///
/// Iterates in party input order. The values sum to at most the configured
/// seat total; they undershoot it when vote shares or tier coefficients sum
/// to less than one (the uncovered seats stay unassigned).
pub type SeatVector = IndexMap<PartyId, u32>;

/// Per-party ordered sequence of seat counts, one entry per completed trial.
///
/// Built incrementally by the aggregator and replaced wholesale on every new
/// complete simulation. Each party's vector has the same length: the number
/// of trials recorded so far.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationHistory {
    trials: IndexMap<PartyId, Vec<u32>>,
}

impl SimulationHistory {
    /// Create an empty history covering the given parties, in order.
    pub fn new(parties: &[PartyId]) -> Self {
        Self {
            trials: parties
                .iter()
                .map(|p| (p.clone(), Vec::new()))
                .collect(),
        }
    }

    /// Create an empty history with room for `iterations` trials per party.
    pub fn with_capacity(parties: &[PartyId], iterations: usize) -> Self {
        Self {
            trials: parties
                .iter()
                .map(|p| (p.clone(), Vec::with_capacity(iterations)))
                .collect(),
        }
    }

    /// Record one completed trial, one seat count per party in input order.
    ///
    /// # Panics
    /// Panics if `draw` does not have one entry per party.
    pub fn record(&mut self, draw: &[u32]) {
        assert_eq!(
            draw.len(),
            self.trials.len(),
            "trial must carry one seat count per party"
        );
        for (counts, &seats) in self.trials.values_mut().zip(draw) {
            counts.push(seats);
        }
    }

    /// Number of trials recorded so far.
    pub fn iterations(&self) -> usize {
        self.trials.values().next().map_or(0, Vec::len)
    }

    /// Parties covered by this history, in input order.
    pub fn parties(&self) -> impl Iterator<Item = &PartyId> {
        self.trials.keys()
    }

    /// Per-trial seat counts for one party.
    pub fn get(&self, party: &str) -> Option<&[u32]> {
        self.trials.get(party).map(Vec::as_slice)
    }

    /// Iterate over (party, per-trial seat counts) in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&PartyId, &[u32])> {
        self.trials.iter().map(|(p, v)| (p, v.as_slice()))
    }

    /// True when no trials have been recorded.
    pub fn is_empty(&self) -> bool {
        self.iterations() == 0
    }

    /// Append another history's trials to this one.
    ///
    /// Trials are independent, so histories produced by separate workers with
    /// independent random streams can be reduced into one; the concatenation
    /// order does not affect any statistic computed from the result.
    ///
    /// # Panics
    /// Panics when the two histories cover different parties.
    pub fn merge(&mut self, other: SimulationHistory) {
        assert!(
            self.trials.keys().eq(other.trials.keys()),
            "histories must cover the same parties in the same order"
        );
        for (counts, extra) in self.trials.values_mut().zip(other.trials.into_values()) {
            counts.extend(extra);
        }
    }
}
