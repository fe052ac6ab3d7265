// Coalition aggregation: fold member parties into blocs before simulation.
//
// Electoral alliances run as a single list for seat purposes. Callers declare
// coalitions over the raw party list; aggregation sums member shares into one
// entry per coalition and leaves unaffiliated parties standing alone.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mc_interface::PartyId;

/// A named electoral alliance over existing parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coalition {
    pub name: String,
    pub parties: Vec<PartyId>,
}

/// Failure while folding parties into coalitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoalitionError {
    /// A coalition lists a party that is not in the election.
    #[error("coalition {coalition:?} references unknown party {party:?}")]
    UnknownParty { coalition: String, party: PartyId },

    /// A party appears in more than one coalition (or twice in the same one).
    #[error("party {party:?} belongs to more than one coalition")]
    DuplicateMembership { party: PartyId },

    /// Two coalitions carry the same name.
    #[error("coalition name {name:?} is used more than once")]
    DuplicateCoalition { name: String },
}

/// Fold `parties`/`shares` into per-coalition entries.
///
/// Returns the aggregated name and share lists, paired by position:
/// coalitions first in declaration order (each share the sum of its members'),
/// then the remaining standalone parties in their original order. Coalitions
/// with no members are dropped. With no coalitions the input comes back
/// unchanged.
pub fn aggregate_shares(
    parties: &[PartyId],
    shares: &[f64],
    coalitions: &[Coalition],
) -> Result<(Vec<PartyId>, Vec<f64>), CoalitionError> {
    debug_assert_eq!(parties.len(), shares.len());

    let mut claimed = vec![false; parties.len()];
    let mut out_names = Vec::new();
    let mut out_shares = Vec::new();

    for (pos, coalition) in coalitions.iter().enumerate() {
        if coalitions[..pos].iter().any(|c| c.name == coalition.name) {
            return Err(CoalitionError::DuplicateCoalition {
                name: coalition.name.clone(),
            });
        }
        if coalition.parties.is_empty() {
            continue;
        }

        let mut sum = 0.0;
        for member in &coalition.parties {
            let idx = parties.iter().position(|p| p == member).ok_or_else(|| {
                CoalitionError::UnknownParty {
                    coalition: coalition.name.clone(),
                    party: member.clone(),
                }
            })?;
            if claimed[idx] {
                return Err(CoalitionError::DuplicateMembership {
                    party: member.clone(),
                });
            }
            claimed[idx] = true;
            sum += shares[idx];
        }
        out_names.push(coalition.name.clone());
        out_shares.push(sum);
    }

    for (idx, party) in parties.iter().enumerate() {
        if !claimed[idx] {
            out_names.push(party.clone());
            out_shares.push(shares[idx]);
        }
    }

    Ok((out_names, out_shares))
}
