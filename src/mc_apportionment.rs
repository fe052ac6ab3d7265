// Proportional tier: largest-remainder (Hare) apportionment.

use std::cmp::Ordering;

/// Fractional remainders and raw shares closer than this are treated as tied,
/// so floating-point noise cannot override the share/input-order tie-breaks.
const TIE_EPSILON: f64 = 1e-10;

/// Distribute `pool` seats across parties in proportion to their raw shares.
///
/// Each party's exact quota is `share * pool`; quotas are computed from the
/// shares as given, never renormalized, so vote mass not covered by any
/// listed party (undecided, unlisted) lowers every quota and earns no seats.
///
/// Every party first receives the floor of its quota. The seats still open
/// are then handed out one at a time, at most one per party and only to
/// parties with a positive fractional remainder, in descending priority of
/// remainder; ties fall to the larger raw share, then to the party listed
/// first. With shares summing to one the pool is always assigned exactly;
/// with a smaller share sum the uncovered seats remain unassigned.
///
/// Fully deterministic: no randomness is involved in this tier.
pub fn allocate_largest_remainder(shares: &[f64], pool: u32) -> Vec<u32> {
    let quotas: Vec<f64> = shares.iter().map(|&s| s * pool as f64).collect();
    let mut seats: Vec<u32> = quotas.iter().map(|q| q.floor() as u32).collect();

    let assigned: u32 = seats.iter().sum();
    let open = pool.saturating_sub(assigned) as usize;
    if open == 0 {
        return seats;
    }

    let mut priority: Vec<usize> = (0..shares.len()).collect();
    priority.sort_by(|&a, &b| {
        let frac_a = quotas[a] - quotas[a].floor();
        let frac_b = quotas[b] - quotas[b].floor();
        if (frac_a - frac_b).abs() > TIE_EPSILON {
            return frac_b.partial_cmp(&frac_a).unwrap_or(Ordering::Equal);
        }
        if (shares[a] - shares[b]).abs() > TIE_EPSILON {
            return shares[b].partial_cmp(&shares[a]).unwrap_or(Ordering::Equal);
        }
        a.cmp(&b)
    });

    // One remainder seat per party at most, and only for parties with an
    // actual fractional remainder; open seats beyond that are backed by
    // missing vote mass and stay unassigned.
    for &idx in priority.iter().take(open) {
        if quotas[idx] - quotas[idx].floor() <= TIE_EPSILON {
            break;
        }
        seats[idx] += 1;
    }

    seats
}
