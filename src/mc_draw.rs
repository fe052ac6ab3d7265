// Majoritarian tier: independent weighted random draws.
//
// Each majoritarian seat models one local race decided by a weighted random
// pick over the parties. Seats are drawn independently (sampling with
// replacement); the random source is always an explicit argument so a fixed
// seed reproduces a full draw.

use rand::Rng;
use thiserror::Error;

/// Failure of a majoritarian draw.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// The draw weights sum to zero or less, leaving nothing to sample from.
    #[error("majoritarian draw weights must sum to a positive value")]
    NonPositiveWeightSum,

    /// A weight is NaN or infinite, so no draw threshold can be formed.
    #[error("majoritarian draw weights must sum to a finite value")]
    NonFiniteWeightSum,
}

/// Pick one index with probability proportional to its weight.
///
/// Draws a uniform value in `[0, total_weight)` and walks the parties in
/// input order accumulating weight; the first party whose cumulative weight
/// meets or exceeds the drawn value wins the seat.
pub fn weighted_draw<R: Rng>(rng: &mut R, weights: &[f64]) -> Result<usize, DrawError> {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() {
        return Err(DrawError::NonFiniteWeightSum);
    }
    if total <= 0.0 {
        return Err(DrawError::NonPositiveWeightSum);
    }

    let threshold = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (idx, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if threshold <= cumulative {
            return Ok(idx);
        }
    }

    // Floating-point accumulation can leave the threshold a hair above the
    // final cumulative sum; the last party takes that sliver.
    Ok(weights.len() - 1)
}

/// Assign `pool` majoritarian seats by repeated independent weighted draws.
///
/// Returns one seat count per party, summing to exactly `pool`. A zero-seat
/// pool draws nothing and succeeds regardless of the weights; otherwise a
/// non-positive weight total fails with [`DrawError::NonPositiveWeightSum`].
pub fn draw_majoritarian<R: Rng>(
    rng: &mut R,
    weights: &[f64],
    pool: u32,
) -> Result<Vec<u32>, DrawError> {
    let mut seats = vec![0u32; weights.len()];
    for _ in 0..pool {
        seats[weighted_draw(rng, weights)?] += 1;
    }
    Ok(seats)
}
