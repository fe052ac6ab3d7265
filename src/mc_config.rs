// Election configuration and validation.
//
// An ElectionConfig is built once, validated as a whole, and then read-only
// for the rest of a simulation run. There is no in-place mutation: changing
// anything means building a new config, which re-runs every check.

use thiserror::Error;

use crate::mc_interface::PartyId;

/// Tolerance absorbing floating-point rounding when summing shares and
/// coefficients (e.g. 0.33 + 0.15 + 0.27 + 0.25 may land a few ULP above 1).
pub const SHARE_SUM_TOLERANCE: f64 = 1e-9;

/// A configuration invariant violated during validation.
///
/// Validation stops at the first violated check; errors are surfaced to the
/// caller verbatim and never silently corrected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// No parties given, or a party has an empty name.
    #[error("at least one party with a non-empty name must be provided")]
    EmptyInput,

    /// Party and share (or weight) sequences have different lengths.
    #[error("expected one {kind} per party: {parties} parties, {values} values")]
    ShapeMismatch {
        kind: &'static str,
        parties: usize,
        values: usize,
    },

    /// The same party name appears more than once.
    #[error("party {name:?} appears {count} times; names must be unique")]
    DuplicateParty { name: PartyId, count: usize },

    /// A vote share or draw weight is negative.
    #[error("party {name:?} has a negative {kind} ({value})")]
    InvalidShare {
        kind: &'static str,
        name: PartyId,
        value: f64,
    },

    /// The proportional shares sum to more than one.
    #[error("the vote shares sum to {sum}; they cannot exceed one")]
    OverAllocatedShares { sum: f64 },

    /// A tier coefficient lies outside [0, 1].
    #[error("the {tier} coefficient {value} must lie in [0, 1]")]
    InvalidCoefficient { tier: &'static str, value: f64 },

    /// The two tier coefficients jointly exceed one.
    #[error("the tier coefficients sum to {sum}; they cannot exceed one")]
    CoefficientOverflow { sum: f64 },

    /// The total seat count is zero.
    #[error("the total number of seats must be strictly positive")]
    InvalidSeatCount,
}

/// A validated, immutable election configuration.
///
/// Shares are fractions of the *total* vote (not normalized among the listed
/// parties); their sum may legitimately fall below one when part of the
/// electorate is undecided or votes for unlisted parties. Coefficients split
/// the seat total between the proportional and majoritarian tiers; any
/// remainder is unassigned capacity and never turns into seats.
#[derive(Debug, Clone, PartialEq)]
pub struct ElectionConfig {
    name: String,
    parties: Vec<PartyId>,
    proportional_shares: Vec<f64>,
    proportional_coefficient: f64,
    majoritarian_coefficient: f64,
    seats: u32,
    majoritarian_weights: Option<Vec<f64>>,
}

impl ElectionConfig {
    /// Identifying label of the election.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Party identifiers, in input order.
    pub fn parties(&self) -> &[PartyId] {
        &self.parties
    }

    /// Vote-share fractions, one per party.
    pub fn proportional_shares(&self) -> &[f64] {
        &self.proportional_shares
    }

    pub fn proportional_coefficient(&self) -> f64 {
        self.proportional_coefficient
    }

    pub fn majoritarian_coefficient(&self) -> f64 {
        self.majoritarian_coefficient
    }

    /// Total seat count across both tiers.
    pub fn seats(&self) -> u32 {
        self.seats
    }

    /// Explicit majoritarian draw weights, if any were supplied.
    pub fn majoritarian_weights(&self) -> Option<&[f64]> {
        self.majoritarian_weights.as_deref()
    }

    /// Weights actually used by the majoritarian draw: the explicit weights
    /// when present, the proportional shares otherwise.
    pub fn draw_weights(&self) -> &[f64] {
        self.majoritarian_weights
            .as_deref()
            .unwrap_or(&self.proportional_shares)
    }

    /// Seats in the proportional pool: `floor(seats * proportional_coefficient)`.
    pub fn proportional_pool(&self) -> u32 {
        (self.seats as f64 * self.proportional_coefficient).floor() as u32
    }

    /// Seats in the majoritarian pool: `floor(seats * majoritarian_coefficient)`.
    pub fn majoritarian_pool(&self) -> u32 {
        (self.seats as f64 * self.majoritarian_coefficient).floor() as u32
    }

    /// Re-run the full validation against this configuration.
    ///
    /// Read-only. `ElectionConfigBuilder::build` already ran it, so this only
    /// matters for callers that obtained a config through other means (e.g.
    /// deserialization layers of their own).
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. At least one party, all names non-empty.
        if self.parties.is_empty() || self.parties.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::EmptyInput);
        }

        // 2. One share per party; same for explicit weights.
        if self.parties.len() != self.proportional_shares.len() {
            return Err(ConfigError::ShapeMismatch {
                kind: "share",
                parties: self.parties.len(),
                values: self.proportional_shares.len(),
            });
        }
        if let Some(weights) = &self.majoritarian_weights {
            if self.parties.len() != weights.len() {
                return Err(ConfigError::ShapeMismatch {
                    kind: "weight",
                    parties: self.parties.len(),
                    values: weights.len(),
                });
            }
        }

        // 3. Unique party names. Report the first duplicate with how often
        //    it occurs in total.
        for (i, name) in self.parties.iter().enumerate() {
            let count = self.parties.iter().filter(|p| *p == name).count();
            if count > 1 && self.parties[..i].iter().all(|p| p != name) {
                return Err(ConfigError::DuplicateParty {
                    name: name.clone(),
                    count,
                });
            }
        }

        // 4. No negative shares or weights.
        for (name, &share) in self.parties.iter().zip(&self.proportional_shares) {
            if share < 0.0 || share.is_nan() {
                return Err(ConfigError::InvalidShare {
                    kind: "vote share",
                    name: name.clone(),
                    value: share,
                });
            }
        }
        if let Some(weights) = &self.majoritarian_weights {
            for (name, &weight) in self.parties.iter().zip(weights) {
                if weight < 0.0 || weight.is_nan() {
                    return Err(ConfigError::InvalidShare {
                        kind: "draw weight",
                        name: name.clone(),
                        value: weight,
                    });
                }
            }
        }

        // 5. Shares sum to at most one.
        let share_sum: f64 = self.proportional_shares.iter().sum();
        if share_sum > 1.0 + SHARE_SUM_TOLERANCE {
            return Err(ConfigError::OverAllocatedShares { sum: share_sum });
        }

        // 6. Each coefficient in [0, 1].
        for (tier, value) in [
            ("proportional", self.proportional_coefficient),
            ("majoritarian", self.majoritarian_coefficient),
        ] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(ConfigError::InvalidCoefficient { tier, value });
            }
        }

        // 7. Coefficients jointly at most one.
        let coefficient_sum = self.proportional_coefficient + self.majoritarian_coefficient;
        if coefficient_sum > 1.0 + SHARE_SUM_TOLERANCE {
            return Err(ConfigError::CoefficientOverflow {
                sum: coefficient_sum,
            });
        }

        // 8. Strictly positive seat count.
        if self.seats == 0 {
            return Err(ConfigError::InvalidSeatCount);
        }

        Ok(())
    }
}

/// Builder collecting election parameters before the build-then-validate step.
///
/// `build()` runs the full validation and hands out an immutable config, so
/// an `ElectionConfig` in circulation is always a valid one.
#[derive(Debug, Clone, Default)]
pub struct ElectionConfigBuilder {
    name: String,
    parties: Vec<PartyId>,
    proportional_shares: Vec<f64>,
    proportional_coefficient: f64,
    majoritarian_coefficient: f64,
    seats: u32,
    majoritarian_weights: Option<Vec<f64>>,
}

impl ElectionConfigBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Append one party with its vote-share fraction.
    pub fn party(mut self, name: impl Into<String>, share: f64) -> Self {
        self.parties.push(name.into());
        self.proportional_shares.push(share);
        self
    }

    /// Replace the whole party list at once.
    pub fn parties<I, S>(mut self, parties: I, shares: Vec<f64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parties = parties.into_iter().map(Into::into).collect();
        self.proportional_shares = shares;
        self
    }

    /// Set the proportional and majoritarian tier coefficients.
    pub fn coefficients(mut self, proportional: f64, majoritarian: f64) -> Self {
        self.proportional_coefficient = proportional;
        self.majoritarian_coefficient = majoritarian;
        self
    }

    pub fn seats(mut self, seats: u32) -> Self {
        self.seats = seats;
        self
    }

    /// Supply separate draw weights for the majoritarian tier. Without them
    /// the proportional shares double as draw weights.
    pub fn majoritarian_weights(mut self, weights: Vec<f64>) -> Self {
        self.majoritarian_weights = Some(weights);
        self
    }

    /// Validate and freeze the configuration.
    pub fn build(self) -> Result<ElectionConfig, ConfigError> {
        let config = ElectionConfig {
            name: self.name,
            parties: self.parties,
            proportional_shares: self.proportional_shares,
            proportional_coefficient: self.proportional_coefficient,
            majoritarian_coefficient: self.majoritarian_coefficient,
            seats: self.seats,
            majoritarian_weights: self.majoritarian_weights,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn italy_2018() -> ElectionConfigBuilder {
        ElectionConfigBuilder::new("Camera 2018")
            .party("M5S", 0.327)
            .party("Centrodestra", 0.375)
            .party("Centrosinistra", 0.22)
            .party("LeU", 0.03)
            .coefficients(0.61, 0.37)
            .seats(630)
    }

    #[test]
    fn test_valid_config_builds() {
        let config = italy_2018().build().unwrap();
        assert_eq!(config.parties().len(), 4);
        assert_eq!(config.proportional_pool(), 384); // floor(630 * 0.61)
        assert_eq!(config.majoritarian_pool(), 233); // floor(630 * 0.37)
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_party_list() {
        let result = ElectionConfigBuilder::new("empty")
            .coefficients(0.5, 0.5)
            .seats(100)
            .build();
        assert_eq!(result.unwrap_err(), ConfigError::EmptyInput);
    }

    #[test]
    fn test_rejects_empty_party_name() {
        let result = ElectionConfigBuilder::new("blank")
            .party("", 0.5)
            .coefficients(0.5, 0.5)
            .seats(100)
            .build();
        assert_eq!(result.unwrap_err(), ConfigError::EmptyInput);
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let result = ElectionConfigBuilder::new("shape")
            .parties(vec!["A", "B"], vec![0.5])
            .coefficients(0.5, 0.5)
            .seats(100)
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ShapeMismatch {
                kind: "share",
                parties: 2,
                values: 1
            }
        ));
    }

    #[test]
    fn test_rejects_duplicate_party_with_count() {
        let result = ElectionConfigBuilder::new("dup")
            .party("A", 0.2)
            .party("B", 0.2)
            .party("A", 0.2)
            .party("A", 0.2)
            .coefficients(0.5, 0.5)
            .seats(100)
            .build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::DuplicateParty {
                name: "A".to_string(),
                count: 3
            }
        );
    }

    #[test]
    fn test_rejects_negative_share() {
        let result = ElectionConfigBuilder::new("neg")
            .party("A", -0.1)
            .party("B", 0.5)
            .coefficients(0.5, 0.5)
            .seats(100)
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidShare { name, .. } if name == "A"
        ));
    }

    #[test]
    fn test_rejects_over_allocated_shares() {
        let result = ElectionConfigBuilder::new("over")
            .party("A", 0.6)
            .party("B", 0.6)
            .coefficients(0.5, 0.5)
            .seats(100)
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::OverAllocatedShares { .. }
        ));
    }

    #[test]
    fn test_share_sum_tolerance_absorbs_rounding() {
        // Ten times 0.1 does not sum to exactly 1.0 in floating point.
        let mut builder = ElectionConfigBuilder::new("tol").coefficients(0.5, 0.5).seats(10);
        for i in 0..10 {
            builder = builder.party(format!("P{i}"), 0.1);
        }
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_rejects_coefficient_out_of_range() {
        let result = italy_2018().coefficients(1.5, 0.2).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidCoefficient {
                tier: "proportional",
                ..
            }
        ));

        let result = italy_2018().coefficients(0.2, -0.1).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidCoefficient {
                tier: "majoritarian",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_coefficient_overflow() {
        let result = italy_2018().coefficients(0.6, 0.5).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::CoefficientOverflow { .. }
        ));
    }

    #[test]
    fn test_coefficients_may_sum_below_one() {
        // The remainder is unassigned capacity, not an error.
        let config = italy_2018().coefficients(0.4, 0.4).build().unwrap();
        assert!(config.proportional_pool() + config.majoritarian_pool() < config.seats());
    }

    #[test]
    fn test_rejects_zero_seats() {
        let result = italy_2018().seats(0).build();
        assert_eq!(result.unwrap_err(), ConfigError::InvalidSeatCount);
    }

    #[test]
    fn test_rejects_mismatched_weights() {
        let result = italy_2018().majoritarian_weights(vec![1.0, 2.0]).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ShapeMismatch { kind: "weight", .. }
        ));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let result = italy_2018()
            .majoritarian_weights(vec![1.0, 2.0, -1.0, 0.5])
            .build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidShare {
                kind: "draw weight",
                ..
            }
        ));
    }

    #[test]
    fn test_draw_weights_fall_back_to_shares() {
        let config = italy_2018().build().unwrap();
        assert_eq!(config.draw_weights(), config.proportional_shares());

        let config = italy_2018()
            .majoritarian_weights(vec![4.0, 3.0, 2.0, 1.0])
            .build()
            .unwrap();
        assert_eq!(config.draw_weights(), &[4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_error_messages_name_the_violation() {
        let err = ConfigError::DuplicateParty {
            name: "A".to_string(),
            count: 2,
        };
        assert!(err.to_string().contains("\"A\""));
        assert!(err.to_string().contains('2'));
    }
}
