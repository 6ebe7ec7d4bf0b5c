// ============================================
// Search Ranking Layer
// ============================================
//
// Orders marketplace listings for a keyword/category query around the
// buyer's location.
//
// Score:
//   0.35 * proximity + 0.25 * recency + 0.15 * availability
//   + 0.15 * category_match + 0.10 * reputation
//   - 0.10 * staleness_penalty
// floored at 0.
//
// Ties: seller reputation desc, created_at desc, id asc.

pub mod scorer;

pub use scorer::{
    availability_score, category_match_score, proximity_score, recency_score, reputation_score,
    staleness_penalty, SearchRanker,
};

use super::{RankingError, Result};
use serde::{Deserialize, Serialize};

/// Proximity reaches zero at this distance
pub const PROXIMITY_CUTOFF_KM: f64 = 10.0;
/// Recency halves every 24 hours
pub const RECENCY_HALF_LIFE_HOURS: f64 = 24.0;
/// Listings older than this are considered stale
pub const STALE_AGE_HOURS: f64 = 72.0;
/// More unanswered requests than this marks a listing stale
pub const STALE_UNANSWERED_REQUESTS: u32 = 3;
/// Flat penalty applied to stale listings
pub const STALENESS_PENALTY: f64 = 0.2;

/// Configurable weights for search ranking
///
/// The positive terms sum to 1.0; `staleness` is subtracted and sits outside
/// that sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchWeights {
    pub proximity: f64,
    pub recency: f64,
    pub availability: f64,
    pub category_match: f64,
    pub reputation: f64,
    pub staleness: f64,
}

impl Default for SearchWeights {
    fn default() -> Self {
        Self {
            proximity: 0.35,
            recency: 0.25,
            availability: 0.15,
            category_match: 0.15,
            reputation: 0.10,
            staleness: 0.10,
        }
    }
}

impl SearchWeights {
    /// Sum of the additive weights
    pub fn positive_sum(&self) -> f64 {
        self.proximity + self.recency + self.availability + self.category_match + self.reputation
    }

    /// Check that every weight is non-negative and the additive ones sum to 1.0
    pub fn validate(&self) -> Result<()> {
        let all = [
            ("proximity", self.proximity),
            ("recency", self.recency),
            ("availability", self.availability),
            ("category_match", self.category_match),
            ("reputation", self.reputation),
            ("staleness", self.staleness),
        ];

        if let Some((name, value)) = all.iter().find(|(_, v)| v.is_nan() || *v < 0.0) {
            return Err(RankingError::InvalidWeights(format!(
                "search weight {} must be non-negative, got {}",
                name, value
            )));
        }

        let sum = self.positive_sum();
        if (sum - 1.0).abs() > super::WEIGHT_SUM_TOLERANCE {
            return Err(RankingError::InvalidWeights(format!(
                "search weights must sum to 1.0, got {}",
                sum
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_valid() {
        let weights = SearchWeights::default();
        assert!((weights.positive_sum() - 1.0).abs() < 1e-9);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = SearchWeights {
            staleness: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            weights.validate(),
            Err(RankingError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_weights_not_summing_to_one_rejected() {
        let weights = SearchWeights {
            proximity: 0.5,
            ..Default::default()
        };
        assert!(weights.validate().is_err());
    }
}
