// ============================================
// Payment Method Ranking Layer
// ============================================
//
// Orders the payment methods available for an order, best first, with a
// per-factor breakdown for display.
//
// Score:
//   0.40 * trust + 0.25 * user_preference
//   + 0.20 * success_rate + 0.15 * cost_efficiency
// clamped to [0, 1].
//
// Ties: trust desc, last_used desc (history beats no history), name asc.
//
// Risky orders swap in a fixed weight preset (see `WeightPreset`).

pub mod scorer;

pub use scorer::{
    cost_efficiency_score, success_rate_score, trust_score, user_preference_score, PaymentRanker,
};

use super::{RankingError, Result};
use crate::models::OrderContext;
use serde::{Deserialize, Serialize};

/// Fee at which cost efficiency bottoms out (5%)
pub const MAX_FEE: f64 = 0.05;
/// History younger than this many calendar months counts as recent use
pub const RECENT_USE_MONTHS: u32 = 3;
/// Orders above this amount qualify for the high-value preset
pub const HIGH_VALUE_THRESHOLD: f64 = 500.0;

/// Configurable weights for payment ranking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentWeights {
    pub trust: f64,
    pub user_preference: f64,
    pub success_rate: f64,
    pub cost_efficiency: f64,
}

impl Default for PaymentWeights {
    fn default() -> Self {
        WeightPreset::Default.weights()
    }
}

impl PaymentWeights {
    pub fn sum(&self) -> f64 {
        self.trust + self.user_preference + self.success_rate + self.cost_efficiency
    }

    /// Check that every weight is non-negative and they sum to 1.0
    pub fn validate(&self) -> Result<()> {
        let all = [
            ("trust", self.trust),
            ("user_preference", self.user_preference),
            ("success_rate", self.success_rate),
            ("cost_efficiency", self.cost_efficiency),
        ];

        if let Some((name, value)) = all.iter().find(|(_, v)| v.is_nan() || *v < 0.0) {
            return Err(RankingError::InvalidWeights(format!(
                "payment weight {} must be non-negative, got {}",
                name, value
            )));
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > super::WEIGHT_SUM_TOLERANCE {
            return Err(RankingError::InvalidWeights(format!(
                "payment weights must sum to 1.0, got {}",
                sum
            )));
        }

        Ok(())
    }
}

/// Named weight sets for payment ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPreset {
    #[default]
    Default,
    /// Expensive orders: trust and success rate over preference and cost
    HighValue,
    /// Seller known to be unverified. Builds on `HighValue` with trust raised
    /// to 0.60; preference, success and cost are rebalanced to 0.10 / 0.20 /
    /// 0.10 so the set still sums to 1.0.
    UnverifiedSeller,
}

impl WeightPreset {
    /// Pick the preset for an order. An unverified seller takes precedence
    /// over the high-value rule.
    pub fn for_order(context: &OrderContext, order_amount: f64) -> Self {
        if context.seller_verified == Some(false) {
            WeightPreset::UnverifiedSeller
        } else if context.high_value && order_amount > HIGH_VALUE_THRESHOLD {
            WeightPreset::HighValue
        } else {
            WeightPreset::Default
        }
    }

    pub fn weights(&self) -> PaymentWeights {
        match self {
            WeightPreset::Default => PaymentWeights {
                trust: 0.40,
                user_preference: 0.25,
                success_rate: 0.20,
                cost_efficiency: 0.15,
            },
            WeightPreset::HighValue => PaymentWeights {
                trust: 0.50,
                user_preference: 0.15,
                success_rate: 0.25,
                cost_efficiency: 0.10,
            },
            WeightPreset::UnverifiedSeller => PaymentWeights {
                trust: 0.60,
                user_preference: 0.10,
                success_rate: 0.20,
                cost_efficiency: 0.10,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightPreset::Default => "default",
            WeightPreset::HighValue => "high_value",
            WeightPreset::UnverifiedSeller => "unverified_seller",
        }
    }
}
