pub mod payment;
pub mod search;

pub use payment::{PaymentRanker, PaymentWeights, WeightPreset};
pub use search::{SearchRanker, SearchWeights};

use thiserror::Error;

/// Allowed drift when checking that weights sum to 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Scoring itself never fails; these cover weight validation and request
/// decoding at the edges.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, RankingError>;
