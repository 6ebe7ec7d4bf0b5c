use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Recurring daily pickup window (wall-clock, no date)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickupWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Marketplace listing as handed over by the catalog store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub location: GeoPoint,
    /// When the listing went live
    pub listing_time: DateTime<Utc>,
    /// When the record was created (drives staleness)
    pub created_at: DateTime<Utc>,
    pub pickup_window: PickupWindow,
    /// Historical completion rate, 0.0 - 1.0
    pub seller_reputation: f64,
    #[serde(default)]
    pub unanswered_requests: u32,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub category: Option<String>,
    pub user_location: GeoPoint,
    pub current_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoredListing {
    pub listing: Listing,
    pub score: f64,
}

/// Per-factor search scores, before weighting
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SearchScoreBreakdown {
    pub distance_km: f64,
    pub proximity: f64,
    pub recency: f64,
    pub availability: f64,
    pub category_match: f64,
    pub reputation: f64,
    pub staleness_penalty: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Escrow,
    Wallet,
    Card,
    Paypal,
    Cash,
    Barter,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Escrow => "escrow",
            PaymentType::Wallet => "wallet",
            PaymentType::Card => "card",
            PaymentType::Paypal => "paypal",
            PaymentType::Cash => "cash",
            PaymentType::Barter => "barter",
        }
    }

    /// Static trust rating before risk-tolerance adjustment
    pub fn base_trust(&self) -> f64 {
        match self {
            PaymentType::Escrow => 1.0,
            PaymentType::Wallet => 0.8,
            PaymentType::Card => 0.8,
            PaymentType::Paypal => 0.7,
            PaymentType::Cash => 0.5,
            PaymentType::Barter => 0.4,
        }
    }

    /// Success rate assumed when the user has no attempts on record
    pub fn default_success_rate(&self) -> f64 {
        match self {
            PaymentType::Escrow => 0.98,
            PaymentType::Wallet => 0.95,
            PaymentType::Card => 0.92,
            PaymentType::Paypal => 0.90,
            PaymentType::Cash => 0.85,
            PaymentType::Barter => 0.70,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub method_type: PaymentType,
    /// Fee as a fraction of the order value
    pub transaction_fee: f64,
    pub available: bool,
    #[serde(default)]
    pub requires_online: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentHistory {
    pub method_id: String,
    pub success_count: u32,
    pub total_attempts: u32,
    pub last_used: DateTime<Utc>,
    #[serde(default)]
    pub is_preferred: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPaymentProfile {
    pub user_id: String,
    #[serde(default)]
    pub history: Vec<PaymentHistory>,
    #[serde(default)]
    pub preferred_method_id: Option<String>,
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,
}

impl UserPaymentProfile {
    /// First history entry for the method; later duplicates are ignored
    pub fn history_for(&self, method_id: &str) -> Option<&PaymentHistory> {
        self.history.iter().find(|h| h.method_id == method_id)
    }
}

/// Per-factor payment scores, before weighting
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PaymentScoreBreakdown {
    pub trust: f64,
    pub user_preference: f64,
    pub success_rate: f64,
    pub cost_efficiency: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedPaymentMethod {
    pub method: PaymentMethod,
    pub score: f64,
    pub breakdown: PaymentScoreBreakdown,
}

/// Order-level risk signals used to pick a payment weight preset
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OrderContext {
    #[serde(default)]
    pub high_value: bool,
    /// `Some(false)` only when the seller is known to be unverified
    #[serde(default)]
    pub seller_verified: Option<bool>,
}
