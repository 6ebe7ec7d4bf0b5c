use super::{PaymentWeights, WeightPreset, MAX_FEE, RECENT_USE_MONTHS};
use crate::models::{
    OrderContext, PaymentMethod, PaymentScoreBreakdown, RankedPaymentMethod, RiskTolerance,
    UserPaymentProfile,
};
use crate::utils::{clamp_unit, months_before};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::{debug, info};

/// Trust rating for the method type, adjusted by the user's risk tolerance.
///
/// Low tolerance pushes methods rated 0.8 or more up by 0.1 and everything
/// else down by 0.1. High tolerance adds 0.05 across the board.
pub fn trust_score(method: &PaymentMethod, risk_tolerance: RiskTolerance) -> f64 {
    let base = method.method_type.base_trust();

    let adjusted = match risk_tolerance {
        RiskTolerance::Low if base >= 0.8 => base + 0.1,
        RiskTolerance::Low => base - 0.1,
        RiskTolerance::Medium => base,
        RiskTolerance::High => base + 0.05,
    };

    clamp_unit(adjusted)
}

/// 1.0 for the explicitly preferred method, 0.5 for one used within the last
/// three calendar months, 0.0 otherwise
pub fn user_preference_score(
    method: &PaymentMethod,
    profile: &UserPaymentProfile,
    now: DateTime<Utc>,
) -> f64 {
    if profile.preferred_method_id.as_deref() == Some(method.id.as_str()) {
        return 1.0;
    }

    let cutoff = months_before(now, RECENT_USE_MONTHS);
    match profile.history_for(&method.id) {
        Some(history) if history.last_used >= cutoff => 0.5,
        _ => 0.0,
    }
}

/// Historical success ratio, or the type default when there are no attempts
pub fn success_rate_score(method: &PaymentMethod, profile: &UserPaymentProfile) -> f64 {
    match profile.history_for(&method.id) {
        Some(history) if history.total_attempts > 0 => {
            clamp_unit(f64::from(history.success_count) / f64::from(history.total_attempts))
        }
        _ => method.method_type.default_success_rate(),
    }
}

/// 1.0 at no fee, 0.0 at 5% and above, linear in between.
///
/// `order_amount` does not enter the formula.
pub fn cost_efficiency_score(method: &PaymentMethod, _order_amount: f64) -> f64 {
    clamp_unit((MAX_FEE - method.transaction_fee) / MAX_FEE)
}

/// Payment method ranker
#[derive(Debug, Clone, Default)]
pub struct PaymentRanker {
    weights: PaymentWeights,
}

impl PaymentRanker {
    /// Create ranker with default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom weights
    pub fn with_weights(weights: PaymentWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &PaymentWeights {
        &self.weights
    }

    /// Rank the available methods for an order, best first.
    ///
    /// Unavailable methods never appear in the output.
    pub fn rank(
        &self,
        methods: Vec<PaymentMethod>,
        profile: &UserPaymentProfile,
        order_amount: f64,
        now: DateTime<Utc>,
    ) -> Vec<RankedPaymentMethod> {
        rank_with_weights(&self.weights, methods, profile, order_amount, now)
    }

    /// Best method for an order, with weights picked from the order context.
    ///
    /// Orders that map to the default preset keep this ranker's own weights.
    pub fn recommend(
        &self,
        methods: Vec<PaymentMethod>,
        profile: &UserPaymentProfile,
        order_amount: f64,
        context: &OrderContext,
        now: DateTime<Utc>,
    ) -> Option<RankedPaymentMethod> {
        let preset = WeightPreset::for_order(context, order_amount);
        let weights = match preset {
            WeightPreset::Default => self.weights,
            other => other.weights(),
        };

        debug!(
            user_id = %profile.user_id,
            order_amount = order_amount,
            preset = preset.as_str(),
            "Payment weight preset selected"
        );

        rank_with_weights(&weights, methods, profile, order_amount, now)
            .into_iter()
            .next()
    }

    /// Combined score for one method; 0.0 if it is unavailable
    pub fn score(
        &self,
        method: &PaymentMethod,
        profile: &UserPaymentProfile,
        order_amount: f64,
        now: DateTime<Utc>,
    ) -> f64 {
        if !method.available {
            return 0.0;
        }
        let breakdown = breakdown_for(method, profile, order_amount, now);
        combine(&self.weights, &breakdown)
    }
}

fn breakdown_for(
    method: &PaymentMethod,
    profile: &UserPaymentProfile,
    order_amount: f64,
    now: DateTime<Utc>,
) -> PaymentScoreBreakdown {
    PaymentScoreBreakdown {
        trust: trust_score(method, profile.risk_tolerance),
        user_preference: user_preference_score(method, profile, now),
        success_rate: success_rate_score(method, profile),
        cost_efficiency: cost_efficiency_score(method, order_amount),
    }
}

fn combine(weights: &PaymentWeights, breakdown: &PaymentScoreBreakdown) -> f64 {
    clamp_unit(
        weights.trust * breakdown.trust
            + weights.user_preference * breakdown.user_preference
            + weights.success_rate * breakdown.success_rate
            + weights.cost_efficiency * breakdown.cost_efficiency,
    )
}

fn rank_with_weights(
    weights: &PaymentWeights,
    methods: Vec<PaymentMethod>,
    profile: &UserPaymentProfile,
    order_amount: f64,
    now: DateTime<Utc>,
) -> Vec<RankedPaymentMethod> {
    let input_count = methods.len();

    let mut ranked: Vec<RankedPaymentMethod> = methods
        .into_iter()
        .filter(|m| m.available)
        .map(|method| {
            let breakdown = breakdown_for(&method, profile, order_amount, now);
            let score = combine(weights, &breakdown);

            debug!(
                method_id = %method.id,
                method_type = method.method_type.as_str(),
                trust = breakdown.trust,
                user_preference = breakdown.user_preference,
                success_rate = breakdown.success_rate,
                cost_efficiency = breakdown.cost_efficiency,
                score = score,
                "Payment score computed"
            );

            RankedPaymentMethod {
                method,
                score,
                breakdown,
            }
        })
        .collect();

    ranked.sort_by(|a, b| compare_ranked(a, b, profile));

    info!(
        user_id = %profile.user_id,
        input_count = input_count,
        output_count = ranked.len(),
        top_score = ranked.first().map(|r| r.score),
        "Payment ranking completed"
    );

    ranked
}

/// Score desc, trust desc, last_used desc (history first), name asc, id asc
fn compare_ranked(
    a: &RankedPaymentMethod,
    b: &RankedPaymentMethod,
    profile: &UserPaymentProfile,
) -> Ordering {
    let last_used = |r: &RankedPaymentMethod| {
        profile.history_for(&r.method.id).map(|h| h.last_used)
    };

    b.score
        .total_cmp(&a.score)
        .then_with(|| b.breakdown.trust.total_cmp(&a.breakdown.trust))
        .then_with(|| match (last_used(a), last_used(b)) {
            (Some(a_used), Some(b_used)) => b_used.cmp(&a_used),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.method.name.cmp(&b.method.name))
        .then_with(|| a.method.id.cmp(&b.method.id))
}
