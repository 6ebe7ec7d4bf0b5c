use super::{
    SearchWeights, PROXIMITY_CUTOFF_KM, RECENCY_HALF_LIFE_HOURS, STALENESS_PENALTY,
    STALE_AGE_HOURS, STALE_UNANSWERED_REQUESTS,
};
use crate::models::{Listing, ScoredListing, SearchQuery, SearchScoreBreakdown};
use crate::utils::{clamp_unit, exponential_decay, haversine_km, hour_in_window, hours_between};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use tracing::{debug, info};

/// Linear decay from 1.0 at 0 km to 0.0 at the 10 km cutoff
pub fn proximity_score(distance_km: f64) -> f64 {
    if distance_km >= PROXIMITY_CUTOFF_KM {
        return 0.0;
    }
    clamp_unit(1.0 - distance_km / PROXIMITY_CUTOFF_KM)
}

/// 24-hour half-life decay from listing time to `now`
pub fn recency_score(listing_time: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let hours = hours_between(listing_time, now);
    clamp_unit(exponential_decay(hours, RECENCY_HALF_LIFE_HOURS))
}

/// 1.0 when the listing is available and `now` falls in its pickup window
pub fn availability_score(listing: &Listing, now: DateTime<Utc>) -> f64 {
    if listing.available && hour_in_window(now, &listing.pickup_window) {
        1.0
    } else {
        0.0
    }
}

/// Category/keyword relevance.
///
/// An exact (case-insensitive) category match scores 1.0. Otherwise each
/// keyword token earns 1.0 when it appears in the category or a tag, 0.5 when
/// only its first three characters do. The result is the mean over tokens,
/// capped at 1.0.
pub fn category_match_score(listing: &Listing, query: &SearchQuery) -> f64 {
    let listing_category = listing.category.to_lowercase();

    if let Some(category) = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        if category.to_lowercase() == listing_category {
            return 1.0;
        }
    }

    let keywords = query.keywords.to_lowercase();
    let tokens: Vec<&str> = keywords.split_whitespace().collect();
    if tokens.is_empty() {
        return 0.0;
    }

    let tags: Vec<String> = listing.tags.iter().map(|t| t.to_lowercase()).collect();
    let appears = |needle: &str| {
        listing_category.contains(needle) || tags.iter().any(|t| t.contains(needle))
    };

    let points: f64 = tokens
        .iter()
        .map(|&token| {
            if appears(token) {
                1.0
            } else {
                let prefix: String = token.chars().take(3).collect();
                if appears(prefix.as_str()) {
                    0.5
                } else {
                    0.0
                }
            }
        })
        .sum();

    (points / tokens.len() as f64).min(1.0)
}

pub fn reputation_score(listing: &Listing) -> f64 {
    clamp_unit(listing.seller_reputation)
}

/// 0.2 for listings older than 72h or with more than 3 unanswered requests
pub fn staleness_penalty(listing: &Listing, now: DateTime<Utc>) -> f64 {
    let age_hours = hours_between(listing.created_at, now);
    if age_hours > STALE_AGE_HOURS || listing.unanswered_requests > STALE_UNANSWERED_REQUESTS {
        STALENESS_PENALTY
    } else {
        0.0
    }
}

/// Search ranker
///
/// Stateless apart from its weights; the same inputs always produce the same
/// ordering.
#[derive(Debug, Clone, Default)]
pub struct SearchRanker {
    weights: SearchWeights,
}

impl SearchRanker {
    /// Create ranker with default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom weights
    pub fn with_weights(weights: SearchWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &SearchWeights {
        &self.weights
    }

    /// Score every listing and return them best first.
    ///
    /// Unavailable listings are scored, not dropped; filtering is up to the
    /// caller.
    pub fn rank(&self, items: Vec<Listing>, query: &SearchQuery) -> Vec<ScoredListing> {
        let input_count = items.len();

        let mut scored: Vec<ScoredListing> = items
            .into_iter()
            .map(|listing| {
                let score = self.explain(&listing, query).total;
                ScoredListing { listing, score }
            })
            .collect();

        scored.sort_by(compare_scored);

        info!(
            input_count = input_count,
            top_score = scored.first().map(|s| s.score),
            "Search ranking completed"
        );

        scored
    }

    /// Combined score for a single listing
    pub fn score(&self, listing: &Listing, query: &SearchQuery) -> f64 {
        self.explain(listing, query).total
    }

    /// Every sub-score plus the combined total for a listing
    pub fn explain(&self, listing: &Listing, query: &SearchQuery) -> SearchScoreBreakdown {
        let now = query.current_time;
        let w = &self.weights;

        let distance_km = haversine_km(query.user_location, listing.location);
        let proximity = proximity_score(distance_km);
        let recency = recency_score(listing.listing_time, now);
        let availability = availability_score(listing, now);
        let category_match = category_match_score(listing, query);
        let reputation = reputation_score(listing);
        let staleness = staleness_penalty(listing, now);

        let raw = w.proximity * proximity
            + w.recency * recency
            + w.availability * availability
            + w.category_match * category_match
            + w.reputation * reputation
            - w.staleness * staleness;
        // Also maps NaN and -0.0 to +0.0 so sorting stays total
        let total = if raw > 0.0 { raw } else { 0.0 };

        debug!(
            listing_id = %listing.id,
            distance_km = distance_km,
            proximity = proximity,
            recency = recency,
            availability = availability,
            category_match = category_match,
            reputation = reputation,
            staleness = staleness,
            score = total,
            "Search score computed"
        );

        SearchScoreBreakdown {
            distance_km,
            proximity,
            recency,
            availability,
            category_match,
            reputation,
            staleness_penalty: staleness,
            total,
        }
    }
}

/// Score desc, then reputation desc, created_at desc, id asc
fn compare_scored(a: &ScoredListing, b: &ScoredListing) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| {
            b.listing
                .seller_reputation
                .total_cmp(&a.listing.seller_reputation)
        })
        .then_with(|| b.listing.created_at.cmp(&a.listing.created_at))
        .then_with(|| a.listing.id.cmp(&b.listing.id))
}
