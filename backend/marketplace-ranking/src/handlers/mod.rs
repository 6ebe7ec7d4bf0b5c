// ============================================
// Ranking Request Handling
// ============================================
// JSON in, ranked JSON out. Weights in the request override the
// configured ones for that call only. `health` checks the configured
// marketplace backend instead of ranking anything.

use crate::client::{ApiClient, ClientError, HealthStatus};
use crate::config::Config;
use crate::models::{
    Listing, OrderContext, PaymentMethod, RankedPaymentMethod, ScoredListing, SearchQuery,
    UserPaymentProfile,
};
use crate::services::{
    PaymentRanker, PaymentWeights, RankingError, Result, SearchRanker, SearchWeights,
    WeightPreset,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error("Backend health check failed: {0}")]
    Client(#[from] ClientError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankingRequest {
    Search {
        items: Vec<Listing>,
        query: SearchQuery,
        #[serde(default)]
        weights: Option<SearchWeights>,
    },
    Payment {
        methods: Vec<PaymentMethod>,
        profile: UserPaymentProfile,
        order_amount: f64,
        current_time: DateTime<Utc>,
        #[serde(default)]
        weights: Option<PaymentWeights>,
    },
    Recommend {
        methods: Vec<PaymentMethod>,
        profile: UserPaymentProfile,
        order_amount: f64,
        current_time: DateTime<Utc>,
        #[serde(default)]
        context: OrderContext,
        #[serde(default)]
        weights: Option<PaymentWeights>,
    },
    Health,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RankingResponse {
    Search {
        results: Vec<ScoredListing>,
    },
    Payment {
        results: Vec<RankedPaymentMethod>,
    },
    Recommend {
        preset: WeightPreset,
        recommendation: Option<RankedPaymentMethod>,
    },
    Health {
        healthy: bool,
        status: HealthStatus,
    },
}

pub fn parse_request(input: &str) -> Result<RankingRequest> {
    serde_json::from_str(input)
        .map_err(|e| RankingError::InvalidInput(format!("Malformed ranking request: {}", e)))
}

/// Run a request against the configured (or per-request) weights
pub async fn handle(
    request: RankingRequest,
    config: &Config,
) -> std::result::Result<RankingResponse, HandlerError> {
    match request {
        RankingRequest::Search {
            items,
            query,
            weights,
        } => {
            let weights = weights.unwrap_or(config.search_weights);
            weights.validate()?;

            let results = SearchRanker::with_weights(weights).rank(items, &query);
            Ok(RankingResponse::Search { results })
        }
        RankingRequest::Payment {
            methods,
            profile,
            order_amount,
            current_time,
            weights,
        } => {
            let ranker = payment_ranker(weights, config)?;
            let results = ranker.rank(methods, &profile, order_amount, current_time);
            Ok(RankingResponse::Payment { results })
        }
        RankingRequest::Recommend {
            methods,
            profile,
            order_amount,
            current_time,
            context,
            weights,
        } => {
            let ranker = payment_ranker(weights, config)?;
            let preset = WeightPreset::for_order(&context, order_amount);
            let recommendation =
                ranker.recommend(methods, &profile, order_amount, &context, current_time);
            Ok(RankingResponse::Recommend {
                preset,
                recommendation,
            })
        }
        RankingRequest::Health => {
            let status = check_health(config).await?;
            Ok(RankingResponse::Health {
                healthy: status.is_healthy(),
                status,
            })
        }
    }
}

/// Build a client from `config.api` and hit the backend's health endpoint
pub async fn check_health(config: &Config) -> std::result::Result<HealthStatus, ClientError> {
    let client = ApiClient::new(config.api.clone())?;
    let status = client.health_check().await?;

    info!(
        base_url = %client.base_url(),
        status = %status.status,
        "Backend health checked"
    );

    Ok(status)
}

fn payment_ranker(weights: Option<PaymentWeights>, config: &Config) -> Result<PaymentRanker> {
    let weights = weights.unwrap_or(config.payment_weights);
    weights.validate()?;
    Ok(PaymentRanker::with_weights(weights))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::from_vars(Vec::new()).unwrap()
    }

    #[tokio::test]
    async fn test_parse_and_handle_search() {
        let input = r#"{
            "kind": "search",
            "items": [
                {
                    "id": "far",
                    "name": "Desk",
                    "category": "Furniture",
                    "location": {"lat": 40.80, "lon": -74.0060},
                    "listing_time": "2024-06-01T10:00:00Z",
                    "created_at": "2024-06-01T10:00:00Z",
                    "pickup_window": {"start": "08:00:00", "end": "20:00:00"},
                    "seller_reputation": 0.9,
                    "available": true
                },
                {
                    "id": "near",
                    "name": "Chair",
                    "category": "Furniture",
                    "tags": ["office"],
                    "location": {"lat": 40.7128, "lon": -74.0060},
                    "listing_time": "2024-06-01T10:00:00Z",
                    "created_at": "2024-06-01T10:00:00Z",
                    "pickup_window": {"start": "08:00:00", "end": "20:00:00"},
                    "seller_reputation": 0.9,
                    "available": true
                }
            ],
            "query": {
                "keywords": "chair",
                "category": "furniture",
                "user_location": {"lat": 40.7128, "lon": -74.0060},
                "current_time": "2024-06-01T12:00:00Z"
            }
        }"#;

        let request = parse_request(input).unwrap();
        match handle(request, &config()).await.unwrap() {
            RankingResponse::Search { results } => {
                assert_eq!(results.len(), 2);
                assert_eq!(results[0].listing.id, "near");
                assert!(results[0].score > results[1].score);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_handle_recommend_reports_preset() {
        let input = r#"{
            "kind": "recommend",
            "methods": [
                {"id": "cash", "name": "Cash", "type": "cash", "transaction_fee": 0.0, "available": true},
                {"id": "escrow", "name": "Escrow", "type": "escrow", "transaction_fee": 0.03, "available": true}
            ],
            "profile": {"user_id": "u1", "risk_tolerance": "medium"},
            "order_amount": 800.0,
            "current_time": "2024-06-01T12:00:00Z",
            "context": {"high_value": true}
        }"#;

        let request = parse_request(input).unwrap();
        match handle(request, &config()).await.unwrap() {
            RankingResponse::Recommend {
                preset,
                recommendation,
            } => {
                assert_eq!(preset, WeightPreset::HighValue);
                assert_eq!(recommendation.unwrap().method.id, "escrow");
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_request_weights_are_validated() {
        let input = r#"{
            "kind": "payment",
            "methods": [],
            "profile": {"user_id": "u1"},
            "order_amount": 10.0,
            "current_time": "2024-06-01T12:00:00Z",
            "weights": {"trust": 0.9, "user_preference": 0.9, "success_rate": 0.0, "cost_efficiency": 0.0}
        }"#;

        let request = parse_request(input).unwrap();
        assert!(matches!(
            handle(request, &config()).await,
            Err(HandlerError::Ranking(RankingError::InvalidWeights(_)))
        ));
    }

    #[test]
    fn test_malformed_request() {
        assert!(matches!(
            parse_request(r#"{"kind": "teleport"}"#),
            Err(RankingError::InvalidInput(_))
        ));
        assert!(parse_request("not json").is_err());
    }

    fn api_config(base_url: &str) -> Config {
        Config::from_vars(vec![
            ("API_BASE_URL".to_string(), base_url.to_string()),
            ("API_TIMEOUT_MS".to_string(), "500".to_string()),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_health_request_unreachable_backend() {
        // Nothing listens on the discard port
        let config = api_config("http://127.0.0.1:9");
        let request = parse_request(r#"{"kind": "health"}"#).unwrap();

        assert!(matches!(
            handle(request, &config).await,
            Err(HandlerError::Client(ClientError::Request(_)))
        ));
    }

    #[tokio::test]
    async fn test_health_check_rejects_bad_base_url() {
        let config = api_config("not a url");

        assert!(matches!(
            check_health(&config).await,
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
