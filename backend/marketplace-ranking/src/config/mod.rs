use crate::client::{ApiClientConfig, DEFAULT_BASE_URL};
use crate::services::{PaymentWeights, RankingError, SearchWeights};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read environment: {0}")]
    Env(#[from] envy::Error),

    #[error(transparent)]
    Weights(#[from] RankingError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceConfig,
    pub search_weights: SearchWeights,
    pub payment_weights: PaymentWeights,
    pub api: ApiClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// `SEARCH_WEIGHT_*` overrides; unset fields keep the default
#[derive(Debug, Clone, Default, Deserialize)]
struct SearchWeightOverrides {
    proximity: Option<f64>,
    recency: Option<f64>,
    availability: Option<f64>,
    category_match: Option<f64>,
    reputation: Option<f64>,
    staleness: Option<f64>,
}

impl SearchWeightOverrides {
    fn apply(self, base: SearchWeights) -> SearchWeights {
        SearchWeights {
            proximity: self.proximity.unwrap_or(base.proximity),
            recency: self.recency.unwrap_or(base.recency),
            availability: self.availability.unwrap_or(base.availability),
            category_match: self.category_match.unwrap_or(base.category_match),
            reputation: self.reputation.unwrap_or(base.reputation),
            staleness: self.staleness.unwrap_or(base.staleness),
        }
    }
}

/// `PAYMENT_WEIGHT_*` overrides; unset fields keep the default
#[derive(Debug, Clone, Default, Deserialize)]
struct PaymentWeightOverrides {
    trust: Option<f64>,
    user_preference: Option<f64>,
    success_rate: Option<f64>,
    cost_efficiency: Option<f64>,
}

impl PaymentWeightOverrides {
    fn apply(self, base: PaymentWeights) -> PaymentWeights {
        PaymentWeights {
            trust: self.trust.unwrap_or(base.trust),
            user_preference: self.user_preference.unwrap_or(base.user_preference),
            success_rate: self.success_rate.unwrap_or(base.success_rate),
            cost_efficiency: self.cost_efficiency.unwrap_or(base.cost_efficiency),
        }
    }
}

/// `API_*` settings
#[derive(Debug, Clone, Deserialize)]
struct ApiSettings {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

fn default_service_name() -> String {
    "marketplace-ranking".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Config {
    /// Load from the process environment (and `.env` if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();

        let service: ServiceConfig = envy::from_iter(vars.iter().cloned())?;
        let search: SearchWeightOverrides =
            envy::prefixed("SEARCH_WEIGHT_").from_iter(vars.iter().cloned())?;
        let payment: PaymentWeightOverrides =
            envy::prefixed("PAYMENT_WEIGHT_").from_iter(vars.iter().cloned())?;
        let api: ApiSettings = envy::prefixed("API_").from_iter(vars)?;

        let search_weights = search.apply(SearchWeights::default());
        search_weights.validate()?;

        let payment_weights = payment.apply(PaymentWeights::default());
        payment_weights.validate()?;

        Ok(Config {
            service,
            search_weights,
            payment_weights,
            api: ApiClientConfig {
                base_url: api.base_url,
                timeout: Duration::from_millis(api.timeout_ms),
            },
        })
    }
}
