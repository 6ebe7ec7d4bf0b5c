pub mod client;
pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

pub use client::{ApiClient, ApiClientConfig};
pub use config::Config;
pub use services::{PaymentRanker, PaymentWeights, SearchRanker, SearchWeights, WeightPreset};
