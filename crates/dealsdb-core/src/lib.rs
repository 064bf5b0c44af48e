//! Shared domain types and configuration for the deals normalization core.
//!
//! Collectors produce [`RawContainer`] values, the scraper crate turns them
//! into [`Product`] records, and everything in between reads a single
//! immutable [`PipelineConfig`].

pub mod app_config;
pub mod config;
pub mod lexicon;
pub mod products;

use thiserror::Error;

pub use app_config::{DiscountBounds, PipelineConfig, DEFAULT_PRICE_CEILING};
pub use config::{load_pipeline_config, load_pipeline_config_from_env};
pub use lexicon::{load_lexicon, CategoryKeywords, Lexicon};
pub use products::{Category, PriceHint, PriceRole, Product, RawContainer};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read lexicon file {path}: {source}")]
    LexiconFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse lexicon file: {0}")]
    LexiconFileParse(#[source] serde_yaml::Error),

    #[error("config validation failed: {0}")]
    Validation(String),
}
