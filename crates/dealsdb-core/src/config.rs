use std::path::Path;

use rust_decimal::Decimal;

use crate::app_config::{DiscountBounds, PipelineConfig, DEFAULT_PRICE_CEILING};
use crate::lexicon::{load_lexicon, Lexicon};
use crate::ConfigError;

/// Load pipeline configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or the lexicon file cannot be loaded.
pub fn load_pipeline_config() -> Result<PipelineConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_pipeline_config_from_env()
}

/// Load pipeline configuration from environment variables already in the process.
///
/// Unlike [`load_pipeline_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid or the lexicon file cannot be loaded.
pub fn load_pipeline_config_from_env() -> Result<PipelineConfig, ConfigError> {
    build_pipeline_config(|key| std::env::var(key))
}

/// Build pipeline configuration using the provided env-var lookup function.
///
/// Every variable is optional; absent ones take the library defaults.
fn build_pipeline_config<F>(lookup: F) -> Result<PipelineConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = DiscountBounds::default();

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
        }
    };

    let min_percent = parse_u32("DEALSDB_MIN_DISCOUNT_PERCENT", defaults.min_percent)?;
    let max_percent = parse_u32("DEALSDB_MAX_DISCOUNT_PERCENT", defaults.max_percent)?;
    let bounds = DiscountBounds::new(min_percent, max_percent)?;

    let price_ceiling = match lookup("DEALSDB_PRICE_CEILING") {
        Err(_) => DEFAULT_PRICE_CEILING,
        Ok(raw) => parse_price_ceiling(&raw)?,
    };

    let lexicon = match lookup("DEALSDB_LEXICON_PATH") {
        Ok(path) if !path.trim().is_empty() => load_lexicon(Path::new(path.trim()))?,
        _ => Lexicon::default(),
    };

    Ok(PipelineConfig {
        bounds,
        price_ceiling,
        lexicon,
    })
}

fn parse_price_ceiling(raw: &str) -> Result<Decimal, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "DEALSDB_PRICE_CEILING".to_string(),
        reason,
    };

    let value = raw
        .trim()
        .parse::<Decimal>()
        .map_err(|e| invalid(e.to_string()))?;
    if value <= Decimal::ZERO {
        return Err(invalid(format!("must be positive, got {value}")));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
