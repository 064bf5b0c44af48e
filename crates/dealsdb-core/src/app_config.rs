use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::lexicon::Lexicon;
use crate::ConfigError;

/// Price tokens above this are treated as unit or parsing errors.
pub const DEFAULT_PRICE_CEILING: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Acceptable discount range, inclusive on both ends.
///
/// Deserialization goes through [`DiscountBounds::new`], so an inverted or
/// over-100 range never loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedBounds")]
pub struct DiscountBounds {
    pub min_percent: u32,
    pub max_percent: u32,
}

#[derive(Deserialize)]
struct UncheckedBounds {
    min_percent: u32,
    max_percent: u32,
}

impl TryFrom<UncheckedBounds> for DiscountBounds {
    type Error = ConfigError;

    fn try_from(raw: UncheckedBounds) -> Result<Self, Self::Error> {
        Self::new(raw.min_percent, raw.max_percent)
    }
}

impl DiscountBounds {
    /// Builds bounds, rejecting `min > max` and `max > 100`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the range is empty or exceeds 100%.
    pub fn new(min_percent: u32, max_percent: u32) -> Result<Self, ConfigError> {
        if max_percent > 100 {
            return Err(ConfigError::Validation(format!(
                "max discount percent {max_percent} exceeds 100"
            )));
        }
        if min_percent > max_percent {
            return Err(ConfigError::Validation(format!(
                "min discount percent {min_percent} is greater than max {max_percent}"
            )));
        }
        Ok(Self {
            min_percent,
            max_percent,
        })
    }

    #[must_use]
    pub fn contains(&self, percent: u32) -> bool {
        (self.min_percent..=self.max_percent).contains(&percent)
    }
}

impl Default for DiscountBounds {
    fn default() -> Self {
        Self {
            min_percent: 5,
            max_percent: 90,
        }
    }
}

/// Read-only configuration shared by every pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub bounds: DiscountBounds,
    pub price_ceiling: Decimal,
    pub lexicon: Lexicon,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            bounds: DiscountBounds::default(),
            price_ceiling: DEFAULT_PRICE_CEILING,
            lexicon: Lexicon::default(),
        }
    }
}
