use thiserror::Error;

/// The field extractor could not produce a usable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    #[error("no candidate name passed validation")]
    NoValidName,
}

/// Not enough numeric signal to establish a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolutionFailure {
    #[error("no price found")]
    NoPriceFound,

    #[error("no discount signal (single or equal prices)")]
    NoDiscountSignal,
}

/// The computed discount falls outside the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("discount {percent}% is below the minimum of {min}%")]
    TooSmall { percent: i64, min: u32 },

    #[error("discount {percent}% exceeds the maximum of {max}%")]
    TooLarge { percent: i64, max: u32 },

    #[error("discount {percent}% is not positive")]
    NonPositiveDiscount { percent: i64 },
}

/// Why a container produced no product. Wraps whichever stage gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionFailure),

    #[error("price resolution failed: {0}")]
    Resolution(#[from] ResolutionFailure),

    #[error("discount validation failed: {0}")]
    Validation(#[from] ValidationFailure),
}

impl RejectReason {
    /// Stable snake_case code for aggregating rejections.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::Extraction(ExtractionFailure::NoValidName) => "no_valid_name",
            RejectReason::Resolution(ResolutionFailure::NoPriceFound) => "no_price_found",
            RejectReason::Resolution(ResolutionFailure::NoDiscountSignal) => "no_discount_signal",
            RejectReason::Validation(ValidationFailure::TooSmall { .. }) => "too_small",
            RejectReason::Validation(ValidationFailure::TooLarge { .. }) => "too_large",
            RejectReason::Validation(ValidationFailure::NonPositiveDiscount { .. }) => {
                "non_positive_discount"
            }
        }
    }
}

/// Faults on the collector side of the boundary: feeds that cannot be read
/// at all, as opposed to individual containers that get rejected.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid shop URL \"{shop_url}\": {reason}")]
    InvalidShopUrl { shop_url: String, reason: String },
}
