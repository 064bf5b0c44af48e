//! Discount validation against configured bounds.

use dealsdb_core::DiscountBounds;
use serde::Serialize;

use crate::error::ValidationFailure;
use crate::parse::discount_percent;
use crate::resolve::ResolvedPrice;

/// A discount percentage that passed [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidatedDiscount {
    pub discount_percent: u32,
}

/// Computes `round(100 * (original - sale) / original)` and checks it
/// against `bounds`.
///
/// A non-positive discount is reported as such even when it is also below
/// the minimum.
///
/// # Errors
///
/// Returns [`ValidationFailure`] when the discount is non-positive, below
/// `bounds.min_percent`, or above `bounds.max_percent`.
pub fn validate(
    price: &ResolvedPrice,
    bounds: &DiscountBounds,
) -> Result<ValidatedDiscount, ValidationFailure> {
    let percent = discount_percent(price.original_price, price.sale_price).unwrap_or(0);

    if percent <= 0 {
        return Err(ValidationFailure::NonPositiveDiscount { percent });
    }
    if percent < i64::from(bounds.min_percent) {
        return Err(ValidationFailure::TooSmall {
            percent,
            min: bounds.min_percent,
        });
    }
    if percent > i64::from(bounds.max_percent) {
        return Err(ValidationFailure::TooLarge {
            percent,
            max: bounds.max_percent,
        });
    }

    let discount_percent =
        u32::try_from(percent).map_err(|_| ValidationFailure::TooLarge {
            percent,
            max: bounds.max_percent,
        })?;

    Ok(ValidatedDiscount { discount_percent })
}
