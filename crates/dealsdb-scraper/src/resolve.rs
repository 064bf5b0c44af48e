//! Price resolution: picks exactly one `(original, sale)` pair out of the
//! candidate tokens.
//!
//! Labels from markup always win over numeric guessing. Without labels the
//! lower price is the sale price and the higher one the original; DOM order
//! carries no meaning here.

use dealsdb_core::{PriceHint, PriceRole};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ResolutionFailure;
use crate::extract::ExtractedFields;
use crate::parse::round2;

/// Largest stated discount the resolver will use to derive a missing price.
const MAX_DERIVABLE_PERCENT: u32 = 95;

/// Which rule produced a [`ResolvedPrice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionMethod {
    /// Both an `original` and a `sale` label were present.
    BothLabeled,
    /// One role was labeled; the other side is the farthest remaining token.
    OneLabeled,
    /// No labels; lowest token is the sale, highest the original.
    MinMax,
    /// A single token plus an explicit "N% off" figure.
    DerivedFromPercent,
}

/// A sale price and the price it is discounted from.
///
/// `sale_price < original_price` and both are positive, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedPrice {
    pub original_price: Decimal,
    pub sale_price: Decimal,
    pub method: ResolutionMethod,
}

/// Resolves the candidate tokens of `fields` into one price pair.
///
/// Rules, first applicable wins:
/// 1. an `original` and a `sale` label → use both;
/// 2. labels of one role only, plus other tokens → labeled `sale` pairs with
///    the maximum of the rest, labeled `original` with the minimum;
/// 3. no labels and two or more values → min is sale, max is original;
/// 4. a single token and a stated discount in `(0, 95]` → derive the other;
/// 5. a single token and no usable discount → [`ResolutionFailure::NoDiscountSignal`];
/// 6. no tokens → [`ResolutionFailure::NoPriceFound`].
///
/// Pairs that come out inverted are swapped; equal pairs fail.
///
/// # Errors
///
/// Returns [`ResolutionFailure`] when there is not enough signal for a sale.
pub fn resolve(fields: &ExtractedFields) -> Result<ResolvedPrice, ResolutionFailure> {
    let tokens: Vec<PriceHint> = fields
        .price_tokens
        .iter()
        .filter(|t| t.amount > Decimal::ZERO)
        .copied()
        .collect();

    let (original, sale, method) = pick_pair(&tokens, fields.explicit_discount_percent)?;
    let resolved = order_pair(round2(original), round2(sale), method)?;

    tracing::trace!(
        name = %fields.name,
        original = %resolved.original_price,
        sale = %resolved.sale_price,
        method = ?resolved.method,
        "resolved price pair"
    );

    Ok(resolved)
}

fn pick_pair(
    tokens: &[PriceHint],
    explicit_discount_percent: Option<u32>,
) -> Result<(Decimal, Decimal, ResolutionMethod), ResolutionFailure> {
    let first_original = tokens.iter().position(|t| t.role == PriceRole::Original);
    let first_sale = tokens.iter().position(|t| t.role == PriceRole::Sale);

    match (first_original, first_sale) {
        (Some(o), Some(s)) => {
            let original = tokens[o].amount;
            let sale = tokens[s].amount;
            return Ok((original, sale, ResolutionMethod::BothLabeled));
        }
        (Some(idx), None) | (None, Some(idx)) => {
            let labeled = tokens[idx];
            let rest = tokens
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, t)| t.amount);

            if labeled.role == PriceRole::Sale {
                if let Some(original) = rest.max() {
                    return Ok((original, labeled.amount, ResolutionMethod::OneLabeled));
                }
            } else if let Some(sale) = rest.min() {
                return Ok((labeled.amount, sale, ResolutionMethod::OneLabeled));
            }
        }
        (None, None) => {
            let min = tokens.iter().map(|t| t.amount).min();
            let max = tokens.iter().map(|t| t.amount).max();
            if let (Some(min), Some(max)) = (min, max) {
                if min != max {
                    return Ok((max, min, ResolutionMethod::MinMax));
                }
            }
        }
    }

    let single = match tokens {
        [] => return Err(ResolutionFailure::NoPriceFound),
        [only] => *only,
        // Several tokens that all share one value; nothing distinguishes them.
        [first, ..] => *first,
    };

    let percent = explicit_discount_percent
        .filter(|p| (1..=MAX_DERIVABLE_PERCENT).contains(p))
        .ok_or(ResolutionFailure::NoDiscountSignal)?;
    let remaining = Decimal::ONE - Decimal::from(percent) / Decimal::ONE_HUNDRED;

    if single.role == PriceRole::Original {
        let sale = round2(single.amount * remaining);
        Ok((single.amount, sale, ResolutionMethod::DerivedFromPercent))
    } else {
        let original = single
            .amount
            .checked_div(remaining)
            .map(round2)
            .ok_or(ResolutionFailure::NoPriceFound)?;
        Ok((original, single.amount, ResolutionMethod::DerivedFromPercent))
    }
}

fn order_pair(
    original: Decimal,
    sale: Decimal,
    method: ResolutionMethod,
) -> Result<ResolvedPrice, ResolutionFailure> {
    let (original, sale) = if original <= sale {
        (sale, original)
    } else {
        (original, sale)
    };

    if original == sale {
        return Err(ResolutionFailure::NoDiscountSignal);
    }
    if sale <= Decimal::ZERO {
        return Err(ResolutionFailure::NoPriceFound);
    }

    Ok(ResolvedPrice {
        original_price: original,
        sale_price: sale,
        method,
    })
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
