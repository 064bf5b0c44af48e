//! Low-level string and money helpers: price tokens and "N% off" figures
//! scanned out of free text, plus the rounding rules every stage shares.
//!
//! See [`crate::extract`] for how price tokens merge with collector hints.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Optional currency symbol, digits with optional thousands separators,
/// optional fraction. The fraction is captured whole so that `12.5` and
/// `12.999` can be told apart from a two-digit cents part.
static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<sym>[$£€¥]\s?)?(?P<int>\d{1,3}(?:,\d{3})+|\d+)(?P<frac>\.\d+)?")
        .expect("valid price regex")
});

static DISCOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:(?P<off>\d{1,3})\s?%\s*off\b|\bsave\s+(?:up\s+to\s+)?(?P<save>\d{1,3})\s?%|(?:^|\s)-\s?(?P<minus>\d{1,3})\s?%)",
    )
    .expect("valid discount regex")
});

/// Rounds a monetary value to 2 decimal places, half-up.
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `round(100 * (original - sale) / original)`, half-up.
///
/// Returns `None` when `original` is zero.
#[must_use]
pub fn discount_percent(original: Decimal, sale: Decimal) -> Option<i64> {
    let ratio = (original - sale)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(original)?;
    ratio
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Parses a single price string such as `"$1,299.00"`, `"84"` or `"19.99"`.
///
/// Unlike [`scan_price_tokens`] this does not require the amount to look like
/// money; it is meant for fields a feed already declares to be a price.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches(['$', '£', '€', '¥'])
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<Decimal>().ok()
}

/// Scans free text for dollar-amount-shaped substrings, in text order.
///
/// A token qualifies when it carries a currency symbol or a two-digit
/// fraction. Numbers immediately followed by `%` are percentages, and
/// fractions of any other length are not cents; both are skipped. No
/// deduplication or bounds filtering happens here.
#[must_use]
pub fn scan_price_tokens(text: &str) -> Vec<Decimal> {
    let mut tokens = Vec::new();

    for caps in PRICE_RE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        let followed_by_percent = text[whole.end()..].trim_start().starts_with('%');
        if followed_by_percent {
            continue;
        }

        let has_symbol = caps.name("sym").is_some();
        let frac = caps.name("frac").map(|m| m.as_str());
        let cents_shaped = frac.is_some_and(|f| f.len() == 3);
        if frac.is_some() && !cents_shaped {
            continue;
        }
        if !has_symbol && !cents_shaped {
            continue;
        }

        let int_part = caps
            .name("int")
            .map(|m| m.as_str().replace(',', ""))
            .unwrap_or_default();
        let literal = format!("{int_part}{}", frac.unwrap_or(""));
        if let Ok(value) = literal.parse::<Decimal>() {
            tokens.push(value);
        }
    }

    tokens
}

/// Finds the first directly stated discount figure: `"25% off"`,
/// `"Save 25%"`, `"save up to 40%"` or `"-25%"`. Values above 100 are ignored.
#[must_use]
pub fn parse_discount_percent(text: &str) -> Option<u32> {
    DISCOUNT_RE.captures_iter(text).find_map(|caps| {
        ["off", "save", "minus"]
            .iter()
            .find_map(|name| caps.name(name))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|percent| *percent <= 100)
    })
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
