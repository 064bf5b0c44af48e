//! Field extraction from a [`RawContainer`]: name, brand, and the merged set
//! of candidate price tokens.
//!
//! Every rule here is an ordered-preference search over what the collector
//! handed over; nothing is fetched or inferred from outside the container.

use dealsdb_core::{PipelineConfig, PriceHint, RawContainer};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ExtractionFailure;
use crate::parse::{round2, scan_price_tokens};

const MIN_NAME_CHARS: usize = 3;
const MAX_NAME_CHARS: usize = 200;
const CURRENCY_SYMBOLS: [char; 4] = ['$', '£', '€', '¥'];

/// Brand used when neither the collector nor the lexicon can supply one.
pub const UNKNOWN_BRAND: &str = "Unknown";

/// Output of the field extractor, input to the price resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedFields {
    pub name: String,
    pub brand: String,
    /// Hints first (in collector order), then text-scanned tokens; one entry
    /// per distinct value, all within `(0, price_ceiling]`.
    pub price_tokens: Vec<PriceHint>,
    pub explicit_discount_percent: Option<u32>,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
}

/// Extracts candidate fields from one container.
///
/// # Errors
///
/// Returns [`ExtractionFailure::NoValidName`] if no candidate name qualifies.
pub fn extract(
    container: &RawContainer,
    config: &PipelineConfig,
) -> Result<ExtractedFields, ExtractionFailure> {
    let name = resolve_name(&container.candidate_names).ok_or(ExtractionFailure::NoValidName)?;
    let brand = resolve_brand(container.candidate_brand.as_deref(), &name, &config.lexicon.brands);
    let price_tokens = collect_price_tokens(
        &container.price_hints,
        &container.text_content,
        config.price_ceiling,
    );

    Ok(ExtractedFields {
        name,
        brand,
        price_tokens,
        explicit_discount_percent: container.explicit_discount_percent,
        image_url: non_blank(container.image_url.as_deref()),
        product_url: non_blank(container.product_url.as_deref()),
    })
}

/// First candidate that, once trimmed, is 3–200 characters, does not open
/// with a currency symbol, and is not just digits and percent signs. Inner
/// whitespace is kept as the collector supplied it.
fn resolve_name(candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .map(|raw| raw.trim())
        .find(|name| is_valid_name(name))
        .map(str::to_string)
}

fn is_valid_name(name: &str) -> bool {
    let char_count = name.chars().count();
    if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&char_count) {
        return false;
    }
    if name.starts_with(CURRENCY_SYMBOLS) {
        return false;
    }
    let numeric_only = name
        .chars()
        .all(|c| c.is_ascii_digit() || c == '%' || c == '.' || c == ',' || c.is_whitespace());
    !numeric_only
}

fn resolve_brand(candidate: Option<&str>, name: &str, known_brands: &[String]) -> String {
    if let Some(brand) = candidate.map(collapse_whitespace) {
        if !brand.is_empty() {
            return brand;
        }
    }

    brand_from_prefix(name, known_brands).unwrap_or_else(|| UNKNOWN_BRAND.to_string())
}

/// Longest lexicon brand that prefixes `name` on a word boundary, compared
/// case-insensitively. Returns the lexicon's spelling.
fn brand_from_prefix(name: &str, known_brands: &[String]) -> Option<String> {
    let mut by_length: Vec<&String> = known_brands
        .iter()
        .filter(|b| !b.trim().is_empty())
        .collect();
    by_length.sort_by_key(|b| std::cmp::Reverse(b.chars().count()));

    by_length.into_iter().find_map(|brand| {
        let brand = brand.trim();
        let rest = strip_prefix_ignore_case(name, brand)?;
        let on_boundary = !rest.chars().next().is_some_and(char::is_alphanumeric);
        on_boundary.then(|| brand.to_string())
    })
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let mut text_chars = text.char_indices();
    for expected in prefix.chars() {
        let (_, actual) = text_chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    let rest_start = text_chars.next().map_or(text.len(), |(idx, _)| idx);
    Some(&text[rest_start..])
}

/// Merges labeled hints with amounts scanned from text, deduplicated by
/// value. A hint keeps its role; a text token only survives if no hint (or
/// earlier token) already holds that value. A labeled duplicate upgrades an
/// unlabeled token already holding its value; between two labels the first
/// wins.
fn collect_price_tokens(hints: &[PriceHint], text: &str, ceiling: Decimal) -> Vec<PriceHint> {
    let in_range = |amount: &Decimal| *amount > Decimal::ZERO && *amount <= ceiling;

    let from_hints = hints
        .iter()
        .map(|hint| PriceHint::new(hint.role, round2(hint.amount)));
    let from_text = scan_price_tokens(text)
        .into_iter()
        .map(|amount| PriceHint::unlabeled(round2(amount)));

    let mut tokens: Vec<PriceHint> = Vec::new();
    for token in from_hints.chain(from_text) {
        if !in_range(&token.amount) {
            tracing::trace!(amount = %token.amount, role = %token.role, "discarding out-of-range price token");
            continue;
        }
        match tokens.iter_mut().find(|t| t.amount == token.amount) {
            Some(existing) if !existing.is_labeled() => existing.role = token.role,
            Some(_) => {}
            None => tokens.push(token),
        }
    }
    tokens
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
