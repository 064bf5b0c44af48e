use super::*;

fn d(num: i64, scale: u32) -> Decimal {
    Decimal::new(num, scale)
}

// -----------------------------------------------------------------------
// round2 / discount_percent
// -----------------------------------------------------------------------

#[test]
fn round2_rounds_half_up() {
    assert_eq!(round2(d(39_985, 3)), d(3999, 2));
    assert_eq!(round2(d(39_984, 3)), d(3998, 2));
}

#[test]
fn round2_leaves_two_place_values_alone() {
    assert_eq!(round2(d(8400, 2)), d(8400, 2));
}

#[test]
fn discount_percent_thirty_percent() {
    assert_eq!(discount_percent(d(12000, 2), d(8400, 2)), Some(30));
}

#[test]
fn discount_percent_rounds_half_up() {
    // 12.5% → 13
    assert_eq!(discount_percent(d(80, 0), d(70, 0)), Some(13));
}

#[test]
fn discount_percent_large_discount() {
    // 199.99 → 1.99 is 99.005% off
    assert_eq!(discount_percent(d(19_999, 2), d(199, 2)), Some(99));
}

#[test]
fn discount_percent_zero_original_is_none() {
    assert_eq!(discount_percent(Decimal::ZERO, d(5, 0)), None);
}

// -----------------------------------------------------------------------
// parse_amount
// -----------------------------------------------------------------------

#[test]
fn parse_amount_plain() {
    assert_eq!(parse_amount("19.99"), Some(d(1999, 2)));
}

#[test]
fn parse_amount_with_symbol_and_separator() {
    assert_eq!(parse_amount(" $1,299.00 "), Some(d(129_900, 2)));
}

#[test]
fn parse_amount_integer() {
    assert_eq!(parse_amount("84"), Some(d(84, 0)));
}

#[test]
fn parse_amount_rejects_text() {
    assert!(parse_amount("free").is_none());
    assert!(parse_amount("").is_none());
}

// -----------------------------------------------------------------------
// scan_price_tokens
// -----------------------------------------------------------------------

#[test]
fn scan_finds_symbol_prices_in_order() {
    let tokens = scan_price_tokens("Was $120.00 now $84.00");
    assert_eq!(tokens, vec![d(12000, 2), d(8400, 2)]);
}

#[test]
fn scan_accepts_symbol_without_cents() {
    assert_eq!(scan_price_tokens("Only $45 today"), vec![d(45, 0)]);
}

#[test]
fn scan_accepts_cents_without_symbol() {
    assert_eq!(scan_price_tokens("Price 45.99"), vec![d(4599, 2)]);
}

#[test]
fn scan_handles_thousands_separators() {
    assert_eq!(scan_price_tokens("$1,999.99"), vec![d(199_999, 2)]);
}

#[test]
fn scan_skips_percentages() {
    assert_eq!(
        scan_price_tokens("30% off, was $50.00"),
        vec![d(5000, 2)]
    );
    assert!(scan_price_tokens("12.50 %").is_empty());
}

#[test]
fn scan_skips_bare_integers() {
    assert!(scan_price_tokens("Model 2024 size 10").is_empty());
}

#[test]
fn scan_skips_non_cent_fractions() {
    assert!(scan_price_tokens("Size 10.5 / rated 4.125").is_empty());
}

#[test]
fn scan_accepts_other_currency_symbols() {
    assert_eq!(scan_price_tokens("£ 30.00"), vec![d(3000, 2)]);
}

#[test]
fn scan_empty_text_returns_nothing() {
    assert!(scan_price_tokens("").is_empty());
}

// -----------------------------------------------------------------------
// parse_discount_percent
// -----------------------------------------------------------------------

#[test]
fn discount_percent_off() {
    assert_eq!(parse_discount_percent("Extra 25% OFF sitewide"), Some(25));
}

#[test]
fn discount_percent_off_with_space() {
    assert_eq!(parse_discount_percent("40 % off"), Some(40));
}

#[test]
fn discount_save_prefix() {
    assert_eq!(parse_discount_percent("Save 15% today"), Some(15));
    assert_eq!(parse_discount_percent("save up to 60%"), Some(60));
}

#[test]
fn discount_minus_badge() {
    assert_eq!(parse_discount_percent("-30%"), Some(30));
    assert_eq!(parse_discount_percent("Deal -20 %"), Some(20));
}

#[test]
fn discount_ignores_hyphenated_words() {
    assert!(parse_discount_percent("cotton-50% blend").is_none());
}

#[test]
fn discount_ignores_plain_percentages() {
    assert!(parse_discount_percent("100% cotton").is_none());
}

#[test]
fn discount_ignores_values_above_one_hundred() {
    assert!(parse_discount_percent("150% off").is_none());
}
