use dealsdb_core::Category;
use rust_decimal::Decimal;
use serde_json::json;

use super::*;

const SHOP_URL: &str = "https://shop.example.com/collections/all";

fn feed(body: &serde_json::Value) -> ShopifyFeed {
    ShopifyFeed::from_json(
        Source::new("example-shop", Category::Shoes),
        SHOP_URL,
        &body.to_string(),
    )
    .unwrap()
}

fn product(variants: serde_json::Value) -> serde_json::Value {
    json!({
        "id": 6_789_012_345_678_i64,
        "title": "Trail Runner 2",
        "handle": "trail-runner-2",
        "vendor": "Northpeak",
        "body_html": "<p>Grippy <strong>outsole</strong>.</p>",
        "image": {"src": "https://cdn.example.com/trail.jpg", "alt": "Trail Runner 2 in slate"},
        "images": [],
        "variants": variants
    })
}

// ---------------------------------------------------------------------------
// store_origin
// ---------------------------------------------------------------------------

#[test]
fn store_origin_drops_path() {
    assert_eq!(store_origin(SHOP_URL).unwrap(), "https://shop.example.com");
}

#[test]
fn store_origin_keeps_port_and_lowercases_scheme() {
    assert_eq!(
        store_origin("HTTP://localhost:8080?page=2").unwrap(),
        "http://localhost:8080"
    );
}

#[test]
fn store_origin_drops_userinfo_default_port_and_host_case() {
    assert_eq!(
        store_origin("https://user:pw@Shop.Example.com:443/collections/all").unwrap(),
        "https://shop.example.com"
    );
}

#[test]
fn store_origin_rejects_missing_scheme() {
    let err = store_origin("shop.example.com").unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidShopUrl { ref shop_url, .. } if shop_url == "shop.example.com"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn store_origin_rejects_other_schemes() {
    let err = store_origin("ftp://shop.example.com").unwrap_err();
    assert!(
        matches!(err, ScraperError::InvalidShopUrl { ref reason, .. } if reason.contains("ftp")),
        "unexpected error: {err:?}"
    );
}

#[test]
fn store_origin_rejects_empty_host() {
    assert!(matches!(
        store_origin("https://"),
        Err(ScraperError::InvalidShopUrl { .. })
    ));
}

// ---------------------------------------------------------------------------
// from_json
// ---------------------------------------------------------------------------

#[test]
fn from_json_requires_products_array() {
    let err = ShopifyFeed::from_json(
        Source::new("example-shop", Category::Shoes),
        SHOP_URL,
        r#"{"items": []}"#,
    )
    .unwrap_err();
    assert!(
        matches!(err, ScraperError::Deserialize { ref context, .. } if context.contains("products.json")),
        "unexpected error: {err:?}"
    );
}

#[test]
fn from_json_validates_url_before_body() {
    let err = ShopifyFeed::from_json(
        Source::new("example-shop", Category::Shoes),
        "not a url",
        "garbage",
    )
    .unwrap_err();
    assert!(matches!(err, ScraperError::InvalidShopUrl { .. }));
}

// ---------------------------------------------------------------------------
// collect
// ---------------------------------------------------------------------------

#[test]
fn compare_at_price_becomes_original_hint() {
    let body = json!({"products": [product(json!([
        {"title": "Default Title", "price": "84.00", "compare_at_price": "120.00", "position": 1}
    ]))]});

    let containers = feed(&body).collect().unwrap();
    assert_eq!(containers.len(), 1);

    let c = &containers[0];
    assert_eq!(
        c.price_hints,
        vec![
            PriceHint::new(PriceRole::Original, Decimal::new(12000, 2)),
            PriceHint::new(PriceRole::Sale, Decimal::new(8400, 2)),
        ]
    );
    assert_eq!(c.candidate_brand.as_deref(), Some("Northpeak"));
    assert_eq!(
        c.candidate_names,
        vec!["Trail Runner 2".to_string(), "Trail Runner 2 in slate".to_string()]
    );
    assert_eq!(
        c.product_url.as_deref(),
        Some("https://shop.example.com/products/trail-runner-2")
    );
    assert_eq!(
        c.image_url.as_deref(),
        Some("https://cdn.example.com/trail.jpg")
    );
}

#[test]
fn null_compare_at_price_gives_only_sale_hint() {
    let body = json!({"products": [product(json!([
        {"title": "Default Title", "price": "84.00", "compare_at_price": null, "position": 1}
    ]))]});

    let containers = feed(&body).collect().unwrap();
    assert_eq!(
        containers[0].price_hints,
        vec![PriceHint::new(PriceRole::Sale, Decimal::new(8400, 2))]
    );
}

#[test]
fn position_one_variant_wins_over_first() {
    let body = json!({"products": [product(json!([
        {"title": "Size 12", "price": "50.00", "compare_at_price": "200.00", "position": 2},
        {"title": "Size 9", "price": "84.00", "compare_at_price": "120.00", "position": 1}
    ]))]});

    let containers = feed(&body).collect().unwrap();
    let c = &containers[0];
    assert!(c
        .price_hints
        .contains(&PriceHint::new(PriceRole::Sale, Decimal::new(8400, 2))));
    assert!(c.text_content.ends_with("Size 9"));
    assert!(!c.text_content.contains("Size 12"));
}

#[test]
fn first_variant_used_without_positions() {
    let body = json!({"products": [product(json!([
        {"title": "Small", "price": "30.00"},
        {"title": "Large", "price": "35.00"}
    ]))]});

    let containers = feed(&body).collect().unwrap();
    assert_eq!(
        containers[0].price_hints,
        vec![PriceHint::new(PriceRole::Sale, Decimal::new(3000, 2))]
    );
}

#[test]
fn other_variant_prices_stay_out_of_text() {
    let body = json!({"products": [product(json!([
        {"title": "Default Title", "price": "84.00", "position": 1},
        {"title": "Bundle", "price": "150.00", "position": 2}
    ]))]});

    let containers = feed(&body).collect().unwrap();
    assert!(!containers[0].text_content.contains("150.00"));
}

#[test]
fn html_tags_are_stripped_from_text() {
    let body = json!({"products": [product(json!([
        {"title": "Default Title", "price": "84.00", "position": 1}
    ]))]});

    let containers = feed(&body).collect().unwrap();
    let text = &containers[0].text_content;
    assert!(text.contains("Grippy outsole ."), "text was {text:?}");
    assert!(!text.contains('<'));
}

#[test]
fn stated_discount_is_read_from_description() {
    let mut raw = product(json!([
        {"title": "Default Title", "price": "84.00", "position": 1}
    ]));
    raw["body_html"] = json!("<p><em>Save 30%</em> this week only</p>");
    let body = json!({"products": [raw]});

    let containers = feed(&body).collect().unwrap();
    assert_eq!(containers[0].explicit_discount_percent, Some(30));
}

#[test]
fn gallery_image_stands_in_for_missing_primary() {
    let mut raw = product(json!([
        {"title": "Default Title", "price": "84.00", "position": 1}
    ]));
    raw["image"] = serde_json::Value::Null;
    raw["images"] = json!([{"src": "https://cdn.example.com/side.jpg"}]);
    let body = json!({"products": [raw]});

    let containers = feed(&body).collect().unwrap();
    assert_eq!(
        containers[0].image_url.as_deref(),
        Some("https://cdn.example.com/side.jpg")
    );
    assert_eq!(containers[0].candidate_names, vec!["Trail Runner 2".to_string()]);
}

#[test]
fn products_without_variants_are_skipped() {
    let body = json!({"products": [
        product(json!([])),
        product(json!([{"title": "Default Title", "price": "84.00", "position": 1}]))
    ]});

    assert_eq!(feed(&body).collect().unwrap().len(), 1);
}

#[test]
fn malformed_products_are_skipped() {
    let body = json!({"products": [
        {"id": 1, "handle": "no-title"},
        "not an object",
        product(json!([{"title": "Default Title", "price": "84.00", "position": 1}]))
    ]});

    let containers = feed(&body).collect().unwrap();
    assert_eq!(containers.len(), 1);
    assert_eq!(containers[0].candidate_names[0], "Trail Runner 2");
}

#[test]
fn empty_feed_collects_nothing() {
    let body = json!({"products": []});
    assert!(feed(&body).collect().unwrap().is_empty());
}

#[test]
fn feed_reports_its_source() {
    let body = json!({"products": []});
    let feed = feed(&body);
    assert_eq!(feed.source().id, "example-shop");
    assert_eq!(feed.source().default_category, Category::Shoes);
}
