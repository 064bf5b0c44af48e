//! Adapter from a Shopify storefront `products.json` payload to raw
//! containers.
//!
//! ## Observed shape
//!
//! ### `price` / `compare_at_price`
//! Both are decimal strings on each variant. `compare_at_price` is `null`
//! (not `"0.00"`) when no sale is active, and is the struck-through
//! "compare at" figure when one is, so it maps onto an `original` hint and
//! `price` onto a `sale` hint.
//!
//! ### `vendor`
//! The brand as configured by the store owner. Often the store's own name.
//!
//! ### `position` on variants
//! `1` for the storefront-default variant. Only that variant becomes a
//! container; other variants' prices would otherwise read as discounts.
//!
//! ### `body_html`
//! Raw HTML. Tags are stripped before the text is scanned.

use std::sync::LazyLock;

use dealsdb_core::{PriceHint, PriceRole, RawContainer};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::error::ScraperError;
use crate::parse::{parse_amount, parse_discount_percent};
use crate::pipeline::Source;
use crate::sources::json::flatten_strings;
use crate::sources::Collector;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid tags regex"));

/// A single product from the Shopify storefront.
#[derive(Debug, Deserialize)]
pub struct ShopifyProduct {
    /// Shopify numeric product ID (e.g., `6789012345678`).
    pub id: i64,

    /// Display name of the product.
    pub title: String,

    /// URL slug for the product page.
    pub handle: String,

    /// Vendor / brand name as configured in Shopify.
    #[serde(default)]
    pub vendor: Option<String>,

    /// Primary image object.
    #[serde(default)]
    pub image: Option<ShopifyImage>,

    /// Full image gallery; the first entry stands in when `image` is absent.
    #[serde(default)]
    pub images: Vec<ShopifyImage>,

    /// All purchasable variants for this product.
    #[serde(default)]
    pub variants: Vec<ShopifyVariant>,
}

/// A single purchasable variant of a [`ShopifyProduct`].
#[derive(Debug, Deserialize)]
pub struct ShopifyVariant {
    /// Display title, e.g. `"Size 9 / Black"` or `"Default Title"`.
    pub title: String,

    /// Current price as a decimal string (e.g., `"84.00"`).
    pub price: String,

    /// Pre-sale comparison price, or `null` when not on sale.
    #[serde(default)]
    pub compare_at_price: Option<String>,

    /// 1-based position; `1` is the storefront-default variant.
    #[serde(default)]
    pub position: Option<i32>,
}

/// A product image.
#[derive(Debug, Deserialize)]
pub struct ShopifyImage {
    /// Canonical CDN URL.
    pub src: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Top-level `products.json` body. Products stay as raw JSON until
/// collection so their string fields can be flattened into text.
#[derive(Deserialize)]
struct ProductsEnvelope {
    products: Vec<Value>,
}

/// A `products.json` response held by a collector, exposed as a [`Collector`].
#[derive(Debug, Clone)]
pub struct ShopifyFeed {
    source: Source,
    store_origin: String,
    products: Vec<Value>,
}

impl ShopifyFeed {
    /// Parses a `products.json` body fetched from `shop_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidShopUrl`] if `shop_url` has no
    /// `http(s)://host` origin, or [`ScraperError::Deserialize`] if the body
    /// has no `products` array.
    pub fn from_json(source: Source, shop_url: &str, json: &str) -> Result<Self, ScraperError> {
        let store_origin = store_origin(shop_url)?;

        let envelope: ProductsEnvelope =
            serde_json::from_str(json).map_err(|source| ScraperError::Deserialize {
                context: format!("{shop_url} products.json"),
                source,
            })?;

        Ok(Self {
            source,
            store_origin,
            products: envelope.products,
        })
    }
}

impl Collector for ShopifyFeed {
    fn source(&self) -> &Source {
        &self.source
    }

    fn collect(&self) -> Result<Vec<RawContainer>, ScraperError> {
        let mut containers = Vec::with_capacity(self.products.len());

        for raw in &self.products {
            let product = match ShopifyProduct::deserialize(raw) {
                Ok(product) => product,
                Err(error) => {
                    tracing::warn!(
                        source = %self.source.id,
                        %error,
                        "skipping malformed shopify product"
                    );
                    continue;
                }
            };

            match container_from_product(&product, raw, &self.store_origin) {
                Some(container) => containers.push(container),
                None => tracing::warn!(
                    source = %self.source.id,
                    product_id = product.id,
                    "skipping shopify product with no variants"
                ),
            }
        }

        Ok(containers)
    }
}

/// Builds a container from a product's default variant.
///
/// Returns `None` when the product has no variants.
fn container_from_product(
    product: &ShopifyProduct,
    raw: &Value,
    store_origin: &str,
) -> Option<RawContainer> {
    let variant = default_variant(&product.variants)?;

    let mut price_hints = Vec::with_capacity(2);
    if let Some(original) = variant.compare_at_price.as_deref().and_then(parse_amount) {
        price_hints.push(PriceHint::new(PriceRole::Original, original));
    }
    if let Some(sale) = parse_amount(&variant.price) {
        price_hints.push(PriceHint::new(PriceRole::Sale, sale));
    }

    let text_content = product_text(raw, &variant.title);
    let image = product.image.as_ref().or_else(|| product.images.first());

    let mut candidate_names = vec![product.title.clone()];
    if let Some(alt) = image.and_then(|i| i.alt.clone()) {
        candidate_names.push(alt);
    }

    Some(RawContainer {
        explicit_discount_percent: parse_discount_percent(&text_content),
        text_content,
        candidate_names,
        candidate_brand: product.vendor.clone(),
        price_hints,
        image_url: image.map(|i| i.src.clone()),
        product_url: Some(format!("{store_origin}/products/{}", product.handle)),
    })
}

/// The position-1 variant is the storefront default. If no position data
/// exists, fall back to the first variant by index.
fn default_variant(variants: &[ShopifyVariant]) -> Option<&ShopifyVariant> {
    variants
        .iter()
        .find(|v| v.position == Some(1))
        .or_else(|| variants.first())
}

/// Visible text for one product: every product-level string plus the
/// default variant's title. Other variants are left out so their prices
/// cannot pose as a compare-at price.
fn product_text(raw: &Value, variant_title: &str) -> String {
    let product_level = match raw {
        Value::Object(map) => {
            let mut map = map.clone();
            map.remove("variants");
            map.remove("images");
            map.remove("image");
            flatten_strings(&Value::Object(map))
        }
        other => flatten_strings(other),
    };

    let stripped = TAG_RE.replace_all(&product_level, " ");
    let mut text = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if !variant_title.trim().is_empty() {
        text.push(' ');
        text.push_str(variant_title.trim());
    }
    text
}

/// Extracts the scheme+host origin from a shop URL.
///
/// Given `"https://shop.example.com/collections/all"`, returns
/// `"https://shop.example.com"`. Userinfo and default ports are dropped and
/// the host is lowercased, so every product URL from one store shares a
/// single prefix.
fn store_origin(shop_url: &str) -> Result<String, ScraperError> {
    let invalid = |reason: String| ScraperError::InvalidShopUrl {
        shop_url: shop_url.to_string(),
        reason,
    };

    let url = Url::parse(shop_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!(
            "scheme must be http or https, got {}",
            url.scheme()
        )));
    }

    Ok(url.origin().ascii_serialization())
}

#[cfg(test)]
#[path = "shopify_test.rs"]
mod tests;
