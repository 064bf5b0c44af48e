use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Role a collector could attach to a price from markup semantics
/// (strikethrough styling, `was`/`compare` classes, `sale`/`current` classes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceRole {
    Original,
    Sale,
    Unlabeled,
}

impl std::fmt::Display for PriceRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceRole::Original => write!(f, "original"),
            PriceRole::Sale => write!(f, "sale"),
            PriceRole::Unlabeled => write!(f, "unlabeled"),
        }
    }
}

/// A single price token, optionally labeled with its role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHint {
    pub role: PriceRole,
    pub amount: Decimal,
}

impl PriceHint {
    #[must_use]
    pub fn new(role: PriceRole, amount: Decimal) -> Self {
        Self { role, amount }
    }

    #[must_use]
    pub fn unlabeled(amount: Decimal) -> Self {
        Self::new(PriceRole::Unlabeled, amount)
    }

    #[must_use]
    pub fn is_labeled(&self) -> bool {
        self.role != PriceRole::Unlabeled
    }
}

/// One product card's worth of unnormalized data, as handed over by a
/// collector. For JSON sources `text_content` is the flattened string of all
/// string-valued fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawContainer {
    /// All visible text scoped to the product card.
    #[serde(default)]
    pub text_content: String,
    /// Name-like fields in preference order: title field, ARIA label,
    /// heading, image alt text, link text.
    #[serde(default)]
    pub candidate_names: Vec<String>,
    #[serde(default)]
    pub candidate_brand: Option<String>,
    /// Prices the collector could label from markup, in document order.
    #[serde(default)]
    pub price_hints: Vec<PriceHint>,
    /// A directly stated "N% off" figure.
    #[serde(default)]
    pub explicit_discount_percent: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub product_url: Option<String>,
}

/// Closed product taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Shoes,
    Clothing,
    Accessories,
    Other,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Shoes => "shoes",
            Category::Clothing => "clothing",
            Category::Accessories => "accessories",
            Category::Other => "other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "shoes" => Ok(Category::Shoes),
            "clothing" => Ok(Category::Clothing),
            "accessories" => Ok(Category::Accessories),
            "other" => Ok(Category::Other),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

/// A validated, normalized deal. Built once by the pipeline from exactly one
/// [`RawContainer`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    /// Literal `"Unknown"` when no brand could be determined.
    pub brand: String,
    pub category: Category,
    pub original_price: Decimal,
    pub sale_price: Decimal,
    /// `round(100 * (original - sale) / original)`.
    pub discount_percent: u32,
    pub image_url: Option<String>,
    pub product_url: Option<String>,
    /// Opaque identifier of the originating collector/site.
    pub source_id: String,
}

impl Product {
    /// Key a sink can deduplicate on: the product URL when the collector
    /// supplied one, otherwise `source_id` plus the lowercased name.
    #[must_use]
    pub fn dedup_key(&self) -> String {
        match self.product_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!("{}:{}", self.source_id, self.name.to_lowercase()),
        }
    }

    /// Absolute amount saved, `original_price - sale_price`.
    #[must_use]
    pub fn savings(&self) -> Decimal {
        self.original_price - self.sale_price
    }
}
