use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::products::Category;
use crate::ConfigError;

const DEFAULT_BRANDS: &[&str] = &[
    "Adidas",
    "Allbirds",
    "Birkenstock",
    "Brooks",
    "Calvin Klein",
    "Clarks",
    "Columbia",
    "Converse",
    "Dr. Martens",
    "Hoka",
    "Levi's",
    "Lululemon",
    "New Balance",
    "Nike",
    "On Running",
    "Patagonia",
    "Puma",
    "Ralph Lauren",
    "Reebok",
    "Salomon",
    "Saucony",
    "Skechers",
    "The North Face",
    "Timberland",
    "Tommy Hilfiger",
    "Ugg",
    "Under Armour",
    "Vans",
];

const DEFAULT_SHOES: &[&str] = &[
    "shoe",
    "sneaker",
    "boot",
    "sandal",
    "heel",
    "loafer",
    "trainer",
    "cleat",
    "slipper",
    "pump",
    "mule",
    "clog",
    "ballet flat",
    "oxford",
    "espadrille",
    "pool slide",
    "moccasin",
];

const DEFAULT_ACCESSORIES: &[&str] = &[
    "bag",
    "backpack",
    "belt",
    "hat",
    "cap",
    "beanie",
    "wallet",
    "sunglasses",
    "scarf",
    "jewelry",
    "necklace",
    "bracelet",
    "earring",
    "ring",
    "watch",
    "glove",
    "tote",
    "purse",
    "sock",
];

const DEFAULT_CLOTHING: &[&str] = &[
    "shirt", "tee", "t-shirt", "pant", "jean", "legging", "dress", "jacket", "coat", "hoodie",
    "sweatshirt", "skirt", "short", "sweater", "cardigan", "vest", "blouse", "top", "jogger",
    "polo", "parka", "romper", "jumpsuit", "bra", "underwear",
];

/// Ordered keyword sets for the three keyword-driven categories. Checked in
/// the order shoes, accessories, clothing; first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    #[serde(default)]
    pub shoes: Vec<String>,
    #[serde(default)]
    pub accessories: Vec<String>,
    #[serde(default)]
    pub clothing: Vec<String>,
}

impl CategoryKeywords {
    /// Keyword sets in match-priority order.
    #[must_use]
    pub fn ordered(&self) -> [(Category, &[String]); 3] {
        [
            (Category::Shoes, self.shoes.as_slice()),
            (Category::Accessories, self.accessories.as_slice()),
            (Category::Clothing, self.clothing.as_slice()),
        ]
    }
}

impl Default for CategoryKeywords {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| (*w).to_string()).collect();
        Self {
            shoes: owned(DEFAULT_SHOES),
            accessories: owned(DEFAULT_ACCESSORIES),
            clothing: owned(DEFAULT_CLOTHING),
        }
    }
}

/// Known brands plus category keyword sets. Loaded once and shared
/// read-only across workers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub categories: CategoryKeywords,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            brands: DEFAULT_BRANDS.iter().map(|b| (*b).to_string()).collect(),
            categories: CategoryKeywords::default(),
        }
    }
}

/// Load and validate a lexicon from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_lexicon(path: &Path) -> Result<Lexicon, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LexiconFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let lexicon: Lexicon = serde_yaml::from_str(&content).map_err(ConfigError::LexiconFileParse)?;

    validate_lexicon(&lexicon)?;

    for (category, keywords) in lexicon.categories.ordered() {
        if keywords.is_empty() {
            tracing::warn!(
                path = %path.display(),
                category = %category,
                "lexicon has no keywords for category; it can only be reached as a default"
            );
        }
    }

    Ok(lexicon)
}

pub(crate) fn validate_lexicon(lexicon: &Lexicon) -> Result<(), ConfigError> {
    let mut seen_brands = HashSet::new();

    for brand in &lexicon.brands {
        if brand.trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand name must be non-empty".to_string(),
            ));
        }

        if !seen_brands.insert(brand.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand name: '{brand}'"
            )));
        }
    }

    let mut owner: HashMap<String, Category> = HashMap::new();

    for (category, keywords) in lexicon.categories.ordered() {
        for keyword in keywords {
            let normalized = keyword.trim().to_lowercase();
            if normalized.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{category} keywords must be non-empty"
                )));
            }

            if let Some(previous) = owner.insert(normalized, category) {
                return Err(ConfigError::Validation(format!(
                    "keyword '{keyword}' listed under both {previous} and {category}"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "lexicon_test.rs"]
mod tests;
