//! Keyword classification of product names into the closed [`Category`]
//! taxonomy.

use dealsdb_core::{Category, CategoryKeywords};

/// Classifies `name` by whole-word keyword match.
///
/// Keyword sets are checked shoes, accessories, clothing; the first set with
/// a match wins. Matching is case-insensitive, tolerates a plural `s`/`es`
/// on the name's word, and multi-word keywords (`"t-shirt"`, `"flip flop"`)
/// must appear as consecutive words. Falls back to `default` when nothing
/// matches.
#[must_use]
pub fn categorize(name: &str, keywords: &CategoryKeywords, default: Category) -> Category {
    let words = split_words(name);

    for (category, set) in keywords.ordered() {
        if set.iter().any(|keyword| contains_keyword(&words, keyword)) {
            return category;
        }
    }

    default
}

fn split_words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn contains_keyword(words: &[String], keyword: &str) -> bool {
    let needle = split_words(keyword);
    let Some((last, leading)) = needle.split_last() else {
        return false;
    };

    words.windows(needle.len()).any(|window| {
        let Some((window_last, window_leading)) = window.split_last() else {
            return false;
        };
        window_leading == leading && matches_plural(window_last, last)
    })
}

fn matches_plural(word: &str, keyword: &str) -> bool {
    word == keyword
        || word
            .strip_prefix(keyword)
            .is_some_and(|suffix| suffix == "s" || suffix == "es")
}
