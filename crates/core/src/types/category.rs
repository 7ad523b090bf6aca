//! Catalog categories and the listing filter built on them.
//!
//! The catalog API names categories with free-form strings
//! (`"men's clothing"`, `"jewelery"`, ...). They are parsed once into the
//! closed [`Category`] enum so the rest of the code never compares strings.
//! [`CategoryFilter::All`] is the explicit "no filter" selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A product category as published by the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "men's clothing")]
    MensClothing,
    #[serde(rename = "women's clothing")]
    WomensClothing,
    #[serde(rename = "jewelery")]
    Jewelery,
    #[serde(rename = "electronics")]
    Electronics,
}

/// Error returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct ParseCategoryError(pub String);

impl Category {
    /// All categories, in the order the listing shows their filter buttons.
    pub const ALL: [Self; 4] = [
        Self::MensClothing,
        Self::WomensClothing,
        Self::Jewelery,
        Self::Electronics,
    ];

    /// The name the catalog API uses for this category.
    #[must_use]
    pub const fn api_name(self) -> &'static str {
        match self {
            Self::MensClothing => "men's clothing",
            Self::WomensClothing => "women's clothing",
            Self::Jewelery => "jewelery",
            Self::Electronics => "electronics",
        }
    }

    /// Human-readable label for filter buttons.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MensClothing => "Men's Clothing",
            Self::WomensClothing => "Women's Clothing",
            Self::Jewelery => "Jewelery",
            Self::Electronics => "Electronics",
        }
    }

    /// URL-safe identifier used in query strings.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::MensClothing => "men",
            Self::WomensClothing => "women",
            Self::Jewelery => "jewelery",
            Self::Electronics => "electronics",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    /// Accepts the API name, the slug or the label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| {
                needle.eq_ignore_ascii_case(c.api_name())
                    || needle.eq_ignore_ascii_case(c.slug())
                    || needle.eq_ignore_ascii_case(c.label())
            })
            .ok_or_else(|| ParseCategoryError(needle.to_string()))
    }
}

/// The category selection of a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// No filter: every product is shown.
    #[default]
    All,
    /// Only products of the given category are shown.
    Only(Category),
}

impl CategoryFilter {
    /// Every selectable filter, `All` first.
    #[must_use]
    pub fn options() -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(Category::ALL.into_iter().map(Self::Only))
            .collect()
    }

    /// Whether a product with the given category passes this filter.
    ///
    /// Products without a recognised category only pass `All`.
    #[must_use]
    pub fn matches(self, category: Option<Category>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => category == Some(wanted),
        }
    }

    /// Button label (`All`, `Men's Clothing`, ...).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(category) => category.label(),
        }
    }

    /// Query-string value (`all`, `men`, ...).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(category) => category.slug(),
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        Self::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_api_name_slug_and_label() {
        assert_eq!("men's clothing".parse::<Category>().unwrap(), Category::MensClothing);
        assert_eq!("women".parse::<Category>().unwrap(), Category::WomensClothing);
        assert_eq!("Electronics".parse::<Category>().unwrap(), Category::Electronics);
        assert_eq!(" JEWELERY ".parse::<Category>().unwrap(), Category::Jewelery);
    }

    #[test]
    fn test_parse_unknown_category() {
        let err = "furniture".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: furniture");
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "electronics".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Electronics)
        );
        assert!("shoes".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches(None));
        assert!(CategoryFilter::All.matches(Some(Category::Jewelery)));

        let only = CategoryFilter::Only(Category::Jewelery);
        assert!(only.matches(Some(Category::Jewelery)));
        assert!(!only.matches(Some(Category::Electronics)));
        assert!(!only.matches(None));
    }

    #[test]
    fn test_filter_options_start_with_all() {
        let options = CategoryFilter::options();
        assert_eq!(options.len(), 5);
        assert_eq!(options.first(), Some(&CategoryFilter::All));
    }

    #[test]
    fn test_slug_roundtrip() {
        for filter in CategoryFilter::options() {
            assert_eq!(filter.slug().parse::<CategoryFilter>().unwrap(), filter);
        }
    }
}
