//! Filtered, sorted views of the catalog.
//!
//! [`view`] is a pure function of (catalog, search text, sort mode). It does
//! no I/O, so it can run on every keystroke.

mod collation;

pub use collation::CollationKey;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::models::Product;

/// Ordering applied to search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Catalog order.
    #[default]
    Default,
    /// Most recently created first.
    Newest,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Alphabetical by name, in Vietnamese order.
    NameAsc,
}

/// Error returned when a sort mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode: {0}")]
pub struct SortModeParseError(pub String);

impl SortMode {
    /// All modes, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Default,
        Self::Newest,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::NameAsc,
    ];

    /// Wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Newest => "newest",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::NameAsc => "name-asc",
        }
    }

    /// Parse a request parameter, treating unknown names as `Default`.
    #[must_use]
    pub fn from_param(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = SortModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| SortModeParseError(s.to_owned()))
    }
}

/// Filter and sort the catalog.
///
/// `search` is trimmed and matched case-insensitively as a substring of each
/// product's name or description; an empty search matches everything. The
/// sort is stable, so products that compare equal keep their catalog order.
#[must_use]
pub fn view<'a>(catalog: &'a Catalog, search: &str, sort: SortMode) -> Vec<&'a Product> {
    let needle = search.trim().to_lowercase();

    let mut results: Vec<&Product> = catalog.iter().filter(|p| p.matches(&needle)).collect();
    match sort {
        SortMode::Default => {}
        SortMode::Newest => results.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortMode::PriceAsc => results.sort_by_key(|p| p.price),
        SortMode::PriceDesc => results.sort_by(|a, b| b.price.cmp(&a.price)),
        SortMode::NameAsc => results.sort_by_cached_key(|p| CollationKey::new(&p.name)),
    }
    results
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, Utc};

    use vitrine_core::{Price, ProductId};

    use super::*;
    use crate::catalog::demo_catalog;

    fn product(name: &str, price: u64, hours_ago: i64) -> Product {
        Product {
            id: ProductId::generate(),
            name: name.to_owned(),
            price: Price::from_minor(price),
            description: format!("{name} description"),
            image_url: "https://img".to_owned(),
            is_new: false,
            created_at: Utc::now() - Duration::hours(hours_ago),
        }
    }

    fn names(results: &[&Product]) -> Vec<String> {
        results.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_empty_search_default_sort_returns_catalog_order() {
        let catalog = demo_catalog(Utc::now());
        let results = view(&catalog, "", SortMode::Default);
        let expected: Vec<&Product> = catalog.iter().collect();
        assert_eq!(results, expected);
    }

    #[test]
    fn test_search_matches_name_and_description_case_insensitively() {
        let catalog = demo_catalog(Utc::now());

        let by_name = view(&catalog, "  UI KIT ", SortMode::Default);
        assert_eq!(names(&by_name), vec!["UI Kit Premium"]);

        let by_description = view(&catalog, "svg", SortMode::Default);
        assert_eq!(names(&by_description), vec!["Icon Pack (SVG)"]);

        assert!(view(&catalog, "no such thing", SortMode::Default).is_empty());
    }

    #[test]
    fn test_price_sorts() {
        let catalog = Catalog::new(vec![
            product("b ui kit", 300, 1),
            product("a ui kit", 100, 2),
            product("c", 50, 3),
            product("d ui kit", 200, 4),
        ]);

        let asc = view(&catalog, "ui kit", SortMode::PriceAsc);
        assert_eq!(names(&asc), vec!["a ui kit", "d ui kit", "b ui kit"]);

        let desc = view(&catalog, "", SortMode::PriceDesc);
        assert_eq!(names(&desc), vec!["b ui kit", "d ui kit", "a ui kit", "c"]);
    }

    #[test]
    fn test_newest_sort() {
        let catalog = Catalog::new(vec![
            product("old", 1, 50),
            product("newest", 1, 1),
            product("mid", 1, 10),
        ]);
        let results = view(&catalog, "", SortMode::Newest);
        assert_eq!(names(&results), vec!["newest", "mid", "old"]);
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let catalog = Catalog::new(vec![
            product("banana", 1, 1),
            product("Cherry", 1, 1),
            product("apple", 1, 1),
        ]);
        let results = view(&catalog, "", SortMode::NameAsc);
        assert_eq!(names(&results), vec!["apple", "banana", "Cherry"]);
    }

    #[test]
    fn test_name_sort_follows_vietnamese_order() {
        let catalog = Catalog::new(vec![
            product("Zebra", 1, 1),
            product("Đèn bàn", 1, 1),
            product("Ánh sáng", 1, 1),
            product("Bút chì", 1, 1),
            product("Éclair", 1, 1),
        ]);
        let results = view(&catalog, "", SortMode::NameAsc);
        assert_eq!(
            names(&results),
            vec!["Ánh sáng", "Bút chì", "Đèn bàn", "Éclair", "Zebra"]
        );
    }

    #[test]
    fn test_sort_is_stable() {
        let catalog = Catalog::new(vec![
            product("first", 100, 1),
            product("cheap", 50, 1),
            product("second", 100, 1),
            product("third", 100, 1),
        ]);
        let results = view(&catalog, "", SortMode::PriceAsc);
        assert_eq!(names(&results), vec!["cheap", "first", "second", "third"]);
    }

    #[test]
    fn test_sort_mode_parsing() {
        assert_eq!("price-asc".parse::<SortMode>().unwrap(), SortMode::PriceAsc);
        assert_eq!("NAME-ASC".parse::<SortMode>().unwrap(), SortMode::NameAsc);
        assert!("cheapest".parse::<SortMode>().is_err());
        assert_eq!(SortMode::from_param("cheapest"), SortMode::Default);
        for mode in SortMode::ALL {
            assert_eq!(mode.as_str().parse::<SortMode>().unwrap(), mode);
        }
    }
}
