//! Search and price-tier matching.
//!
//! Visibility is derived, never stored on the records: a product is visible
//! iff it matches both the search query and the price tier.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, ValueObject};

use crate::product::{Catalog, CategoryCard, ProductIndex, ProductRecord, fold_case};
use crate::view::ViewState;

/// Upper bound (inclusive) of the budget tier.
pub const BUDGET_MAX: f64 = 170.0;
/// Upper bound (inclusive) of the standard tier.
pub const STANDARD_MAX: f64 = 300.0;

/// Coarse price bucket selected in the filter dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    #[default]
    All,
    /// price <= 170
    Budget,
    /// 170 < price <= 300
    Standard,
    /// price > 300
    Premium,
}

impl ValueObject for PriceTier {}

impl PriceTier {
    /// Select value as used by the page.
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::All => "all",
            PriceTier::Budget => "budget",
            PriceTier::Standard => "standard",
            PriceTier::Premium => "premium",
        }
    }

    /// The specific tier a finite price falls in. `None` for non-finite input.
    pub fn for_price(price: f64) -> Option<PriceTier> {
        if !price.is_finite() {
            return None;
        }
        Some(if price <= BUDGET_MAX {
            PriceTier::Budget
        } else if price <= STANDARD_MAX {
            PriceTier::Standard
        } else {
            PriceTier::Premium
        })
    }
}

impl FromStr for PriceTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(PriceTier::All),
            "budget" => Ok(PriceTier::Budget),
            "standard" => Ok(PriceTier::Standard),
            "premium" => Ok(PriceTier::Premium),
            _ => Err(DomainError::invalid_selection("price tier", s)),
        }
    }
}

impl core::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive substring match on name, detail and packaging.
///
/// Both sides are compared under Unicode default case folding, so `ß`
/// and `SS` are the same query. The query is trimmed first; an empty
/// query matches every record.
pub fn matches(record: &ProductRecord, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || record.search_text().contains(&fold_case(query))
}

/// Price-tier match. Unknown prices only ever match [`PriceTier::All`].
pub fn matches_tier(record: &ProductRecord, tier: PriceTier) -> bool {
    match tier {
        PriceTier::All => true,
        specific => record
            .price()
            .value()
            .and_then(PriceTier::for_price)
            .is_some_and(|t| t == specific),
    }
}

/// Category cards match on their title only.
pub fn matches_category(card: &CategoryCard, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || card.title_key().contains(&fold_case(query))
}

/// Entries visible under a given view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
    products: Vec<bool>,
    categories: Vec<bool>,
    count: usize,
}

impl VisibleSet {
    pub fn is_product_visible(&self, index: ProductIndex) -> bool {
        self.products.get(index.0).copied().unwrap_or(false)
    }

    pub fn is_category_visible(&self, position: usize) -> bool {
        self.categories.get(position).copied().unwrap_or(false)
    }

    /// Visible products and categories together.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn product_count(&self) -> usize {
        self.products.iter().filter(|v| **v).count()
    }

    pub fn visible_products(&self) -> impl Iterator<Item = ProductIndex> + '_ {
        self.products
            .iter()
            .enumerate()
            .filter(|(_, visible)| **visible)
            .map(|(i, _)| ProductIndex(i))
    }
}

/// Full recompute of visibility over every entry in the catalog.
///
/// Price tier and sort mode never affect category cards.
pub fn apply_filters(state: &ViewState, catalog: &Catalog) -> VisibleSet {
    let query = state.search_query();
    let tier = state.price_tier();

    let products: Vec<bool> = catalog
        .products()
        .iter()
        .map(|r| matches(r, query) && matches_tier(r, tier))
        .collect();
    let categories: Vec<bool> = catalog
        .categories()
        .iter()
        .map(|c| matches_category(c, query))
        .collect();
    let count = products.iter().chain(categories.iter()).filter(|v| **v).count();

    VisibleSet {
        products,
        categories,
        count,
    }
}
