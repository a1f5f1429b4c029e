//! Display ordering of product records.

use core::cmp::Ordering;
use core::str::FromStr;
use std::cell::RefCell;

use feruca::Collator;
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, ValueObject};

use crate::product::ProductRecord;

thread_local! {
    // CLDR root collation; `collate` needs `&mut` for its internal caches.
    static NAME_COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Locale-aware comparison of two case-folded names (`é` sorts with `e`).
fn collate_names(a: &str, b: &str) -> Ordering {
    NAME_COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Original source order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    NameAsc,
}

impl ValueObject for SortMode {}

impl SortMode {
    /// Select value as used by the page.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Default => "default",
            SortMode::PriceAsc => "price-asc",
            SortMode::PriceDesc => "price-desc",
            SortMode::NameAsc => "name-asc",
        }
    }

    /// Ordering between two records under this mode.
    ///
    /// Unknown prices compare as `+inf` in both price directions. Ties fall
    /// back to source position, so every mode is a total order.
    pub fn compare(&self, a: &ProductRecord, b: &ProductRecord) -> Ordering {
        let primary = match self {
            SortMode::Default => Ordering::Equal,
            SortMode::PriceAsc => a.price().sort_key().total_cmp(&b.price().sort_key()),
            SortMode::PriceDesc => b.price().sort_key().total_cmp(&a.price().sort_key()),
            SortMode::NameAsc => collate_names(a.name_key(), b.name_key())
                .then_with(|| a.name().cmp(b.name())),
        };
        primary.then_with(|| a.index().cmp(&b.index()))
    }
}

impl FromStr for SortMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Ok(SortMode::Default),
            "price-asc" => Ok(SortMode::PriceAsc),
            "price-desc" => Ok(SortMode::PriceDesc),
            "name-asc" => Ok(SortMode::NameAsc),
            _ => Err(DomainError::invalid_selection("sort mode", s)),
        }
    }
}

impl core::fmt::Display for SortMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order records under `mode`. Visibility is not consulted.
pub fn sort<'a, I>(records: I, mode: SortMode) -> Vec<&'a ProductRecord>
where
    I: IntoIterator<Item = &'a ProductRecord>,
{
    let mut ordered: Vec<&ProductRecord> = records.into_iter().collect();
    ordered.sort_by(|a, b| mode.compare(a, b));
    ordered
}
