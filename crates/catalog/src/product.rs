use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, ValueObject};

/// Label used wherever packaging (or price) is unknown.
pub const NOT_AVAILABLE: &str = "NA";

static PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)price:\s*([0-9][0-9,]*(?:\.[0-9]+)?)").expect("price pattern is valid")
});

static PACKAGING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)packaging:\s*([^\n]+)").expect("packaging pattern is valid")
});

/// Unicode default case folding, so `ß`, `SS` and `ss` all compare equal.
///
/// Locale-specific folds (Turkish dotted/dotless `i`) are not applied.
pub(crate) fn fold_case(text: &str) -> String {
    caseless::default_case_fold_str(text)
}

/// Product identity: position in the source list.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductIndex(pub usize);

impl core::fmt::Display for ProductIndex {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Parsed product price. `None` means the detail text carried no price.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Option<f64>);

impl ValueObject for Price {}

impl Price {
    pub fn known(value: f64) -> Self {
        if value.is_finite() {
            Self(Some(value))
        } else {
            Self(None)
        }
    }

    pub fn unknown() -> Self {
        Self(None)
    }

    /// Extract `price: <number>` (case-insensitive) from free text.
    ///
    /// Thousands separators are accepted (`Price: 1,250`).
    pub fn extract(detail: &str) -> Self {
        PRICE_PATTERN
            .captures(detail)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().replace(',', "").parse::<f64>().ok())
            .map(Self::known)
            .unwrap_or_default()
    }

    pub fn value(&self) -> Option<f64> {
        self.0
    }

    pub fn is_known(&self) -> bool {
        self.0.is_some()
    }

    /// Key used for price ordering: unknown prices sort as `+inf`.
    pub fn sort_key(&self) -> f64 {
        self.0.unwrap_or(f64::INFINITY)
    }
}

/// Packaging label (e.g. `60 caps`, `200ml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Packaging(String);

impl ValueObject for Packaging {}

impl Default for Packaging {
    fn default() -> Self {
        Self(NOT_AVAILABLE.to_string())
    }
}

impl Packaging {
    /// Extract `packaging: <text until newline>` (case-insensitive) from free text.
    pub fn extract(detail: &str) -> Self {
        PACKAGING_PATTERN
            .captures(detail)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|label| !label.is_empty())
            .map(|label| Self(label.to_string()))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        self.0 != NOT_AVAILABLE
    }
}

impl core::fmt::Display for Packaging {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw product entry as supplied by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSource {
    pub name: String,
    #[serde(default)]
    pub detail: String,
}

impl ProductSource {
    pub fn new(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail: detail.into(),
        }
    }
}

/// Raw category card (title only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySource {
    pub title: String,
}

/// Immutable product record with metadata extracted once at load.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    index: ProductIndex,
    name: String,
    detail: String,
    price: Price,
    packaging: Packaging,
    search_text: String,
    name_key: String,
}

impl ProductRecord {
    pub fn new(index: ProductIndex, source: ProductSource) -> Self {
        let name = source.name.trim().to_string();
        let detail = source.detail;
        let price = Price::extract(&detail);
        let packaging = Packaging::extract(&detail);
        let search_text = fold_case(&format!("{name} {detail} {packaging}"));
        let name_key = fold_case(&name);

        Self {
            index,
            name,
            detail,
            price,
            packaging,
            search_text,
            name_key,
        }
    }

    pub fn index(&self) -> ProductIndex {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn packaging(&self) -> &Packaging {
        &self.packaging
    }

    /// Case-folded name + detail + packaging.
    pub(crate) fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Case-folded name used for name ordering.
    pub(crate) fn name_key(&self) -> &str {
        &self.name_key
    }
}

impl Entity for ProductRecord {
    type Id = ProductIndex;

    fn id(&self) -> &Self::Id {
        &self.index
    }
}

/// Category card, matched by title only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCard {
    title: String,
    title_key: String,
}

impl CategoryCard {
    pub fn new(source: CategorySource) -> Self {
        let title = source.title.trim().to_string();
        let title_key = fold_case(&title);
        Self { title, title_key }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn title_key(&self) -> &str {
        &self.title_key
    }
}

#[derive(Debug, Deserialize)]
struct CatalogPayload {
    products: Vec<ProductSource>,
    #[serde(default)]
    categories: Vec<CategorySource>,
}

/// The static page content: product records plus category cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<ProductRecord>,
    categories: Vec<CategoryCard>,
}

impl Catalog {
    pub fn new(products: Vec<ProductSource>, categories: Vec<CategorySource>) -> Self {
        let products: Vec<ProductRecord> = products
            .into_iter()
            .enumerate()
            .map(|(i, source)| ProductRecord::new(ProductIndex(i), source))
            .collect();

        for record in &products {
            if !record.price().is_known() {
                tracing::warn!(product = %record.name(), "no price in product detail; treating as unknown");
            }
            if !record.packaging().is_known() {
                tracing::warn!(product = %record.name(), "no packaging in product detail; using NA");
            }
        }

        Self {
            products,
            categories: categories.into_iter().map(CategoryCard::new).collect(),
        }
    }

    pub fn from_products(products: Vec<ProductSource>) -> Self {
        Self::new(products, Vec::new())
    }

    /// Decode `{ "products": [...], "categories": [...] }`.
    pub fn from_json(payload: &str) -> DomainResult<Self> {
        let payload: CatalogPayload = serde_json::from_str(payload)
            .map_err(|e| DomainError::invalid_catalog(e.to_string()))?;
        Ok(Self::new(payload.products, payload.categories))
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn categories(&self) -> &[CategoryCard] {
        &self.categories
    }

    pub fn product(&self, index: ProductIndex) -> Option<&ProductRecord> {
        self.products.get(index.0)
    }

    /// Products plus category cards. Use `products().len()` for products alone.
    pub fn entry_count(&self) -> usize {
        self.products.len() + self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }
}
