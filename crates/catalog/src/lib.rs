//! Catalog view controller.
//!
//! Pure view-state logic for the product catalog page: metadata extraction,
//! search/price-tier filtering, sorting, and enquiry message composition.
//! Rendering is left to a [`ViewObserver`] supplied by the host page.

pub mod config;
pub mod controller;
pub mod enquiry;
pub mod filter;
pub mod product;
pub mod sort;
pub mod view;

pub use config::StorefrontConfig;
pub use controller::{CatalogController, CatalogView, NoopObserver, ViewObserver, EMPTY_STATE_MESSAGE};
pub use enquiry::{
    EnquiryForm, EnquirySubmission, compose_enquiry_message, compose_interest_message,
    compose_order_message, format_price_label, order_link, SUBMIT_CONFIRMATION,
};
pub use filter::{PriceTier, VisibleSet, apply_filters, matches, matches_category, matches_tier};
pub use product::{
    Catalog, CategoryCard, CategorySource, Packaging, Price, ProductIndex, ProductRecord,
    ProductSource,
};
pub use sort::{SortMode, sort};
pub use view::{ViewCommand, ViewEvent, ViewState};
