//! Catalog view controller.
//!
//! [`CatalogView`] holds the one [`ViewState`] for the page together with
//! the display order and visibility derived from it. [`CatalogController`]
//! decides each input against that state, applies the resulting events to
//! the view, then hands both to the [`ViewObserver`] for rendering.

use storefront_core::{Aggregate, AggregateRoot, DomainResult};
use storefront_events::Projection;

use crate::filter::{PriceTier, VisibleSet, apply_filters};
use crate::product::{Catalog, CategoryCard, ProductIndex, ProductRecord};
use crate::sort::{SortMode, sort};
use crate::view::{ViewCommand, ViewEvent, ViewState};

/// Shown when a non-empty query leaves nothing visible.
pub const EMPTY_STATE_MESSAGE: &str = "No matches found. Try a different keyword.";

/// Read model: display order plus visibility for every catalog entry.
#[derive(Debug, Clone)]
pub struct CatalogView {
    catalog: Catalog,
    state: ViewState,
    order: Vec<ProductIndex>,
    visible: VisibleSet,
}

impl CatalogView {
    pub fn new(catalog: Catalog) -> Self {
        let state = ViewState::default();
        let order = catalog.products().iter().map(ProductRecord::index).collect();
        let visible = apply_filters(&state, &catalog);
        Self {
            catalog,
            state,
            order,
            visible,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The page's view state; changed only by applying [`ViewEvent`]s.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Every product in current display order, visible or not.
    pub fn display_order(&self) -> &[ProductIndex] {
        &self.order
    }

    pub fn visible_set(&self) -> &VisibleSet {
        &self.visible
    }

    /// Visible products in display order.
    pub fn visible_products(&self) -> impl Iterator<Item = &ProductRecord> + '_ {
        self.order
            .iter()
            .filter(|i| self.visible.is_product_visible(**i))
            .filter_map(|i| self.catalog.product(*i))
    }

    pub fn visible_categories(&self) -> impl Iterator<Item = &CategoryCard> + '_ {
        self.catalog
            .categories()
            .iter()
            .enumerate()
            .filter(|(i, _)| self.visible.is_category_visible(*i))
            .map(|(_, card)| card)
    }

    /// Visible-count readout (products + categories).
    pub fn visible_count(&self) -> usize {
        self.visible.count()
    }

    pub fn show_empty_state(&self) -> bool {
        self.state.has_query() && self.visible.count() == 0
    }

    pub fn empty_state_message(&self) -> Option<&'static str> {
        self.show_empty_state().then_some(EMPTY_STATE_MESSAGE)
    }

    fn recompute_visibility(&mut self) {
        self.visible = apply_filters(&self.state, &self.catalog);
        tracing::debug!(
            query = %self.state.search_query(),
            tier = %self.state.price_tier(),
            visible = self.visible.count(),
            "recomputed catalog visibility"
        );
    }

    fn reorder(&mut self) {
        let mode = self.state.sort_mode();
        let ordered: Vec<ProductIndex> = sort(
            self.order.iter().filter_map(|i| self.catalog.product(*i)),
            mode,
        )
        .into_iter()
        .map(ProductRecord::index)
        .collect();
        self.order = ordered;
        tracing::debug!(mode = %mode, "reordered catalog");
    }
}

impl Projection for CatalogView {
    type Ev = ViewEvent;

    fn apply(&mut self, event: &ViewEvent) {
        Aggregate::apply(&mut self.state, event);
        if event.affects_visibility() {
            self.recompute_visibility();
        } else {
            self.reorder();
        }
    }
}

/// Rendering hook, invoked once after each accepted state change.
pub trait ViewObserver {
    fn on_view_state_change(&mut self, state: &ViewState, view: &CatalogView);
}

impl<F> ViewObserver for F
where
    F: FnMut(&ViewState, &CatalogView),
{
    fn on_view_state_change(&mut self, state: &ViewState, view: &CatalogView) {
        self(state, view)
    }
}

/// Observer that renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ViewObserver for NoopObserver {
    fn on_view_state_change(&mut self, _state: &ViewState, _view: &CatalogView) {}
}

/// The catalog view controller for a single page.
pub struct CatalogController<O = NoopObserver> {
    view: CatalogView,
    observer: O,
}

impl CatalogController<NoopObserver> {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_observer(catalog, NoopObserver)
    }
}

impl<O: ViewObserver> CatalogController<O> {
    pub fn with_observer(catalog: Catalog, observer: O) -> Self {
        Self {
            view: CatalogView::new(catalog),
            observer,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.view.state()
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Run a command; returns `true` when the view changed and the observer ran.
    pub fn dispatch(&mut self, command: ViewCommand) -> DomainResult<bool> {
        let events = self.view.state().handle(&command)?;
        if events.is_empty() {
            return Ok(false);
        }

        for event in &events {
            self.view.apply(event);
        }
        self.on_view_state_change();
        Ok(true)
    }

    pub fn set_search_query(&mut self, query: &str) -> DomainResult<bool> {
        self.dispatch(ViewCommand::SetSearchQuery(query.to_string()))
    }

    pub fn set_price_tier(&mut self, tier: PriceTier) -> DomainResult<bool> {
        self.dispatch(ViewCommand::SetPriceTier(tier))
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) -> DomainResult<bool> {
        self.dispatch(ViewCommand::SetSortMode(mode))
    }

    /// Price-tier select input (`all`, `budget`, `standard`, `premium`).
    pub fn select_price_tier(&mut self, value: &str) -> DomainResult<bool> {
        self.set_price_tier(value.parse()?)
    }

    /// Sort select input (`default`, `price-asc`, `price-desc`, `name-asc`).
    pub fn select_sort_mode(&mut self, value: &str) -> DomainResult<bool> {
        self.set_sort_mode(value.parse()?)
    }

    fn on_view_state_change(&mut self) {
        let state = self.view.state();
        tracing::trace!(version = state.version(), "view state changed");
        self.observer.on_view_state_change(state, &self.view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{CategorySource, ProductSource};
    use storefront_core::DomainError;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                ProductSource::new("Ashwagandha Capsules", "Price: 250 Packaging: 60 caps"),
                ProductSource::new("Herbal Tonic", "Packaging: 200ml"),
                ProductSource::new("Amla Juice", "Price: 120\nPackaging: 1L"),
                ProductSource::new("Brahmi Oil", "Price: 450\nPackaging: 100ml"),
            ],
            vec![CategorySource {
                title: "Capsules".to_string(),
            }],
        )
    }

    fn visible_names<O: ViewObserver>(c: &CatalogController<O>) -> Vec<String> {
        c.view().visible_products().map(|r| r.name().to_string()).collect()
    }

    #[test]
    fn initial_view_shows_everything_in_source_order() {
        let c = CatalogController::new(catalog());
        assert_eq!(c.view().visible_count(), 5);
        assert_eq!(
            visible_names(&c),
            ["Ashwagandha Capsules", "Herbal Tonic", "Amla Juice", "Brahmi Oil"]
        );
        assert!(!c.view().show_empty_state());
    }

    #[test]
    fn search_recomputes_visibility_and_count() {
        let mut c = CatalogController::new(catalog());
        assert!(c.set_search_query("caps").unwrap());
        assert_eq!(visible_names(&c), ["Ashwagandha Capsules"]);
        assert_eq!(c.view().visible_categories().count(), 1);
        assert_eq!(c.view().visible_count(), 2);
    }

    #[test]
    fn sort_change_reorders_without_touching_visibility() {
        let mut c = CatalogController::new(catalog());
        c.set_price_tier(PriceTier::Budget).unwrap();
        let before = c.view().visible_set().clone();

        c.set_sort_mode(SortMode::PriceDesc).unwrap();
        assert_eq!(c.view().visible_set(), &before);
        assert_eq!(
            c.view().display_order(),
            &[ProductIndex(1), ProductIndex(3), ProductIndex(0), ProductIndex(2)]
        );
        assert_eq!(visible_names(&c), ["Amla Juice"]);
    }

    #[test]
    fn filter_change_keeps_current_order() {
        let mut c = CatalogController::new(catalog());
        c.set_sort_mode(SortMode::NameAsc).unwrap();
        let order = c.view().display_order().to_vec();

        c.set_search_query("oil").unwrap();
        assert_eq!(c.view().display_order(), order.as_slice());
        assert_eq!(visible_names(&c), ["Brahmi Oil"]);
    }

    #[test]
    fn default_sort_restores_source_order() {
        let mut c = CatalogController::new(catalog());
        c.set_sort_mode(SortMode::PriceAsc).unwrap();
        c.set_sort_mode(SortMode::Default).unwrap();
        assert_eq!(
            c.view().display_order(),
            &[ProductIndex(0), ProductIndex(1), ProductIndex(2), ProductIndex(3)]
        );
    }

    #[test]
    fn empty_state_only_for_non_empty_query_without_matches() {
        let mut c = CatalogController::new(catalog());
        c.set_search_query("NOPE").unwrap();
        assert_eq!(c.view().visible_count(), 0);
        assert_eq!(c.view().empty_state_message(), Some(EMPTY_STATE_MESSAGE));

        c.set_search_query("").unwrap();
        c.set_price_tier(PriceTier::Premium).unwrap();
        c.set_search_query("tonic").unwrap();
        assert_eq!(c.view().visible_count(), 0);
        assert!(c.view().show_empty_state());

        c.set_search_query(" ").unwrap();
        assert!(!c.view().show_empty_state());
    }

    #[test]
    fn observer_runs_once_per_accepted_change() {
        let mut seen: Vec<(u64, usize)> = Vec::new();
        {
            let observer = |state: &ViewState, view: &CatalogView| {
                seen.push((state.version(), view.visible_count()));
            };
            let mut c = CatalogController::with_observer(catalog(), observer);
            assert!(c.set_search_query("a").unwrap());
            assert!(!c.set_search_query("a").unwrap());
            assert!(c.select_sort_mode("name-asc").unwrap());
        }
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, 1);
        assert_eq!(seen[1].0, 2);
    }

    #[test]
    fn controller_and_view_share_one_view_state() {
        let mut c = CatalogController::new(catalog());
        c.set_search_query("oil").unwrap();
        c.set_sort_mode(SortMode::NameAsc).unwrap();
        assert!(std::ptr::eq(c.state(), c.view().state()));
        assert_eq!(c.state().search_query(), "oil");
        assert_eq!(c.state().sort_mode(), SortMode::NameAsc);
        assert_eq!(c.state().version(), 2);
    }

    #[test]
    fn invalid_select_value_is_rejected_without_notifying() {
        let mut calls = 0usize;
        {
            let mut c = CatalogController::with_observer(catalog(), |_: &ViewState, _: &CatalogView| {
                calls += 1;
            });
            let err = c.select_price_tier("luxury").unwrap_err();
            match err {
                DomainError::InvalidSelection { .. } => {}
                _ => panic!("Expected InvalidSelection error"),
            }
            assert_eq!(c.state().price_tier(), PriceTier::All);
        }
        assert_eq!(calls, 0);
    }
}
