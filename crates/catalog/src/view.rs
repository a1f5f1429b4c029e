//! View state: the single search/filter/sort selection for the page.

use serde::{Deserialize, Serialize};

use storefront_core::{Aggregate, AggregateRoot, DomainError};
use storefront_events::Event;

use crate::filter::PriceTier;
use crate::sort::SortMode;

/// Current search query, price tier and sort mode.
///
/// Mutated only through [`ViewCommand`]s; a page reload starts from
/// [`ViewState::default`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    search_query: String,
    price_tier: PriceTier,
    sort_mode: SortMode,
    #[serde(skip)]
    version: u64,
}

impl ViewState {
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn price_tier(&self) -> PriceTier {
        self.price_tier
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// True when the trimmed query is non-empty.
    pub fn has_query(&self) -> bool {
        !self.search_query.trim().is_empty()
    }
}

impl AggregateRoot for ViewState {
    fn version(&self) -> u64 {
        self.version
    }
}

/// User input against the view state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewCommand {
    SetSearchQuery(String),
    SetPriceTier(PriceTier),
    SetSortMode(SortMode),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewEvent {
    SearchQueryChanged { query: String },
    PriceTierChanged { tier: PriceTier },
    SortModeChanged { mode: SortMode },
}

impl ViewEvent {
    /// Search and tier changes need a visibility recompute; sort changes only reorder.
    pub fn affects_visibility(&self) -> bool {
        !matches!(self, ViewEvent::SortModeChanged { .. })
    }
}

impl Event for ViewEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ViewEvent::SearchQueryChanged { .. } => "catalog.view.search_query_changed",
            ViewEvent::PriceTierChanged { .. } => "catalog.view.price_tier_changed",
            ViewEvent::SortModeChanged { .. } => "catalog.view.sort_mode_changed",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

impl Aggregate for ViewState {
    type Command = ViewCommand;
    type Event = ViewEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ViewEvent::SearchQueryChanged { query } => {
                self.search_query = query.clone();
            }
            ViewEvent::PriceTierChanged { tier } => {
                self.price_tier = *tier;
            }
            ViewEvent::SortModeChanged { mode } => {
                self.sort_mode = *mode;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let event = match command {
            ViewCommand::SetSearchQuery(query) => {
                let query = query.trim();
                (query != self.search_query).then(|| ViewEvent::SearchQueryChanged {
                    query: query.to_string(),
                })
            }
            ViewCommand::SetPriceTier(tier) => (*tier != self.price_tier)
                .then_some(ViewEvent::PriceTierChanged { tier: *tier }),
            ViewCommand::SetSortMode(mode) => (*mode != self.sort_mode)
                .then_some(ViewEvent::SortModeChanged { mode: *mode }),
        };

        Ok(event.into_iter().collect())
    }
}
