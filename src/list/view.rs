use super::state::Phase;
use crate::domain::Product;

/// Everything the product list screen renders, taken in one consistent read.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot {
    /// Visible items, already filtered by the committed search text.
    pub items: Vec<Product>,
    /// Number of fetched items before filtering.
    pub total_items: usize,
    pub phase: Phase,
    pub search_text: String,
    pub debounced_search_text: String,
    pub page_cursor: u32,
    pub error: Option<String>,
    pub refreshing: bool,
}

/// What to show in place of an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// Placeholder rows while the first page loads.
    Loading,
    NoMatches(String),
    NoProducts,
    /// The list has rows to show.
    None,
}

impl ListSnapshot {
    pub fn empty_state(&self) -> EmptyState {
        if self.phase == Phase::InitialLoading {
            EmptyState::Loading
        } else if !self.search_text.is_empty() && self.items.is_empty() {
            EmptyState::NoMatches(self.search_text.clone())
        } else if self.total_items == 0 {
            EmptyState::NoProducts
        } else {
            EmptyState::None
        }
    }

    pub fn show_footer_loader(&self) -> bool {
        self.phase == Phase::PageLoading
    }
}
