use std::borrow::Cow;

use tokio::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use super::debounce::Debouncer;
use super::state::{FetchKind, FetchTicket, ListState, Phase};
use super::view::ListSnapshot;
use crate::catalog::CatalogApi;
use crate::domain::Product;
use crate::error::CatalogError;

/// How a fetch request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Rejected up front: another fetch was in flight or the request was not
    /// valid in the current state. Nothing changed.
    Ignored,
    Loaded { count: usize },
    Failed { message: String },
}

/// State machine behind the product list screen.
///
/// Fetches are split into `begin_*` (which checks the in-flight guard and
/// hands out a [`FetchTicket`]) and [`complete`](Self::complete), so the
/// caller decides where the network call runs. The `load_*` methods do both
/// in one step for callers that can await inline.
#[derive(Debug)]
pub struct ListController {
    state: ListState,
    search: Debouncer<String>,
    page_size: u32,
    in_flight: Option<FetchTicket>,
    next_seq: u64,
}

impl ListController {
    pub fn new(page_size: u32, search_debounce: Duration) -> Self {
        Self {
            state: ListState::default(),
            search: Debouncer::new(search_debounce),
            page_size: page_size.max(1),
            in_flight: None,
            next_seq: 0,
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    fn issue(&mut self, kind: FetchKind, page: u32) -> FetchTicket {
        self.next_seq += 1;
        let ticket = FetchTicket {
            seq: self.next_seq,
            kind,
            page,
            limit: self.page_size,
        };
        self.in_flight = Some(ticket);
        self.state.phase = ticket.phase();
        self.state.error = None;
        ticket
    }

    /// First load of page 1. Also serves as the retry after a failed first
    /// load, since `items` is still empty then.
    pub fn begin_initial(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some() {
            debug!("Initial load ignored: fetch in flight");
            return None;
        }
        if !matches!(self.state.phase, Phase::Idle | Phase::Error) || !self.state.items.is_empty()
        {
            debug!(phase = ?self.state.phase, items = self.state.items.len(), "Initial load ignored");
            return None;
        }
        Some(self.issue(FetchKind::Initial, 1))
    }

    pub fn begin_refresh(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some() {
            debug!("Refresh ignored: fetch in flight");
            return None;
        }
        self.state.refreshing = true;
        Some(self.issue(FetchKind::Refresh, 1))
    }

    /// Next page for infinite scroll. Suspended while a search filter is
    /// typed, after a failure, and once the catalog ran out of pages.
    pub fn begin_load_more(&mut self) -> Option<FetchTicket> {
        if self.in_flight.is_some() || self.state.phase != Phase::Idle {
            debug!(phase = ?self.state.phase, "Load more ignored: not idle");
            return None;
        }
        if !self.state.search_text.is_empty() {
            debug!("Load more ignored: search active");
            return None;
        }
        if self.state.exhausted {
            debug!("Load more ignored: catalog exhausted");
            return None;
        }
        let page = self.state.page_cursor;
        Some(self.issue(FetchKind::NextPage, page))
    }

    /// Applies the result of the fetch identified by `ticket`.
    ///
    /// Results for any ticket other than the one in flight are dropped.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Product>, CatalogError>,
    ) -> FetchOutcome {
        if self.in_flight != Some(ticket) {
            warn!(seq = ticket.seq, kind = ?ticket.kind, "Dropping result for a fetch that is not in flight");
            return FetchOutcome::Ignored;
        }
        self.in_flight = None;
        if ticket.kind == FetchKind::Refresh {
            self.state.refreshing = false;
        }

        match result {
            Ok(products) => {
                let count = products.len();
                match ticket.kind {
                    FetchKind::Initial | FetchKind::Refresh => {
                        self.state.items = products;
                        self.state.page_cursor = 2;
                        self.state.exhausted = count == 0;
                    }
                    FetchKind::NextPage => {
                        self.state.items.extend(products);
                        self.state.page_cursor = ticket.page + 1;
                        self.state.exhausted = count == 0;
                    }
                }
                self.state.phase = Phase::Idle;
                info!(
                    kind = ?ticket.kind,
                    page = ticket.page,
                    count,
                    total = self.state.items.len(),
                    "Products loaded"
                );
                FetchOutcome::Loaded { count }
            }
            Err(e) => {
                let message = e.user_message();
                warn!(kind = ?ticket.kind, page = ticket.page, error = %e, "Failed to load products");
                self.state.phase = Phase::Error;
                self.state.error = Some(message.clone());
                FetchOutcome::Failed { message }
            }
        }
    }

    /// Echoes `text` into the input immediately and schedules it to become
    /// the active filter once typing pauses.
    pub fn set_search_text(&mut self, text: impl Into<String>, now: Instant) {
        let text = text.into();
        self.state.search_text = text.clone();
        self.search.schedule(text, now);
    }

    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Commits the pending search text if its quiet interval has passed.
    pub fn commit_due_search(&mut self, now: Instant) -> bool {
        match self.search.take_due(now) {
            Some(text) => {
                debug!(query = %text, "Search filter applied");
                self.state.debounced_search_text = text;
                true
            }
            None => false,
        }
    }

    /// Products to show: everything when no filter is active (borrowed, not
    /// copied), else the titles containing the filter, ignoring case.
    pub fn visible_items(&self) -> Cow<'_, [Product]> {
        let query = &self.state.debounced_search_text;
        if query.is_empty() {
            return Cow::Borrowed(self.state.items.as_slice());
        }
        let needle = query.to_lowercase();
        Cow::Owned(
            self.state
                .items
                .iter()
                .filter(|p| p.title_matches(&needle))
                .cloned()
                .collect(),
        )
    }

    pub fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            items: self.visible_items().into_owned(),
            total_items: self.state.items.len(),
            phase: self.state.phase,
            search_text: self.state.search_text.clone(),
            debounced_search_text: self.state.debounced_search_text.clone(),
            page_cursor: self.state.page_cursor,
            error: self.state.error.clone(),
            refreshing: self.state.refreshing,
        }
    }

    #[instrument(skip_all)]
    pub async fn load_initial<C: CatalogApi>(&mut self, catalog: &C) -> FetchOutcome {
        let ticket = self.begin_initial();
        self.run(catalog, ticket).await
    }

    #[instrument(skip_all)]
    pub async fn refresh<C: CatalogApi>(&mut self, catalog: &C) -> FetchOutcome {
        let ticket = self.begin_refresh();
        self.run(catalog, ticket).await
    }

    #[instrument(skip_all)]
    pub async fn load_more<C: CatalogApi>(&mut self, catalog: &C) -> FetchOutcome {
        let ticket = self.begin_load_more();
        self.run(catalog, ticket).await
    }

    async fn run<C: CatalogApi>(&mut self, catalog: &C, ticket: Option<FetchTicket>) -> FetchOutcome {
        match ticket {
            Some(ticket) => {
                let result = fetch_page(catalog, ticket).await;
                self.complete(ticket, result)
            }
            None => FetchOutcome::Ignored,
        }
    }
}

/// Performs the request a ticket describes.
pub async fn fetch_page<C: CatalogApi>(
    catalog: &C,
    ticket: FetchTicket,
) -> Result<Vec<Product>, CatalogError> {
    catalog.list_products(ticket.page, ticket.limit).await
}
