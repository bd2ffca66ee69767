use crate::domain::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    InitialLoading,
    RefreshLoading,
    PageLoading,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Initial,
    Refresh,
    NextPage,
}

impl FetchKind {
    fn phase(self) -> Phase {
        match self {
            FetchKind::Initial => Phase::InitialLoading,
            FetchKind::Refresh => Phase::RefreshLoading,
            FetchKind::NextPage => Phase::PageLoading,
        }
    }
}

/// Identifies the one fetch allowed in flight. A completion is applied only
/// if it hands back the ticket the controller is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub kind: FetchKind,
    pub page: u32,
    pub limit: u32,
}

impl FetchTicket {
    pub(crate) fn phase(&self) -> Phase {
        self.kind.phase()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    /// Every fetched product in fetch order. Overlapping pages are kept as is.
    pub items: Vec<Product>,
    /// Next page `load_more` will request.
    pub page_cursor: u32,
    pub search_text: String,
    pub debounced_search_text: String,
    pub phase: Phase,
    pub error: Option<String>,
    pub refreshing: bool,
    /// Set when a page comes back empty; cleared by the next page-1 load.
    pub exhausted: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page_cursor: 1,
            search_text: String::new(),
            debounced_search_text: String::new(),
            phase: Phase::Idle,
            error: None,
            refreshing: false,
            exhausted: false,
        }
    }
}
