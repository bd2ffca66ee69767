use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, info_span, instrument, Instrument};

use super::controller::{fetch_page, FetchOutcome, ListController};
use super::state::FetchTicket;
use crate::catalog::CatalogApi;
use crate::clients::ListClient;
use crate::domain::Product;
use crate::error::CatalogError;
use crate::messages::{ListRequest, ServiceResponse};

/// A settled fetch on its way back to the event loop.
struct FetchCompletion {
    ticket: FetchTicket,
    result: Result<Vec<Product>, CatalogError>,
    respond_to: ServiceResponse<FetchOutcome>,
}

/// Runs a [`ListController`] as the list screen's event loop.
///
/// Network calls are spawned and report back through a completion channel,
/// so search keystrokes and snapshot reads are served while a page loads.
/// The controller's in-flight guard turns overlapping fetch requests into
/// [`FetchOutcome::Ignored`].
pub struct ListService<C> {
    receiver: mpsc::Receiver<ListRequest>,
    controller: ListController,
    catalog: Arc<C>,
    completions_tx: mpsc::Sender<FetchCompletion>,
    completions_rx: mpsc::Receiver<FetchCompletion>,
}

impl<C: CatalogApi + 'static> ListService<C> {
    pub fn new(buffer_size: usize, controller: ListController, catalog: Arc<C>) -> (Self, ListClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // One fetch in flight at a time, so one slot is all completions need.
        let (completions_tx, completions_rx) = mpsc::channel(1);
        let service = Self {
            receiver,
            controller,
            catalog,
            completions_tx,
            completions_rx,
        };
        (service, ListClient::new(sender))
    }

    #[instrument(name = "list_service", skip(self))]
    pub async fn run(mut self) {
        info!("ListService starting");

        loop {
            let deadline = self.controller.search_deadline();

            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(ListRequest::LoadInitial { respond_to }) => {
                        let ticket = self.controller.begin_initial();
                        self.spawn_fetch(ticket, respond_to);
                    }
                    Some(ListRequest::Refresh { respond_to }) => {
                        let ticket = self.controller.begin_refresh();
                        self.spawn_fetch(ticket, respond_to);
                    }
                    Some(ListRequest::LoadMore { respond_to }) => {
                        let ticket = self.controller.begin_load_more();
                        self.spawn_fetch(ticket, respond_to);
                    }
                    Some(ListRequest::SetSearchText { text, respond_to }) => {
                        self.handle_search_text(text, respond_to);
                    }
                    Some(ListRequest::Snapshot { respond_to }) => {
                        let _ = respond_to.send(self.controller.snapshot());
                    }
                    Some(ListRequest::Shutdown) | None => {
                        info!("ListService shutting down");
                        break;
                    }
                },
                Some(done) = self.completions_rx.recv() => {
                    self.handle_completion(done);
                }
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.controller.commit_due_search(Instant::now());
                }
            }
        }

        info!("ListService stopped");
    }

    fn spawn_fetch(&self, ticket: Option<FetchTicket>, respond_to: ServiceResponse<FetchOutcome>) {
        let Some(ticket) = ticket else {
            let _ = respond_to.send(FetchOutcome::Ignored);
            return;
        };

        let catalog = Arc::clone(&self.catalog);
        let completions = self.completions_tx.clone();
        let span = info_span!("fetch", seq = ticket.seq, kind = ?ticket.kind, page = ticket.page);
        tokio::spawn(
            async move {
                debug!("Fetching page");
                let result = fetch_page(catalog.as_ref(), ticket).await;
                let _ = completions
                    .send(FetchCompletion {
                        ticket,
                        result,
                        respond_to,
                    })
                    .await;
            }
            .instrument(span),
        );
    }

    #[instrument(fields(seq = done.ticket.seq, kind = ?done.ticket.kind), skip(self, done))]
    fn handle_completion(&mut self, done: FetchCompletion) {
        let outcome = self.controller.complete(done.ticket, done.result);
        debug!(?outcome, "Fetch settled");
        let _ = done.respond_to.send(outcome);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_search_text(&mut self, text: String, respond_to: ServiceResponse<()>) {
        self.controller.set_search_text(text, Instant::now());
        let _ = respond_to.send(());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::list::{EmptyState, Phase};
    use crate::mock_catalog::{create_mock_catalog, expect_list};

    fn start(catalog: crate::mock_catalog::MockCatalog) -> (ListClient, tokio::task::JoinHandle<()>) {
        let controller = ListController::new(10, Duration::from_millis(800));
        let (service, client) = ListService::new(10, controller, Arc::new(catalog));
        (client, tokio::spawn(service.run()))
    }

    fn product(id: u64, title: &str, price: f64) -> Product {
        Product::new(id, title, price)
    }

    #[tokio::test]
    async fn overlapping_fetches_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
        let (catalog, mut requests) = create_mock_catalog(10);
        let (client, handle) = start(catalog);

        let first = tokio::spawn({
            let client = client.clone();
            async move { client.load_initial().await }
        });
        let (page, limit, responder) = expect_list(&mut requests).await.expect("Expected page request");
        assert_eq!((page, limit), (1, 10));

        // The first fetch is still pending here.
        assert_eq!(client.refresh().await?, FetchOutcome::Ignored);
        assert_eq!(client.load_more().await?, FetchOutcome::Ignored);
        let snapshot = client.snapshot().await?;
        assert_eq!(snapshot.phase, Phase::InitialLoading);
        assert_eq!(snapshot.empty_state(), EmptyState::Loading);

        responder
            .send(Ok(vec![product(1, "Shirt", 10.0)]))
            .expect("service should be waiting");
        assert_eq!(first.await??, FetchOutcome::Loaded { count: 1 });
        assert!(requests.try_recv().is_err());

        client.shutdown().await?;
        handle.await?;
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn typing_during_fetch_is_handled() -> Result<(), Box<dyn std::error::Error>> {
        let (catalog, mut requests) = create_mock_catalog(10);
        let (client, handle) = start(catalog);

        let refresh = tokio::spawn({
            let client = client.clone();
            async move { client.refresh().await }
        });
        let (_, _, responder) = expect_list(&mut requests).await.expect("Expected page request");

        client.set_search_text("pa".to_string()).await?;
        let snapshot = client.snapshot().await?;
        assert_eq!(snapshot.search_text, "pa");
        assert!(snapshot.refreshing);

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert_eq!(client.snapshot().await?.debounced_search_text, "pa");

        responder
            .send(Ok(vec![product(1, "Shirt", 10.0), product(2, "Pants", 20.0)]))
            .expect("service should be waiting");
        assert_eq!(refresh.await??, FetchOutcome::Loaded { count: 2 });

        let snapshot = client.snapshot().await?;
        assert!(!snapshot.refreshing);
        assert_eq!(snapshot.items, vec![product(2, "Pants", 20.0)]);

        client.shutdown().await?;
        handle.await?;
        Ok(())
    }

    #[tokio::test]
    async fn failed_fetch_reports_message() -> Result<(), Box<dyn std::error::Error>> {
        let (catalog, mut requests) = create_mock_catalog(10);
        let (client, handle) = start(catalog);

        let load = tokio::spawn({
            let client = client.clone();
            async move { client.load_initial().await }
        });
        let (_, _, responder) = expect_list(&mut requests).await.expect("Expected page request");
        responder
            .send(Err(CatalogError::Network("timed out".into())))
            .expect("service should be waiting");

        assert_eq!(
            load.await??,
            FetchOutcome::Failed {
                message: crate::error::GENERIC_LOAD_ERROR.to_string()
            }
        );
        let snapshot = client.snapshot().await?;
        assert_eq!(snapshot.phase, Phase::Error);
        assert_eq!(snapshot.empty_state(), EmptyState::NoProducts);

        client.shutdown().await?;
        handle.await?;
        Ok(())
    }
}
