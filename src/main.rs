use std::time::Duration;

use storefront::list::EmptyState;
use storefront::share::{share_product, LogShareSheet};
use storefront::{setup_tracing, AppConfig, FetchOutcome, Screen, Storefront};
use tracing::{error, info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = AppConfig::from_env()?;
    let query = std::env::args().nth(1).unwrap_or_else(|| "shirt".to_string());

    info!(catalog = %config.catalog.base_url, "Starting storefront");
    let system = Storefront::connect(&config)?;

    let span = tracing::info_span!("catalog_browse");
    let outcome = async {
        info!("Loading first page");
        system.list_client.load_initial().await
    }
    .instrument(span)
    .await?;

    match outcome {
        FetchOutcome::Loaded { count } => info!(count, "First page loaded"),
        FetchOutcome::Failed { message } => error!(%message, "First page failed"),
        FetchOutcome::Ignored => warn!("First page already loading"),
    }

    if let FetchOutcome::Loaded { count } = system.list_client.load_more().await? {
        info!(count, "Second page loaded");
    }

    let span = tracing::info_span!("search", query = %query);
    let snapshot = async {
        system.list_client.set_search_text(query.clone()).await?;
        tokio::time::sleep(config.list.search_debounce() + Duration::from_millis(50)).await;
        system.list_client.snapshot().await
    }
    .instrument(span)
    .await?;

    match snapshot.empty_state() {
        EmptyState::NoMatches(q) => info!(query = %q, "No products found"),
        EmptyState::NoProducts => info!("No products available"),
        _ => {
            for product in &snapshot.items {
                info!(id = product.id, title = %product.title, price = product.price, "Match");
            }
        }
    }

    if let Some(product) = snapshot.items.first().cloned() {
        system.cart_client.add(product.clone()).await?;
        system.cart_client.set_quantity(product.id, 2).await?;
        share_product(&LogShareSheet, &system.links, &product).await;

        let link = system.links.product_deep_link(product.id)?;
        if let Some(Screen::ProductDetails { in_cart, .. }) = system.open_link(link.as_str()).await? {
            info!(link = %link, in_cart, "Opened product from deep link");
        }
    }

    let total = system.cart_client.total_price().await?;
    info!(total, "Cart total");

    system.shutdown().await?;

    info!("Storefront finished");
    Ok(())
}
