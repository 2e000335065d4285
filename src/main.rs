use std::sync::Arc;

use anyhow::Context as _;
use storefront::model::InMemoryModelStore;
use storefront::orders::OrderService;
use storefront::{catalog, handlers, microsvc, telemetry, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init()?;

    let settings = Settings::new().context("loading settings")?;
    let store = InMemoryModelStore::new();

    if settings.catalog.seed {
        catalog::seed::seed(&store).context("seeding catalog")?;
    }

    let backend = OrderService::from_settings(store, settings.pricing.clone(), &settings.orders);
    let service = Arc::new(handlers::service(backend));

    info!(commands = service.commands().len(), "storefront ready");
    microsvc::serve(service, &settings.server.bind_address)
        .await
        .with_context(|| format!("serving on {}", settings.server.bind_address))
}
