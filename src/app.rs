//! Process wiring: store, registry, module lifecycle, and the HTTP server.

use std::sync::Arc;

use anyhow::Context;
use catalog_db::DocumentStore;
use catalog_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Registry holding every catalog module, bound to `store`.
pub fn build_registry(store: Arc<dyn DocumentStore>) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store);
    registry
}

/// Create the containers each module declares, then init and start modules.
pub async fn prepare(
    registry: &ModuleRegistry,
    store: &dyn DocumentStore,
    settings: &Settings,
) -> anyhow::Result<()> {
    let containers = registry.collect_containers();
    for (module, spec) in &containers {
        tracing::info!(module = %module, container = spec.name, "ensuring container");
    }
    catalog_db::ensure_containers(store, containers.iter().map(|(_, spec)| spec)).await?;

    let ctx = InitCtx { settings };
    registry
        .init_modules(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_modules(&ctx)
        .await
        .context("module start failed")?;
    Ok(())
}

/// Run the catalog services until a shutdown signal arrives.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        backend = ?settings.database.backend,
        "catalog bootstrap starting"
    );

    let store = catalog_db::connect(&settings.database).await?;
    let registry = build_registry(store.clone());
    prepare(&registry, store.as_ref(), settings).await?;

    tracing::info!(modules = registry.module_count(), "catalog bootstrap complete");

    let served = catalog_http::start_server(&registry, settings).await;
    registry.stop_modules().await?;
    served
}
