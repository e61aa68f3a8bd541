//! Document store abstraction backing the catalog repositories.
//!
//! Stores hold JSON documents grouped into containers. Each container is keyed by
//! the document field named in its [`ContainerSpec`]; the key is the only lookup path.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use catalog_kernel::settings::{DatabaseSettings, StorageBackend};
use catalog_kernel::ContainerSpec;
use serde_json::Value;

pub mod error;
pub mod file;
pub mod memory;
pub mod repository;

pub use error::{DbError, DbResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use repository::Repository;

/// CRUD-by-key operations over JSON documents.
///
/// Implementations must be safe to share across concurrent requests. No
/// ordering or isolation between writers is promised: concurrent upserts of
/// the same key resolve as last writer wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Short backend name used in logs.
    fn kind(&self) -> &'static str;

    /// Create the container if it does not exist yet.
    async fn ensure_container(&self, spec: &ContainerSpec) -> DbResult<()>;

    /// Every document in the container, in store-defined order.
    async fn list(&self, container: &str) -> DbResult<Vec<Value>>;

    async fn get(&self, container: &str, id: &str) -> DbResult<Option<Value>>;

    /// Insert a new document. Fails with [`DbError::Conflict`] if the key is taken.
    async fn create(&self, container: &str, document: Value) -> DbResult<Value>;

    /// Insert or replace the document under its key.
    async fn upsert(&self, container: &str, document: Value) -> DbResult<Value>;

    /// Returns `false` when nothing was stored under `id`.
    async fn delete(&self, container: &str, id: &str) -> DbResult<bool>;
}

/// Open the store selected by the database settings.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match settings.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => Arc::new(
            FileStore::open(&settings.data_dir)
                .await
                .with_context(|| {
                    format!(
                        "failed to open file store at '{}'",
                        settings.data_dir.display()
                    )
                })?,
        ),
    };

    tracing::info!(target: "catalog-db", backend = store.kind(), "document store ready");
    Ok(store)
}

/// Ensure every container in `specs` exists.
pub async fn ensure_containers<'a, I>(store: &dyn DocumentStore, specs: I) -> anyhow::Result<()>
where
    I: IntoIterator<Item = &'a ContainerSpec>,
{
    for spec in specs {
        store
            .ensure_container(spec)
            .await
            .with_context(|| format!("failed to ensure container '{}'", spec.name))?;
    }
    Ok(())
}
