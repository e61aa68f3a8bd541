//! Document store persisted as one JSON array per container.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use catalog_kernel::ContainerSpec;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{DbError, DbResult, DocumentStore, MemoryStore};

/// [`DocumentStore`] that keeps every container in memory and rewrites
/// `<dir>/<container>.json` after each successful write.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    cache: MemoryStore,
    // Serializes mutate-then-persist so files never go backwards.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (and create if needed) the data directory.
    pub async fn open(dir: impl AsRef<Path>) -> DbResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;

        Ok(Self {
            dir,
            cache: MemoryStore::new(),
            write_lock: Mutex::new(()),
        })
    }

    fn container_path(&self, container: &str) -> PathBuf {
        self.dir.join(format!("{container}.json"))
    }

    async fn load(&self, spec: &ContainerSpec) -> DbResult<BTreeMap<String, Value>> {
        let path = self.container_path(spec.name);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };

        let documents: Vec<Value> = serde_json::from_slice(&bytes)?;
        let mut keyed = BTreeMap::new();
        for document in documents {
            let key = document
                .get(spec.partition_key)
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| DbError::MissingPartitionKey(spec.partition_key.to_string()))?;
            keyed.insert(key, document);
        }

        tracing::info!(
            target: "catalog-db",
            container = spec.name,
            documents = keyed.len(),
            path = %path.display(),
            "container loaded from disk"
        );
        Ok(keyed)
    }

    async fn persist(&self, container: &str) -> DbResult<()> {
        let documents = self.cache.snapshot(container).await?;
        let documents: Vec<&Value> = documents.values().collect();
        let bytes = serde_json::to_vec_pretty(&documents)?;

        let path = self.container_path(container);
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, bytes).await?;
        tokio::fs::rename(&staging, &path).await?;
        Ok(())
    }

    /// Persist `container` after a cache write; on failure the cache goes
    /// back to `before` so memory and disk stay in step.
    async fn persist_or_rollback(
        &self,
        container: &str,
        before: BTreeMap<String, Value>,
    ) -> DbResult<()> {
        if let Err(err) = self.persist(container).await {
            tracing::warn!(
                target: "catalog-db",
                container,
                error = %err,
                "persist failed, rolling back cached write"
            );
            self.cache.restore(container, before).await;
            return Err(err);
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    fn kind(&self) -> &'static str {
        "file"
    }

    async fn ensure_container(&self, spec: &ContainerSpec) -> DbResult<()> {
        let _guard = self.write_lock.lock().await;
        if self.cache.has_container(spec.name).await {
            return Ok(());
        }

        let documents = self.load(spec).await?;
        self.cache.install(spec, documents).await;
        Ok(())
    }

    async fn list(&self, container: &str) -> DbResult<Vec<Value>> {
        self.cache.list(container).await
    }

    async fn get(&self, container: &str, id: &str) -> DbResult<Option<Value>> {
        self.cache.get(container, id).await
    }

    async fn create(&self, container: &str, document: Value) -> DbResult<Value> {
        let _guard = self.write_lock.lock().await;
        let before = self.cache.snapshot(container).await?;
        let created = self.cache.create(container, document).await?;
        self.persist_or_rollback(container, before).await?;
        Ok(created)
    }

    async fn upsert(&self, container: &str, document: Value) -> DbResult<Value> {
        let _guard = self.write_lock.lock().await;
        let before = self.cache.snapshot(container).await?;
        let stored = self.cache.upsert(container, document).await?;
        self.persist_or_rollback(container, before).await?;
        Ok(stored)
    }

    async fn delete(&self, container: &str, id: &str) -> DbResult<bool> {
        let _guard = self.write_lock.lock().await;
        let before = self.cache.snapshot(container).await?;
        let removed = self.cache.delete(container, id).await?;
        if removed {
            self.persist_or_rollback(container, before).await?;
        }
        Ok(removed)
    }
}
