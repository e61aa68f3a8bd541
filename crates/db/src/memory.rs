//! Process-local document store.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use catalog_kernel::ContainerSpec;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{DbError, DbResult, DocumentStore};

/// Documents of one container, ordered by key.
#[derive(Debug, Clone, Default)]
pub(crate) struct Container {
    partition_key: String,
    documents: BTreeMap<String, Value>,
}

impl Container {
    pub(crate) fn new(spec: &ContainerSpec) -> Self {
        Self {
            partition_key: spec.partition_key.to_string(),
            documents: BTreeMap::new(),
        }
    }

    pub(crate) fn documents(&self) -> &BTreeMap<String, Value> {
        &self.documents
    }

    pub(crate) fn replace_documents(&mut self, documents: BTreeMap<String, Value>) {
        self.documents = documents;
    }

    fn key_of(&self, document: &Value) -> DbResult<String> {
        document
            .get(&self.partition_key)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| DbError::MissingPartitionKey(self.partition_key.clone()))
    }
}

/// In-memory [`DocumentStore`]; contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    containers: RwLock<HashMap<String, Container>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of a container's documents, used by stores layered on top.
    pub(crate) async fn snapshot(&self, container: &str) -> DbResult<BTreeMap<String, Value>> {
        let containers = self.containers.read().await;
        containers
            .get(container)
            .map(|c| c.documents().clone())
            .ok_or_else(|| DbError::ContainerNotFound(container.to_string()))
    }

    /// Register a container with pre-existing documents; a no-op if it already exists.
    pub(crate) async fn install(&self, spec: &ContainerSpec, documents: BTreeMap<String, Value>) {
        let mut containers = self.containers.write().await;
        containers.entry(spec.name.to_string()).or_insert_with(|| {
            let mut container = Container::new(spec);
            container.replace_documents(documents);
            container
        });
    }

    /// Put back documents taken with [`MemoryStore::snapshot`].
    pub(crate) async fn restore(&self, container: &str, documents: BTreeMap<String, Value>) {
        if let Some(entry) = self.containers.write().await.get_mut(container) {
            entry.replace_documents(documents);
        }
    }

    pub(crate) async fn has_container(&self, name: &str) -> bool {
        self.containers.read().await.contains_key(name)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn ensure_container(&self, spec: &ContainerSpec) -> DbResult<()> {
        let mut containers = self.containers.write().await;
        if !containers.contains_key(spec.name) {
            tracing::debug!(target: "catalog-db", container = spec.name, "container created");
            containers.insert(spec.name.to_string(), Container::new(spec));
        }
        Ok(())
    }

    async fn list(&self, container: &str) -> DbResult<Vec<Value>> {
        let containers = self.containers.read().await;
        let container = containers
            .get(container)
            .ok_or_else(|| DbError::ContainerNotFound(container.to_string()))?;
        Ok(container.documents.values().cloned().collect())
    }

    async fn get(&self, container: &str, id: &str) -> DbResult<Option<Value>> {
        let containers = self.containers.read().await;
        let container = containers
            .get(container)
            .ok_or_else(|| DbError::ContainerNotFound(container.to_string()))?;
        Ok(container.documents.get(id).cloned())
    }

    async fn create(&self, container: &str, document: Value) -> DbResult<Value> {
        let mut containers = self.containers.write().await;
        let entry = containers
            .get_mut(container)
            .ok_or_else(|| DbError::ContainerNotFound(container.to_string()))?;

        let id = entry.key_of(&document)?;
        if entry.documents.contains_key(&id) {
            return Err(DbError::Conflict {
                container: container.to_string(),
                id,
            });
        }

        entry.documents.insert(id, document.clone());
        Ok(document)
    }

    async fn upsert(&self, container: &str, document: Value) -> DbResult<Value> {
        let mut containers = self.containers.write().await;
        let entry = containers
            .get_mut(container)
            .ok_or_else(|| DbError::ContainerNotFound(container.to_string()))?;

        let id = entry.key_of(&document)?;
        entry.documents.insert(id, document.clone());
        Ok(document)
    }

    async fn delete(&self, container: &str, id: &str) -> DbResult<bool> {
        let mut containers = self.containers.write().await;
        let entry = containers
            .get_mut(container)
            .ok_or_else(|| DbError::ContainerNotFound(container.to_string()))?;
        Ok(entry.documents.remove(id).is_some())
    }
}
