//! Typed access to one container.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{DbResult, DocumentStore};

/// Entity repository over a single container of a shared [`DocumentStore`].
pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    container: &'static str,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            container: self.container,
            _entity: PhantomData,
        }
    }
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn DocumentStore>, container: &'static str) -> Self {
        Self {
            store,
            container,
            _entity: PhantomData,
        }
    }

    pub fn container(&self) -> &'static str {
        self.container
    }

    /// All entities; no pagination, filtering, or ordering contract.
    pub async fn list(&self) -> DbResult<Vec<T>> {
        self.store
            .list(self.container)
            .await?
            .into_iter()
            .map(|document| serde_json::from_value(document).map_err(Into::into))
            .collect()
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<T>> {
        match self.store.get(self.container, id).await? {
            Some(document) => Ok(Some(serde_json::from_value(document)?)),
            None => Ok(None),
        }
    }

    pub async fn create(&self, entity: &T) -> DbResult<T> {
        let stored = self
            .store
            .create(self.container, serde_json::to_value(entity)?)
            .await?;
        Ok(serde_json::from_value(stored)?)
    }

    pub async fn upsert(&self, entity: &T) -> DbResult<T> {
        let stored = self
            .store
            .upsert(self.container, serde_json::to_value(entity)?)
            .await?;
        Ok(serde_json::from_value(stored)?)
    }

    pub async fn delete_by_id(&self, id: &str) -> DbResult<bool> {
        self.store.delete(self.container, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DbError, MemoryStore};
    use catalog_kernel::ContainerSpec;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        text: String,
    }

    async fn repository() -> (Arc<MemoryStore>, Repository<Note>) {
        let store = Arc::new(MemoryStore::new());
        store
            .ensure_container(&ContainerSpec::keyed_by_id("notes"))
            .await
            .unwrap();
        let repo = Repository::new(store.clone(), "notes");
        (store, repo)
    }

    fn note(id: &str, text: &str) -> Note {
        Note {
            id: id.to_string(),
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn typed_crud_cycle() {
        let (_, repo) = repository().await;

        let created = repo.create(&note("n1", "first")).await.unwrap();
        assert_eq!(created, note("n1", "first"));

        repo.upsert(&note("n1", "edited")).await.unwrap();
        assert_eq!(
            repo.get_by_id("n1").await.unwrap(),
            Some(note("n1", "edited"))
        );
        assert_eq!(repo.list().await.unwrap(), vec![note("n1", "edited")]);

        assert!(repo.delete_by_id("n1").await.unwrap());
        assert_eq!(repo.get_by_id("n1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn undecodable_document_is_a_serialization_error() {
        let (store, repo) = repository().await;
        store
            .create("notes", json!({"id": "n1", "text": 7}))
            .await
            .unwrap();

        let err = repo.get_by_id("n1").await.unwrap_err();
        assert!(matches!(err, DbError::Serialization(_)));
    }
}
