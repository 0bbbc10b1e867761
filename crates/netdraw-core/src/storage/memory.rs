//! In-memory storage.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::document::TopologyDocument;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<BTreeMap<String, TopologyDocument>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with one topology.
    pub fn with_document(id: &str, document: TopologyDocument) -> Self {
        let storage = Self::default();
        if let Ok(mut docs) = storage.documents.write() {
            docs.insert(id.to_string(), document);
        }
        storage
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, document: &TopologyDocument) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let document = document.clone();
        Box::pin(async move {
            let mut docs = self.documents.write().map_err(lock_error)?;
            docs.insert(id, document);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<TopologyDocument>> {
        let id = id.to_string();
        Box::pin(async move {
            let docs = self.documents.read().map_err(lock_error)?;
            docs.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            let mut docs = self.documents.write().map_err(lock_error)?;
            docs.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let docs = self.documents.read().map_err(lock_error)?;
            Ok(docs.keys().cloned().collect())
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let docs = self.documents.read().map_err(lock_error)?;
            Ok(docs.contains_key(&id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample_topology;
    use crate::storage::block_on;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let doc = sample_topology();

        block_on(storage.save("campus", &doc)).unwrap();
        let loaded = block_on(storage.load("campus")).unwrap();

        assert_eq!(doc, loaded);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::with_document("campus", sample_topology());

        assert!(block_on(storage.exists("campus")).unwrap());
        block_on(storage.delete("campus")).unwrap();
        assert!(!block_on(storage.exists("campus")).unwrap());
        // Deleting again is fine
        block_on(storage.delete("campus")).unwrap();
    }

    #[test]
    fn test_list_sorted() {
        let storage = MemoryStorage::new();
        let doc = TopologyDocument::default();

        block_on(storage.save("b-site", &doc)).unwrap();
        block_on(storage.save("a-site", &doc)).unwrap();

        let list = block_on(storage.list()).unwrap();
        assert_eq!(list, vec!["a-site".to_string(), "b-site".to_string()]);
    }
}
