//! Item Store Module
//!
//! Whole-file JSON persistence for the item collection.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::store::{Item, ItemSource, NewItem};

// == Item Store ==
/// Reads and rewrites the item collection file.
///
/// Every read loads the full file. Writers are serialized through an
/// internal lock, so id assignment in [`ItemStore::append`] never races
/// with another append from the same process.
#[derive(Debug)]
pub struct ItemStore {
    /// Location of the JSON array
    path: PathBuf,
    /// Single-writer guard for read-modify-write cycles
    write_lock: Mutex<()>,
}

impl ItemStore {
    // == Constructor ==
    /// Creates a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the collection file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // == Read All ==
    /// Loads and parses the full collection.
    pub async fn read_all(&self) -> Result<Vec<Item>> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            CatalogError::StorageUnavailable(format!("{}: {}", self.path.display(), e))
        })?;

        serde_json::from_slice(&raw)
            .map_err(|e| CatalogError::CorruptData(format!("{}: {}", self.path.display(), e)))
    }

    // == Write All ==
    /// Replaces the persisted collection with `items`.
    pub async fn write_all(&self, items: &[Item]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.persist(items).await
    }

    // == Append ==
    /// Assigns the next id (`max(existing) + 1`) to `new_item` and persists it.
    pub async fn append(&self, new_item: NewItem) -> Result<Item> {
        let _guard = self.write_lock.lock().await;

        let mut items = self.read_all().await?;
        let next_id = items
            .iter()
            .map(|i| i.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| {
                CatalogError::StorageUnavailable(format!(
                    "{}: id space exhausted",
                    self.path.display()
                ))
            })?;
        let item = new_item.into_item(next_id);

        items.push(item.clone());
        self.persist(&items).await?;

        debug!("Appended item {} ({} total)", item.id, items.len());
        Ok(item)
    }

    // == Persist ==
    /// Writes to a sibling temp file and renames it over the collection.
    ///
    /// Callers must hold `write_lock`.
    async fn persist(&self, items: &[Item]) -> Result<()> {
        let body = serde_json::to_vec_pretty(items)
            .map_err(|e| CatalogError::StorageUnavailable(e.to_string()))?;

        let tmp_path = self.tmp_path();
        tokio::fs::write(&tmp_path, body).await.map_err(|e| {
            CatalogError::StorageUnavailable(format!("{}: {}", tmp_path.display(), e))
        })?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            CatalogError::StorageUnavailable(format!("{}: {}", self.path.display(), e))
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "items.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ItemSource for ItemStore {
    async fn read_all(&self) -> Result<Vec<Item>> {
        ItemStore::read_all(self).await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn store_with(dir: &TempDir, json: &str) -> ItemStore {
        let path = dir.path().join("items.json");
        std::fs::write(&path, json).unwrap();
        ItemStore::new(path)
    }

    #[tokio::test]
    async fn test_read_all() {
        let dir = TempDir::new().unwrap();
        let store = store_with(
            &dir,
            r#"[{"id":1,"name":"Laptop","category":"Electronics","price":999.5}]"#,
        );

        let items = store.read_all().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Laptop");
        assert_eq!(items[0].effective_price(), 999.5);
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = ItemStore::new(dir.path().join("missing.json"));

        let result = store.read_all().await;
        assert!(matches!(result, Err(CatalogError::StorageUnavailable(_))));
    }

    #[tokio::test]
    async fn test_read_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, "{ not json");

        let result = store.read_all().await;
        assert!(matches!(result, Err(CatalogError::CorruptData(_))));
    }

    #[tokio::test]
    async fn test_write_all_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, r#"[{"id":1,"name":"Old"}]"#);

        let replacement = vec![NewItem::named("New").into_item(9)];
        store.write_all(&replacement).await.unwrap();

        let items = store.read_all().await.unwrap();
        assert_eq!(items, replacement);
        assert!(!store.tmp_path().exists());

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\n  {"), "collection should be pretty-printed");
    }

    #[tokio::test]
    async fn test_append_assigns_max_plus_one() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, r#"[{"id":1,"name":"A"},{"id":3,"name":"B"}]"#);

        let item = store.append(NewItem::named("C")).await.unwrap();
        assert_eq!(item.id, 4);

        let items = store.read_all().await.unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2], item);
    }

    #[tokio::test]
    async fn test_append_with_max_id_fails_cleanly() {
        let dir = TempDir::new().unwrap();
        let seed = format!(r#"[{{"id":{},"name":"max"}}]"#, u64::MAX);
        let store = store_with(&dir, &seed);

        let result = store.append(NewItem::named("next")).await;
        assert!(matches!(result, Err(CatalogError::StorageUnavailable(_))));

        // Collection left untouched
        let items = store.read_all().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, u64::MAX);
    }

    #[tokio::test]
    async fn test_append_keeps_other_records_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = store_with(
            &dir,
            r#"[{"id":1,"name":"Laptop","price":2499,"tags":["a"]}]"#,
        );

        store.append(NewItem::named("Mouse")).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains(r#""price": 2499,"#), "{}", raw);
        assert!(!raw.contains("2499.0"), "{}", raw);
        assert!(raw.contains(r#""tags": ["#), "{}", raw);
    }

    #[tokio::test]
    async fn test_append_to_empty_collection() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&dir, "[]");

        let item = store.append(NewItem::named("First")).await.unwrap();
        assert_eq!(item.id, 1);
    }

    #[tokio::test]
    async fn test_concurrent_appends_get_unique_ids() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(store_with(&dir, "[]"));

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.append(NewItem::named(format!("item{}", i))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=20).collect::<Vec<u64>>());
        assert_eq!(store.read_all().await.unwrap().len(), 20);
    }
}
