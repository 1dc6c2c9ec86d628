use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use dicol_types::{RawEntry, keys};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{Document, EntryStore, StoreError, StoreMetadata};

const ENTRIES_KEY: &str = "dictionary-entries";
const STRUCTURE_KEY: &str = "dictionary-structure";
const ATTRIBUTES_KEY: &str = "dictionary-attribute";
const DICTIONARY_KEY: &str = "dictionaryInfo";

/// Offline backend: one JSON document per key in a directory.
///
/// Holds a single dictionary, so the dictionary id is not consulted.
pub struct LocalStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Read a document; a missing file reads as the default value
    async fn read_key<T>(&self, key: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        match tokio::fs::read(self.path(key)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(T::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_key<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.root).await?;
        let json = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(self.path(key), json).await?;
        Ok(())
    }

    async fn read_entries(&self) -> Result<Vec<RawEntry>, StoreError> {
        self.read_key(ENTRIES_KEY).await
    }

    /// Replace the stored structure elements
    pub async fn save_structure(&self, structure: &[Document]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write_key(STRUCTURE_KEY, &structure).await
    }

    /// Replace the stored attributes
    pub async fn save_attributes(&self, attributes: &[Document]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write_key(ATTRIBUTES_KEY, &attributes).await
    }

    pub async fn save_dictionary(&self, dictionary: &Document) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.write_key(DICTIONARY_KEY, dictionary).await
    }
}

fn starts_with_letter(entry: &RawEntry, letter: &str) -> bool {
    entry
        .headword()
        .is_some_and(|word| word.to_lowercase().starts_with(&letter.to_lowercase()))
}

#[async_trait]
impl EntryStore for LocalStore {
    async fn fetch_entries(
        &self,
        _dictionary_id: &str,
        letter: &str,
    ) -> Result<Vec<RawEntry>, StoreError> {
        let entries = self.read_entries().await?;
        Ok(entries
            .into_iter()
            .filter(|entry| starts_with_letter(entry, letter))
            .collect())
    }

    async fn fetch_structure(&self, _dictionary_id: &str) -> Result<Vec<Document>, StoreError> {
        self.read_key(STRUCTURE_KEY).await
    }

    async fn fetch_attributes(&self, _dictionary_id: &str) -> Result<Vec<Document>, StoreError> {
        self.read_key(ATTRIBUTES_KEY).await
    }

    async fn fetch_dictionary(&self, _dictionary_id: &str) -> Result<Document, StoreError> {
        let dictionary: Option<Document> = self.read_key(DICTIONARY_KEY).await?;
        Ok(dictionary.unwrap_or_else(|| Value::Object(Default::default())))
    }

    async fn create_entry(&self, entry: RawEntry) -> Result<RawEntry, StoreError> {
        let mut value = entry.into_value();
        let Some(object) = value.as_object_mut() else {
            return Err(StoreError::InvalidEntry("entry is not an object".to_string()));
        };
        object.insert(keys::ID.to_string(), Value::from(format!("ls_{}", Uuid::new_v4())));
        let entry = RawEntry::new(value);

        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.push(entry.clone());
        self.write_key(ENTRIES_KEY, &entries).await?;

        tracing::debug!(id = entry.id(), "Created local entry");
        Ok(entry)
    }

    async fn update_entry(&self, entry: RawEntry) -> Result<(), StoreError> {
        let Some(id) = entry.id().map(str::to_string) else {
            return Err(StoreError::InvalidEntry("entry has no _id".to_string()));
        };

        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        let slot = entries
            .iter_mut()
            .find(|stored| stored.id() == Some(id.as_str()))
            .ok_or(StoreError::NotFound(id))?;
        *slot = entry;

        self.write_key(ENTRIES_KEY, &entries).await
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries().await?;
        let before = entries.len();
        entries.retain(|stored| stored.id() != Some(entry_id));

        if entries.len() == before {
            return Err(StoreError::NotFound(entry_id.to_string()));
        }

        self.write_key(ENTRIES_KEY, &entries).await
    }

    fn metadata(&self) -> StoreMetadata {
        StoreMetadata {
            name: format!("local store at {}", self.root.display()),
            remote: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::load_data;

    fn entry(value: Value) -> RawEntry {
        RawEntry::new(value)
    }

    #[tokio::test]
    async fn missing_documents_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path().join("nested"));

        assert!(store.fetch_entries("any", "A").await.unwrap().is_empty());
        assert!(store.fetch_structure("any").await.unwrap().is_empty());
        assert!(store.fetch_attributes("any").await.unwrap().is_empty());
        assert_eq!(store.fetch_dictionary("any").await.unwrap(), json!({}));
    }

    #[tokio::test]
    async fn created_entries_get_local_ids_and_are_filtered_by_letter() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        for word in ["ajiaco", "Arepa", "bacano", "ñapa"] {
            let created = store.create_entry(entry(json!({"lemmaSign": word}))).await.unwrap();
            assert!(created.id().unwrap().starts_with("ls_"));
        }

        let a: Vec<_> = store.fetch_entries("", "A").await.unwrap();
        let words: Vec<_> = a.iter().filter_map(RawEntry::headword).collect();
        assert_eq!(words, ["ajiaco", "Arepa"]);

        let enye = store.fetch_entries("", "Ñ").await.unwrap();
        assert_eq!(enye.len(), 1);

        assert_eq!(store.fetch_entries("", "").await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn entries_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        LocalStore::new(dir.path())
            .create_entry(entry(json!({"lemmaSign": "chévere"})))
            .await
            .unwrap();

        let reopened = LocalStore::new(dir.path());
        assert_eq!(reopened.fetch_entries("", "c").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_and_delete_match_on_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        let created = store
            .create_entry(entry(json!({"lemmaSign": "parce", "acepcion": []})))
            .await
            .unwrap();
        let id = created.id().unwrap().to_string();

        let mut changed = created.into_value();
        changed["acepcion"] = json!([{"definicion": "Amigo."}]);
        store.update_entry(entry(changed.clone())).await.unwrap();

        let stored = store.fetch_entries("", "P").await.unwrap();
        assert_eq!(stored, vec![entry(changed)]);

        store.delete_entry(&id).await.unwrap();
        assert!(store.fetch_entries("", "P").await.unwrap().is_empty());
        assert!(matches!(
            store.delete_entry(&id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_rejects_unknown_or_missing_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let missing = store.update_entry(entry(json!({"lemmaSign": "x"}))).await;
        assert!(matches!(missing, Err(StoreError::InvalidEntry(_))));

        let unknown = store
            .update_entry(entry(json!({"_id": "ls_nope", "lemmaSign": "x"})))
            .await;
        assert!(matches!(unknown, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_rejects_non_objects() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let result = store.create_entry(entry(json!("suelto"))).await;
        assert!(matches!(result, Err(StoreError::InvalidEntry(_))));
    }

    #[tokio::test]
    async fn corrupt_document_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dictionary-entries.json"), "{oops").unwrap();
        let store = LocalStore::new(dir.path());

        assert!(matches!(
            store.fetch_entries("", "A").await,
            Err(StoreError::Json(_))
        ));
    }

    #[tokio::test]
    async fn load_data_combines_all_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        store.save_structure(&[json!({"_id": "s1", "name": "lemma"})]).await.unwrap();
        store.save_attributes(&[json!({"_id": "a1", "idLabel": "s1"})]).await.unwrap();
        store.save_dictionary(&json!({"name": "DICOL"})).await.unwrap();
        store.create_entry(entry(json!({"lemmaSign": "guayabo"}))).await.unwrap();

        let data = load_data(&store, "ignored", "G").await.unwrap();

        assert_eq!(data.structure.len(), 1);
        assert_eq!(data.attributes.len(), 1);
        assert_eq!(data.dictionary["name"], "DICOL");
        assert_eq!(data.entries.len(), 1);
    }
}
