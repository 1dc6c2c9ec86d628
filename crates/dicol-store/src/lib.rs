mod api;
mod local;

pub use api::ApiStore;
pub use local::LocalStore;

use dicol_config::StoreSource;
use dicol_config::store::StoreConfig;
use dicol_types::RawEntry;

/// Structure elements, attributes and dictionary info are passed through untyped
pub type Document = serde_json::Value;

/// Entry store interface
#[async_trait::async_trait]
pub trait EntryStore: Send + Sync {
    /// Entries whose headword starts with `letter`
    async fn fetch_entries(
        &self,
        dictionary_id: &str,
        letter: &str,
    ) -> Result<Vec<RawEntry>, StoreError>;

    /// Dictionary structure elements
    async fn fetch_structure(&self, dictionary_id: &str) -> Result<Vec<Document>, StoreError>;

    /// Dictionary attributes
    async fn fetch_attributes(&self, dictionary_id: &str) -> Result<Vec<Document>, StoreError>;

    /// Dictionary info
    async fn fetch_dictionary(&self, dictionary_id: &str) -> Result<Document, StoreError>;

    /// Store a new entry, returning it as stored
    async fn create_entry(&self, entry: RawEntry) -> Result<RawEntry, StoreError>;

    /// Replace the entry with the same `_id`
    async fn update_entry(&self, entry: RawEntry) -> Result<(), StoreError>;

    async fn delete_entry(&self, entry_id: &str) -> Result<(), StoreError>;

    fn metadata(&self) -> StoreMetadata;
}

#[derive(Debug, Clone)]
pub struct StoreMetadata {
    pub name: String,
    pub remote: bool,
}

/// Everything needed to edit one letter of a dictionary
#[derive(Debug, Clone)]
pub struct DictionaryData {
    pub structure: Vec<Document>,
    pub entries: Vec<RawEntry>,
    pub dictionary: Document,
    pub attributes: Vec<Document>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Response has no data")]
    MissingData,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
}

/// Build the configured backend
pub fn build_store(config: &StoreConfig) -> Box<dyn EntryStore> {
    match config.source {
        StoreSource::Api => {
            let store = ApiStore::new(config.api_url.clone());
            match &config.access_token {
                Some(token) => Box::new(store.with_access_token(token.clone())),
                None => Box::new(store),
            }
        }
        StoreSource::Local => Box::new(LocalStore::new(config.local_dir.clone())),
    }
}

/// Fetch structure, entries, dictionary info and attributes together
pub async fn load_data(
    store: &dyn EntryStore,
    dictionary_id: &str,
    letter: &str,
) -> Result<DictionaryData, StoreError> {
    let (structure, entries, dictionary, attributes) = tokio::try_join!(
        store.fetch_structure(dictionary_id),
        store.fetch_entries(dictionary_id, letter),
        store.fetch_dictionary(dictionary_id),
        store.fetch_attributes(dictionary_id),
    )?;

    Ok(DictionaryData {
        structure,
        entries,
        dictionary,
        attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_configured_backend() {
        let api = build_store(&StoreConfig::default());
        assert!(api.metadata().remote);

        let local = build_store(&StoreConfig {
            source: StoreSource::Local,
            ..StoreConfig::default()
        });
        assert!(!local.metadata().remote);
    }
}
