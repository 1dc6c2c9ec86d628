use async_trait::async_trait;
use dicol_types::RawEntry;
use reqwest::{Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{Document, EntryStore, StoreError, StoreMetadata};

/// LEXICC REST API backend
#[derive(Clone)]
pub struct ApiStore {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct ApiResponse<T> {
    data: Option<T>,
}

impl ApiStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/lexicc/v1/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.client.request(method, self.endpoint(path));
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET an endpoint and unwrap its `data` field
    async fn get_data<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let response = self.request(Method::GET, path).query(query).send().await?;
        let response = check_status(response)?;

        let body: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| StoreError::Api(format!("Failed to parse response: {e}")))?;

        body.data.ok_or(StoreError::MissingData)
    }
}

fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if !status.is_success() {
        return Err(StoreError::Api(format!("HTTP {status}")));
    }
    Ok(response)
}

fn require_id(entry: &RawEntry) -> Result<&str, StoreError> {
    entry
        .id()
        .ok_or_else(|| StoreError::InvalidEntry("entry has no _id".to_string()))
}

#[async_trait]
impl EntryStore for ApiStore {
    async fn fetch_entries(
        &self,
        dictionary_id: &str,
        letter: &str,
    ) -> Result<Vec<RawEntry>, StoreError> {
        if dictionary_id.is_empty() {
            return Ok(Vec::new());
        }

        let prefix = format!("^{letter}");
        let query = [
            ("tagName", "lemmaSign"),
            ("name", prefix.as_str()),
            ("idDictionary", dictionary_id),
        ];

        tracing::debug!(letter, "GET dictionary-data");
        self.get_data("dictionary-data/", &query).await
    }

    async fn fetch_structure(&self, dictionary_id: &str) -> Result<Vec<Document>, StoreError> {
        if dictionary_id.is_empty() {
            return Ok(Vec::new());
        }
        self.get_data("dictionary-structure/", &[("idDictionary", dictionary_id)])
            .await
    }

    async fn fetch_attributes(&self, dictionary_id: &str) -> Result<Vec<Document>, StoreError> {
        if dictionary_id.is_empty() {
            return Ok(Vec::new());
        }
        self.get_data("dictionary-attribute/", &[("idDictionary", dictionary_id)])
            .await
    }

    async fn fetch_dictionary(&self, dictionary_id: &str) -> Result<Document, StoreError> {
        if dictionary_id.is_empty() {
            return Ok(Document::Object(Default::default()));
        }
        self.get_data(&format!("dictionaryInfo/{dictionary_id}"), &[])
            .await
    }

    async fn create_entry(&self, entry: RawEntry) -> Result<RawEntry, StoreError> {
        let response = self
            .request(Method::POST, "dictionary-data")
            .json(&entry)
            .send()
            .await?;
        let response = check_status(response)?;

        // The service may or may not echo the stored entry back
        let body = response.bytes().await?;
        let stored = serde_json::from_slice::<ApiResponse<RawEntry>>(&body)
            .ok()
            .and_then(|r| r.data);

        Ok(stored.unwrap_or(entry))
    }

    async fn update_entry(&self, entry: RawEntry) -> Result<(), StoreError> {
        let id = require_id(&entry)?;
        let response = self
            .request(Method::PUT, &format!("dictionary-data/{id}"))
            .json(&entry)
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }

    async fn delete_entry(&self, entry_id: &str) -> Result<(), StoreError> {
        let response = self
            .request(Method::DELETE, &format!("dictionary-data/{entry_id}"))
            .send()
            .await?;
        check_status(response)?;
        Ok(())
    }

    fn metadata(&self) -> StoreMetadata {
        StoreMetadata {
            name: "LEXICC API".to_string(),
            remote: true,
        }
    }
}
