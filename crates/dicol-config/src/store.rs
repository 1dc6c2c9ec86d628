use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://lexicc.caroycuervo.gov.co/api/";
/// Diccionario de Colombianismos
pub const DEFAULT_DICTIONARY_ID: &str = "642af684da699a2968ef1d19";

/// Which entry store backend to build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreSource {
    #[default]
    Api,
    Local,
}

impl StoreSource {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "api" => Some(StoreSource::Api),
            "local" | "localstorage" => Some(StoreSource::Local),
            _ => None,
        }
    }
}

fn default_dictionary_id() -> String {
    DEFAULT_DICTIONARY_ID.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_local_dir() -> PathBuf {
    PathBuf::from("local-store")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub source: StoreSource,
    #[serde(default = "default_dictionary_id")]
    pub dictionary_id: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token for the remote API
    pub access_token: Option<String>,
    /// Directory holding the offline store documents
    #[serde(default = "default_local_dir")]
    pub local_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            source: StoreSource::default(),
            dictionary_id: default_dictionary_id(),
            api_url: default_api_url(),
            access_token: None,
            local_dir: default_local_dir(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        let source = env::var("DICOL_SOURCE")
            .ok()
            .and_then(|v| StoreSource::parse(&v))
            .unwrap_or(defaults.source);

        let dictionary_id = env::var("DICOL_DICTIONARY_ID").unwrap_or(defaults.dictionary_id);
        let api_url = env::var("DICOL_API_URL").unwrap_or(defaults.api_url);
        let access_token = env::var("DICOL_ACCESS_TOKEN").ok().filter(|t| !t.is_empty());
        let local_dir = env::var("DICOL_LOCAL_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.local_dir);

        Self {
            source,
            dictionary_id,
            api_url,
            access_token,
            local_dir,
        }
    }
}
