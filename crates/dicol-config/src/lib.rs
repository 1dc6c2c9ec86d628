use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use self::output::OutputConfig;
use self::store::StoreConfig;

pub mod output;
pub mod store;

pub use self::store::StoreSource;

/// Letters the collector walks, in order
pub const ALPHABET: [&str; 27] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z", "Ñ",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Build from environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            store: StoreConfig::new(),
            output: OutputConfig::new(),
        }
    }

    /// Load a JSON config file. Missing sections take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file {}", path.display()))?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader(reader)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn alphabet_ends_with_enye() {
        assert_eq!(ALPHABET.len(), 27);
        assert_eq!(ALPHABET[0], "A");
        assert_eq!(ALPHABET[26], "Ñ");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "store": {{ "source": "local", "local_dir": "/tmp/dicol" }} }}"#).unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.store.source, StoreSource::Local);
        assert_eq!(config.store.local_dir, PathBuf::from("/tmp/dicol"));
        assert_eq!(config.store.dictionary_id, store::DEFAULT_DICTIONARY_ID);
        assert_eq!(config.store.api_url, store::DEFAULT_API_URL);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(Config::load(file.path()).is_err());
        assert!(Config::load(Path::new("/nonexistent/dicol.json")).is_err());
    }

    #[test]
    fn source_parsing() {
        assert_eq!(StoreSource::parse("API"), Some(StoreSource::Api));
        assert_eq!(StoreSource::parse(" local "), Some(StoreSource::Local));
        assert_eq!(StoreSource::parse("localStorage"), Some(StoreSource::Local));
        assert_eq!(StoreSource::parse("ftp"), None);
    }
}
