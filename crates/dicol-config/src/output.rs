use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from("DICOL.json")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the normalized dataset is written
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Dump every raw entry here when set
    pub dump_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            dump_dir: None,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        let path = env::var("DICOL_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_path());
        let dump_dir = env::var("DICOL_DUMP_DIR").ok().map(PathBuf::from);

        Self { path, dump_dir }
    }
}
