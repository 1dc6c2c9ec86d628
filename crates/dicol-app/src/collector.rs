use std::path::Path;

use dicol_config::Config;
use dicol_core::flatten;
use dicol_store::{EntryStore, StoreError};
use dicol_types::{NormalizedRecord, RawEntry};

use crate::persist::{self, PersistError};

/// What happened to one letter
#[derive(Debug, Clone, PartialEq)]
pub enum PartitionOutcome {
    Loaded { entries: usize, records: usize },
    Empty,
    Failed(String),
}

impl std::fmt::Display for PartitionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartitionOutcome::Loaded { entries, records } => {
                write!(f, "{entries} entries, {records} records")
            }
            PartitionOutcome::Empty => write!(f, "no entries"),
            PartitionOutcome::Failed(e) => write!(f, "failed: {e}"),
        }
    }
}

#[derive(Debug, Default)]
pub struct Collection {
    pub records: Vec<NormalizedRecord>,
    pub partitions: Vec<(String, PartitionOutcome)>,
}

impl Collection {
    /// Entries retrieved across all letters
    pub fn entry_count(&self) -> usize {
        self.partitions
            .iter()
            .map(|(_, outcome)| match outcome {
                PartitionOutcome::Loaded { entries, .. } => *entries,
                PartitionOutcome::Empty | PartitionOutcome::Failed(_) => 0,
            })
            .sum()
    }

    pub fn failed_letters(&self) -> Vec<&str> {
        self.partitions
            .iter()
            .filter(|(_, outcome)| matches!(outcome, PartitionOutcome::Failed(_)))
            .map(|(letter, _)| letter.as_str())
            .collect()
    }
}

/// Flatten every entry of a partition, keeping input order
pub fn normalize_partition(entries: &[RawEntry]) -> Vec<NormalizedRecord> {
    entries.iter().flat_map(flatten).collect()
}

/// Fetch one letter, dumping raw entries when asked to
async fn fetch_partition(
    store: &dyn EntryStore,
    dictionary_id: &str,
    letter: &str,
    dump_dir: Option<&Path>,
) -> Result<Vec<RawEntry>, StoreError> {
    let entries = store.fetch_entries(dictionary_id, letter).await?;

    if let Some(dir) = dump_dir {
        for entry in &entries {
            if let Err(e) = persist::dump_entry(dir, entry).await {
                tracing::warn!("Failed to dump entry {:?}: {}", entry.headword(), e);
            }
        }
    }

    Ok(entries)
}

/// Walk the letters in order, one request at a time.
///
/// A letter that fails to load is logged and skipped.
pub async fn collect(
    store: &dyn EntryStore,
    dictionary_id: &str,
    letters: &[&str],
    dump_dir: Option<&Path>,
) -> Collection {
    let mut collection = Collection::default();

    for &letter in letters {
        tracing::info!(letter, "Loading entries");

        let outcome = match fetch_partition(store, dictionary_id, letter, dump_dir).await {
            Ok(entries) if entries.is_empty() => {
                tracing::info!(letter, "No entries found");
                PartitionOutcome::Empty
            }
            Ok(entries) => {
                let records = normalize_partition(&entries);
                tracing::debug!(letter, entries = entries.len(), records = records.len());
                let outcome = PartitionOutcome::Loaded {
                    entries: entries.len(),
                    records: records.len(),
                };
                collection.records.extend(records);
                outcome
            }
            Err(e) => {
                tracing::error!(letter, "Failed to load entries: {e}");
                PartitionOutcome::Failed(e.to_string())
            }
        };

        collection.partitions.push((letter.to_string(), outcome));
    }

    collection
}

/// Collect every letter and write the dataset to the configured path
pub async fn run(
    config: &Config,
    store: &dyn EntryStore,
    letters: &[&str],
) -> Result<Collection, PersistError> {
    let collection = collect(
        store,
        &config.store.dictionary_id,
        letters,
        config.output.dump_dir.as_deref(),
    )
    .await;

    persist::write_records(&config.output.path, &collection.records).await?;

    Ok(collection)
}
