use dicol_types::keys;
use dicol_types::{NormalizedRecord, RawEntry};
use serde_json::Value;

use crate::presence::{field, first_or_self, is_present};
use crate::sense::resolve;

/// Where an entry keeps its senses.
///
/// Variants are checked in declaration order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryLayout<'a> {
    /// `acepcion: [sense, ...]`, one record per sense
    Senses(&'a [Value]),
    /// `SubEntrada: [sub, ...]`, one record per sub-entry that has senses
    SubEntries(&'a [Value]),
    /// A lone sense, either `acepcion: {...}` or `SubEntrada: { acepcion }`
    Single(&'a Value),
    Empty,
}

impl<'a> EntryLayout<'a> {
    pub fn classify(entry: &'a Value) -> Self {
        if let Some(Value::Array(senses)) = field(entry, keys::SENSES) {
            return Self::Senses(senses);
        }

        if let Some(Value::Array(subs)) = field(entry, keys::SUB_ENTRIES) {
            return Self::SubEntries(subs);
        }

        let candidate = field(entry, keys::SENSES).or_else(|| {
            field(entry, keys::SUB_ENTRIES)
                .and_then(|sub| field(sub, keys::SENSES))
                .and_then(first_or_self)
        });

        match candidate.filter(|sense| is_present(sense)) {
            Some(sense) => Self::Single(sense),
            None => Self::Empty,
        }
    }
}

/// Flatten one entry into output records.
///
/// Entries without a headword yield nothing. The output depends only on the
/// input value.
pub fn flatten(entry: &RawEntry) -> Vec<NormalizedRecord> {
    let Some(word) = entry.headword() else {
        return Vec::new();
    };

    let record = |sense: Option<&Value>| {
        let resolved = resolve(sense);
        NormalizedRecord::new(word, &resolved.meaning, resolved.example)
    };

    match EntryLayout::classify(entry.as_value()) {
        EntryLayout::Senses(senses) => senses.iter().map(|sense| record(Some(sense))).collect(),
        EntryLayout::SubEntries(subs) => subs
            .iter()
            .filter_map(|sub| field(sub, keys::SENSES))
            .map(|senses| record(first_or_self(senses)))
            .collect(),
        EntryLayout::Single(sense) => vec![record(Some(sense))],
        EntryLayout::Empty => Vec::new(),
    }
}
