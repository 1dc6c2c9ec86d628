//! Normalization of LEXICC dictionary entries.
//!
//! Entries coming from the store place their definitions and examples under
//! several different layouts. [`flatten`] turns one entry into zero or more
//! [`NormalizedRecord`]s; [`sense::resolve`] does the per-sense work.

pub mod flatten;
mod presence;
pub mod sense;

pub use dicol_types::{Example, NormalizedRecord, RawEntry};
pub use flatten::{EntryLayout, flatten};
pub use sense::{DefinitionShape, ExampleShape, ResolvedSense, resolve};
