//! Field names used by the LEXICC dictionary service.

pub const ID: &str = "_id";
pub const HEADWORD: &str = "lemmaSign";
pub const SENSES: &str = "acepcion";
pub const SUB_ENTRIES: &str = "SubEntrada";
pub const DEFINITION: &str = "definicion";
pub const TEXT: &str = "texto";
pub const EXAMPLE: &str = "ejemplo";
