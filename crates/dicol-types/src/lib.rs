pub mod keys;
pub mod types;

pub use types::*;
