//! painel-common — Shared errors, display formatting and reference tables
//! used across the Painel crates.

pub mod error;
pub mod estados;
pub mod format;

// Re-export commonly used types
pub use error::{DataError, Result};
pub use format::NA;
