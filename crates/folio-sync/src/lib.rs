//! Portfolio data sync: flattens the structured site content into the JSON
//! artifact the front end loads at runtime.

pub mod config;
pub mod content;
pub mod error;
pub mod format;
pub mod source;
pub mod transform;
pub mod writer;

pub use config::{load_config, SyncConfig, DEFAULT_INCLUDE_KEYS};
pub use error::SyncError;
pub use source::{SourceModule, SourceValue};
pub use transform::process_data;
pub use writer::{render, write_artifact};
