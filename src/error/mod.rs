//! Error types shared across the panel crate.

mod types;

pub use types::{CatalogError, PanelError, Result};
