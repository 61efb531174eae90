//! Per-panel dirty tracking.

mod core;

pub use self::core::{DirtyPanels, PanelId};
