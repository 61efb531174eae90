//! Reflow layout engine for the pending and queue panels.
//!
//! Both panels are pure functions from a collection snapshot plus panel width
//! to a [`PanelLayout`]: every positioned item and the total scrollable
//! content height. Placement and height come out of the same line cursor, so
//! the two cannot drift apart.

mod core;
mod pending;
mod queue;

pub use self::core::{
    ItemKind, LayoutContext, LayoutMetrics, PanelLayout, PlacedItem, WrappedToken, wrap_tokens,
};
pub use pending::layout_pending;
pub use queue::{CURRENT_HEADER, QUEUED_HEADER, layout_queue};
