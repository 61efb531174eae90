//! Region capture panel: stage regions, pick the variants to capture for
//! each, and commit them into a FIFO queue.
//!
//! The crate keeps two collections (the pending selection and the committed
//! queue) and reflows one scrollable panel for each. Layouts are rebuilt only
//! for panels marked dirty, on the next [`PanelController::tick`].

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod palette;
pub mod queue;
pub mod registry;
pub mod runtime;
pub mod selection;
pub mod width;

pub use catalog::{
    Catalog, CatalogEntry, RegionSpec, StaticCatalog, VariantId, VariantInfo, VariantSpec,
};
pub use error::{CatalogError, PanelError, Result};
pub use geometry::{Point, Size};
pub use layout::{
    ItemKind, LayoutContext, LayoutMetrics, PanelLayout, PlacedItem, WrappedToken, layout_pending,
    layout_queue, wrap_tokens,
};
pub use logging::{LogEvent, LogFields, LogLevel, Logger, LoggingError, LoggingResult};
pub use metrics::{MetricSnapshot, PanelMetrics};
pub use palette::{Rgb, display_color};
pub use queue::{CommitReport, QueueEntry, QueueStore};
pub use registry::{DirtyPanels, PanelId};
pub use runtime::{
    CommandOutcome, ControllerConfig, JsonLinesSink, PanelCommand, PanelController, PanelSink,
    RecordingSink, VariantToggle,
};
pub use selection::{PendingEntry, SelectionStore};
pub use width::{CellMeasure, TextMeasure, display_width};
