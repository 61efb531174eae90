use std::sync::{Arc, Mutex};
use std::time::Instant;

use serde_json::json;

use crate::catalog::{Catalog, VariantId};
use crate::error::Result;
use crate::layout::{LayoutContext, LayoutMetrics, PanelLayout, layout_pending, layout_queue};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::{MetricSnapshot, PanelMetrics};
use crate::palette::{Rgb, display_color};
use crate::queue::{CommitReport, QueueEntry, QueueStore};
use crate::registry::{DirtyPanels, PanelId};
use crate::selection::{PendingEntry, SelectionStore};
use crate::width::{CellMeasure, TextMeasure};

pub mod sink;

pub use sink::{JsonLinesSink, PanelSink, RecordingSink};

const LOG_TARGET: &str = "capture_panel::controller";

/// Configuration knobs for the panel controller.
#[derive(Clone)]
pub struct ControllerConfig {
    /// Width of the pending panel's scroll box.
    pub pending_width: f32,
    /// Width of the queue panel's scroll box.
    pub queue_width: f32,
    pub layout: LayoutMetrics,
    /// Optional structured logger used by the controller.
    pub logger: Option<Logger>,
    /// Counters shared with whoever wants to read them.
    pub metrics: Option<Arc<Mutex<PanelMetrics>>>,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            pending_width: 275.0,
            queue_width: 275.0,
            layout: LayoutMetrics::default(),
            logger: None,
            metrics: None,
            metrics_target: "capture_panel::metrics".to_string(),
        }
    }
}

impl ControllerConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(PanelMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<PanelMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// User intents, addressed by identifier rather than by reference into the
/// stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    /// Set the region picker's current value.
    PickRegion(String),
    AddRegion(String),
    /// Add whatever the picker holds, then reset the picker.
    AddPicked,
    AddAll,
    RemoveRegion(String),
    ToggleVariant { region: String, variant: VariantId },
    ClearPending,
    Commit,
    /// Abort: drop the whole queue.
    ClearQueue,
}

impl PanelCommand {
    fn describe(&self) -> &'static str {
        match self {
            PanelCommand::PickRegion(_) => "pick_region",
            PanelCommand::AddRegion(_) => "add_region",
            PanelCommand::AddPicked => "add_picked",
            PanelCommand::AddAll => "add_all",
            PanelCommand::RemoveRegion(_) => "remove_region",
            PanelCommand::ToggleVariant { .. } => "toggle_variant",
            PanelCommand::ClearPending => "clear_pending",
            PanelCommand::Commit => "commit",
            PanelCommand::ClearQueue => "clear_queue",
        }
    }
}

/// New visual state of a single toggled checkbox.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantToggle {
    pub region: String,
    pub variant: VariantId,
    pub checked: bool,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Applied,
    Ignored,
    Toggled(VariantToggle),
    Committed(CommitReport),
}

impl CommandOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, CommandOutcome::Ignored)
    }

    fn from_flag(applied: bool) -> Self {
        if applied {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Ignored
        }
    }
}

/// Owns the pending selection, the queue, and one dirty flag per panel.
///
/// Mutations happen synchronously; layouts are rebuilt from scratch on the
/// next [`tick`](PanelController::tick) for each panel whose flag is set.
pub struct PanelController {
    catalog: Arc<dyn Catalog>,
    measure: Arc<dyn TextMeasure>,
    config: ControllerConfig,
    selection: SelectionStore,
    queue: QueueStore,
    dirty: DirtyPanels,
    picked: Option<String>,
    layouts: [Option<PanelLayout>; 2],
    started_at: Instant,
}

impl PanelController {
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            measure: Arc::new(CellMeasure::default()),
            config: ControllerConfig::default(),
            selection: SelectionStore::new(),
            queue: QueueStore::new(),
            dirty: DirtyPanels::new(),
            picked: None,
            layouts: [None, None],
            started_at: Instant::now(),
        }
    }

    pub fn with_measure(mut self, measure: Arc<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config_mut(&mut self) -> &mut ControllerConfig {
        &mut self.config
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub fn pending_snapshot(&self) -> &[PendingEntry] {
        self.selection.entries()
    }

    pub fn queue_snapshot(&self) -> &[QueueEntry] {
        self.queue.entries()
    }

    pub fn picked(&self) -> Option<&str> {
        self.picked.as_deref()
    }

    pub fn is_dirty(&self, panel: PanelId) -> bool {
        self.dirty.is_dirty(panel)
    }

    pub fn clear_dirty(&mut self, panel: PanelId) {
        self.dirty.clear(panel);
    }

    pub fn is_pending_dirty(&self) -> bool {
        self.is_dirty(PanelId::Pending)
    }

    pub fn is_queue_dirty(&self) -> bool {
        self.is_dirty(PanelId::Queue)
    }

    pub fn clear_pending_dirty(&mut self) {
        self.clear_dirty(PanelId::Pending);
    }

    pub fn clear_queue_dirty(&mut self) {
        self.clear_dirty(PanelId::Queue);
    }

    /// Most recent layout delivered for `panel`, if any tick has built one.
    pub fn layout(&self, panel: PanelId) -> Option<&PanelLayout> {
        self.layouts[panel.slot()].as_ref()
    }

    pub fn pick_region(&mut self, name: impl Into<String>) {
        self.picked = Some(name.into());
    }

    pub fn add_region(&mut self, name: &str) -> bool {
        let added = self.selection.add_region(self.catalog.as_ref(), name);
        if added {
            self.dirty.mark(PanelId::Pending);
            let variants = self.selection.get(name).map(|set| set.len()).unwrap_or(0);
            self.log_event(
                LogLevel::Info,
                "region_added",
                [json_str("region", name), json_kv("variants", json!(variants))],
            );
        }
        added
    }

    /// Add the picked region. The picker is reset whether or not the add
    /// succeeded.
    pub fn add_picked(&mut self) -> bool {
        match self.picked.take() {
            Some(name) => self.add_region(&name),
            None => false,
        }
    }

    pub fn add_all_eligible(&mut self) -> usize {
        let added = self.selection.add_all_eligible(self.catalog.as_ref());
        self.picked = None;
        self.dirty.mark(PanelId::Pending);
        self.log_event(
            LogLevel::Info,
            "regions_added",
            [json_kv("added", json!(added))],
        );
        added
    }

    pub fn remove_region(&mut self, name: &str) -> bool {
        let removed = self.selection.remove_region(name);
        self.dirty.mark(PanelId::Pending);
        if removed {
            self.log_event(
                LogLevel::Info,
                "region_removed",
                [json_str("region", name)],
            );
        }
        removed
    }

    /// Flip one variant of a staged region.
    ///
    /// The pending panel is not marked dirty: the caller repaints only the
    /// toggled checkbox from the returned state.
    pub fn toggle_variant(&mut self, name: &str, variant: &VariantId) -> Option<VariantToggle> {
        let base = self.catalog.base_color(variant)?;
        let checked = self.selection.toggle_variant(name, variant)?;
        Some(VariantToggle {
            region: name.to_string(),
            variant: variant.clone(),
            checked,
            color: display_color(base, checked),
        })
    }

    pub fn clear_pending(&mut self) -> usize {
        let cleared = self.selection.clear();
        self.dirty.mark(PanelId::Pending);
        self.log_event(
            LogLevel::Info,
            "pending_cleared",
            [json_kv("entries", json!(cleared))],
        );
        cleared
    }

    /// Promote the pending selection into the queue and empty it.
    pub fn commit(&mut self) -> CommitReport {
        let report = self.queue.commit_from(&mut self.selection);
        self.dirty.mark(PanelId::Pending);
        self.dirty.mark(PanelId::Queue);
        self.with_metrics(|metrics| metrics.record_commit(report.promoted.len(), report.skipped()));
        self.log_event(
            LogLevel::Info,
            "queue_committed",
            [
                json_kv("promoted", json!(report.promoted.len())),
                json_kv("skipped", json!(report.skipped())),
                json_kv("queued", json!(self.queue.len())),
            ],
        );
        report
    }

    /// Abort: drop every queued entry.
    pub fn clear_queue(&mut self) -> usize {
        let cleared = self.queue.clear();
        self.dirty.mark(PanelId::Queue);
        self.log_event(
            LogLevel::Info,
            "queue_cleared",
            [json_kv("entries", json!(cleared))],
        );
        cleared
    }

    /// Dispatch a command by identifier.
    pub fn apply(&mut self, command: &PanelCommand) -> CommandOutcome {
        let outcome = match command {
            PanelCommand::PickRegion(name) => {
                self.pick_region(name.clone());
                CommandOutcome::Applied
            }
            PanelCommand::AddRegion(name) => CommandOutcome::from_flag(self.add_region(name)),
            PanelCommand::AddPicked => CommandOutcome::from_flag(self.add_picked()),
            PanelCommand::AddAll => {
                self.add_all_eligible();
                CommandOutcome::Applied
            }
            PanelCommand::RemoveRegion(name) => {
                CommandOutcome::from_flag(self.remove_region(name))
            }
            PanelCommand::ToggleVariant { region, variant } => {
                match self.toggle_variant(region, variant) {
                    Some(toggle) => CommandOutcome::Toggled(toggle),
                    None => CommandOutcome::Ignored,
                }
            }
            PanelCommand::ClearPending => {
                self.clear_pending();
                CommandOutcome::Applied
            }
            PanelCommand::Commit => CommandOutcome::Committed(self.commit()),
            PanelCommand::ClearQueue => {
                self.clear_queue();
                CommandOutcome::Applied
            }
        };

        let applied = !outcome.is_ignored();
        self.with_metrics(|metrics| metrics.record_command(applied));
        if !applied {
            self.log_event(
                LogLevel::Debug,
                "command_ignored",
                [json_kv("command", json!(command.describe()))],
            );
        }
        outcome
    }

    /// Lay out the pending panel at `width` without touching any flag.
    pub fn layout_pending(&self, width: f32) -> PanelLayout {
        layout_pending(self.selection.entries(), width, &self.layout_context())
    }

    /// Lay out the queue panel at `width` without touching any flag.
    pub fn layout_queue(&self, width: f32) -> PanelLayout {
        layout_queue(self.queue.entries(), width, &self.layout_context())
    }

    /// Rebuild and present every dirty panel, returning the panels rebuilt.
    ///
    /// A flag is cleared only once its layout has been accepted by the sink, so
    /// a failed delivery is retried on the next tick.
    pub fn tick(&mut self, sink: &mut dyn PanelSink) -> Result<Vec<PanelId>> {
        let mut rebuilt = Vec::new();
        for panel in PanelId::ALL {
            if !self.dirty.is_dirty(panel) {
                continue;
            }

            let layout = match panel {
                PanelId::Pending => self.layout_pending(self.config.pending_width),
                PanelId::Queue => self.layout_queue(self.config.queue_width),
            };
            sink.present(panel, &layout)?;

            self.dirty.clear(panel);
            self.with_metrics(|metrics| metrics.record_layout(panel, layout.items.len()));
            self.log_event(
                LogLevel::Debug,
                "layout_rebuilt",
                [
                    json_str("panel", panel.as_str()),
                    json_kv("items", json!(layout.items.len())),
                    json_kv("content_height", json!(layout.content_height)),
                ],
            );
            self.layouts[panel.slot()] = Some(layout);
            rebuilt.push(panel);
        }
        Ok(rebuilt)
    }

    /// Apply each command followed by a tick.
    pub fn run_scripted<I>(
        &mut self,
        sink: &mut dyn PanelSink,
        commands: I,
    ) -> Result<Vec<CommandOutcome>>
    where
        I: IntoIterator<Item = PanelCommand>,
    {
        let mut outcomes = Vec::new();
        self.tick(sink)?;
        for command in commands {
            outcomes.push(self.apply(&command));
            self.tick(sink)?;
        }
        Ok(outcomes)
    }

    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        let metrics = self.config.metrics.as_ref()?;
        let guard = metrics.lock().ok()?;
        Some(guard.snapshot(self.started_at.elapsed()))
    }

    /// Log the current metrics snapshot, if both a logger and metrics are configured.
    pub fn emit_metrics(&self) {
        if let (Some(logger), Some(snapshot)) = (self.config.logger.as_ref(), self.metrics_snapshot())
        {
            let _ = logger.log_event(snapshot.to_log_event(&self.config.metrics_target));
        }
    }

    fn layout_context(&self) -> LayoutContext<'_> {
        LayoutContext {
            metrics: &self.config.layout,
            variants: self.catalog.variants(),
            measure: self.measure.as_ref(),
        }
    }

    fn with_metrics(&self, record: impl FnOnce(&mut PanelMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut guard);
            }
        }
    }

    fn log_event<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, serde_json::Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}
