use crate::logging::{LogEvent, LogFields, LogLevel};
use crate::registry::PanelId;
use serde_json::json;
use std::time::Duration;

/// Counters accumulated by the panel controller.
#[derive(Debug, Default, Clone)]
pub struct PanelMetrics {
    commands: u64,
    ignored_commands: u64,
    pending_layouts: u64,
    queue_layouts: u64,
    items_placed: u64,
    promoted: u64,
    skipped: u64,
}

impl PanelMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_command(&mut self, applied: bool) {
        self.commands = self.commands.saturating_add(1);
        if !applied {
            self.ignored_commands = self.ignored_commands.saturating_add(1);
        }
    }

    pub fn record_layout(&mut self, panel: PanelId, items: usize) {
        match panel {
            PanelId::Pending => self.pending_layouts = self.pending_layouts.saturating_add(1),
            PanelId::Queue => self.queue_layouts = self.queue_layouts.saturating_add(1),
        }
        self.items_placed = self.items_placed.saturating_add(items as u64);
    }

    pub fn record_commit(&mut self, promoted: usize, skipped: usize) {
        self.promoted = self.promoted.saturating_add(promoted as u64);
        self.skipped = self.skipped.saturating_add(skipped as u64);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            commands: self.commands,
            ignored_commands: self.ignored_commands,
            pending_layouts: self.pending_layouts,
            queue_layouts: self.queue_layouts,
            items_placed: self.items_placed,
            promoted: self.promoted,
            skipped: self.skipped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub commands: u64,
    pub ignored_commands: u64,
    pub pending_layouts: u64,
    pub queue_layouts: u64,
    pub items_placed: u64,
    pub promoted: u64,
    pub skipped: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "panel_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("commands".to_string(), json!(self.commands));
        map.insert("ignored_commands".to_string(), json!(self.ignored_commands));
        map.insert("pending_layouts".to_string(), json!(self.pending_layouts));
        map.insert("queue_layouts".to_string(), json!(self.queue_layouts));
        map.insert("items_placed".to_string(), json!(self.items_placed));
        map.insert("promoted".to_string(), json!(self.promoted));
        map.insert("skipped".to_string(), json!(self.skipped));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_per_panel() {
        let mut metrics = PanelMetrics::new();
        metrics.record_command(true);
        metrics.record_command(false);
        metrics.record_layout(PanelId::Pending, 6);
        metrics.record_layout(PanelId::Queue, 4);
        metrics.record_layout(PanelId::Queue, 0);
        metrics.record_commit(2, 1);

        let snapshot = metrics.snapshot(Duration::from_millis(1500));
        assert_eq!(snapshot.commands, 2);
        assert_eq!(snapshot.ignored_commands, 1);
        assert_eq!(snapshot.pending_layouts, 1);
        assert_eq!(snapshot.queue_layouts, 2);
        assert_eq!(snapshot.items_placed, 10);
        assert_eq!(snapshot.promoted, 2);
        assert_eq!(snapshot.skipped, 1);
        assert_eq!(snapshot.uptime_ms, 1500);
    }

    #[test]
    fn snapshot_renders_as_log_event() {
        let mut metrics = PanelMetrics::new();
        metrics.record_commit(3, 0);
        let event = metrics
            .snapshot(Duration::ZERO)
            .to_log_event("capture_panel::metrics");
        assert_eq!(event.message, "panel_metrics");
        assert_eq!(event.target, "capture_panel::metrics");
        assert_eq!(event.field("promoted"), Some(&json!(3)));
    }
}
