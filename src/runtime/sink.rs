//! Destinations for freshly computed panel layouts.

use std::io::Write;

use serde::Serialize;

use crate::error::{PanelError, Result};
use crate::layout::PanelLayout;
use crate::registry::PanelId;

/// The widget collaborator that draws a panel from its layout.
///
/// `present` receives the complete item list each time; the previous items
/// for that panel are to be discarded.
pub trait PanelSink {
    fn present(&mut self, panel: PanelId, layout: &PanelLayout) -> Result<()>;
}

/// Keeps every presented layout, oldest first.
#[derive(Debug, Default)]
pub struct RecordingSink {
    frames: Vec<(PanelId, PanelLayout)>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[(PanelId, PanelLayout)] {
        &self.frames
    }

    pub fn latest(&self, panel: PanelId) -> Option<&PanelLayout> {
        self.frames
            .iter()
            .rev()
            .find(|(id, _)| *id == panel)
            .map(|(_, layout)| layout)
    }

    pub fn count(&self, panel: PanelId) -> usize {
        self.frames.iter().filter(|(id, _)| *id == panel).count()
    }
}

impl PanelSink for RecordingSink {
    fn present(&mut self, panel: PanelId, layout: &PanelLayout) -> Result<()> {
        self.frames.push((panel, layout.clone()));
        Ok(())
    }
}

#[derive(Serialize)]
struct Frame<'a> {
    panel: PanelId,
    #[serde(flatten)]
    layout: &'a PanelLayout,
}

/// Streams layouts as JSON lines for an out-of-process renderer.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PanelSink for JsonLinesSink<W> {
    fn present(&mut self, panel: PanelId, layout: &PanelLayout) -> Result<()> {
        let line = serde_json::to_string(&Frame { panel, layout })
            .map_err(|err| PanelError::Sink(err.to_string()))?;
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutMetrics;
    use serde_json::Value;

    #[test]
    fn recording_sink_tracks_latest_per_panel() {
        let metrics = LayoutMetrics::default();
        let mut sink = RecordingSink::new();
        let empty = PanelLayout::empty(&metrics);
        sink.present(PanelId::Pending, &empty).unwrap();
        sink.present(PanelId::Queue, &empty).unwrap();
        sink.present(PanelId::Pending, &empty).unwrap();

        assert_eq!(sink.count(PanelId::Pending), 2);
        assert_eq!(sink.count(PanelId::Queue), 1);
        assert!(sink.latest(PanelId::Queue).is_some());
    }

    #[test]
    fn json_lines_sink_tags_frames_with_panel() {
        let metrics = LayoutMetrics::default();
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.present(PanelId::Queue, &PanelLayout::empty(&metrics))
            .unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let frame: Value = serde_json::from_str(output.trim_end()).unwrap();
        assert_eq!(frame["panel"], "queue");
        assert_eq!(frame["content_height"], 0.0);
        assert!(frame["items"].as_array().unwrap().is_empty());
    }
}
